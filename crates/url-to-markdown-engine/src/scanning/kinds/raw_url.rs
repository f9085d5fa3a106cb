pub struct RawUrl;

impl RawUrl {
    /// Prose punctuation trimmed from the end of a match.
    pub const TRAILING_PUNCTUATION: [char; 6] = ['.', ',', ';', ':', '!', '?'];

    /// Strips a trailing run of prose punctuation.
    pub fn trim_trailing(candidate: &str) -> &str {
        candidate.trim_end_matches(Self::TRAILING_PUNCTUATION)
    }
}
