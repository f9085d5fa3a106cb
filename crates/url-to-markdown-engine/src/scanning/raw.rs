use regex::Regex;
use std::sync::LazyLock;

use super::{
    formatted::scan_formatted_links,
    kinds::RawUrl,
    span::{Span, UrlSpan},
};

/// Maximal runs starting with `http://` or `https://` up to whitespace, `]` or `)`.
///
/// Stopping at `]` and `)` keeps a match from swallowing the closing
/// delimiter of an enclosing markdown construct.
static RAW_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s\])]+").expect("Invalid raw URL regex"));

/// Finds bare `http(s)` URLs that are not already part of a markdown link.
///
/// Trailing prose punctuation is trimmed from each match, and any match that
/// lies entirely inside a formatted link or image is dropped. Spans are
/// returned left to right with `title` unset.
pub fn scan_raw_urls(s: &str) -> Vec<UrlSpan> {
    let formatted: Vec<Span> = scan_formatted_links(s).into_iter().map(|l| l.span).collect();

    RAW_URL_RE
        .find_iter(s)
        .filter_map(|m| {
            let url = RawUrl::trim_trailing(m.as_str());
            let span = Span {
                start: m.start(),
                end: m.start() + url.len(),
            };
            if formatted.iter().any(|f| f.contains(span)) {
                log::trace!("skipping {url} at {}: inside formatted link", span.start);
                return None;
            }
            Some(UrlSpan::raw(url, span))
        })
        .collect()
}
