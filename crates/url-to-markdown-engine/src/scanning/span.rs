/// A byte range `[start, end)` into a block's text.
///
/// Offsets always fall on char boundaries, so `&text[span.start..span.end]`
/// reproduces the exact matched source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Returns true if `other` lies entirely inside this span.
    ///
    /// Touching edges count as contained; partial overlap does not.
    #[must_use]
    pub fn contains(self, other: Span) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Slices `text` with this span.
    pub fn slice(self, text: &str) -> &str {
        &text[self.start..self.end]
    }
}

/// A URL located in a block's text.
///
/// Formatted links (`[label](target)`) carry their label in `title`; raw
/// URLs never do. `span` covers the whole construct for formatted links and
/// just the trimmed URL for raw ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlSpan {
    pub url: String,
    pub span: Span,
    pub title: Option<String>,
}

impl UrlSpan {
    pub fn raw(url: impl Into<String>, span: Span) -> Self {
        Self {
            url: url.into(),
            span,
            title: None,
        }
    }

    pub fn formatted(url: impl Into<String>, title: impl Into<String>, span: Span) -> Self {
        Self {
            url: url.into(),
            span,
            title: Some(title.into()),
        }
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_len_and_empty() {
        let sp = Span { start: 3, end: 8 };
        assert_eq!(sp.len(), 5);
        assert!(!sp.is_empty());
        assert!(Span { start: 4, end: 4 }.is_empty());
        // Inverted spans are treated as empty rather than underflowing
        assert!(Span { start: 9, end: 2 }.is_empty());
    }

    #[test]
    fn contains_is_inclusive_at_edges() {
        let outer = Span { start: 10, end: 45 };
        assert!(outer.contains(Span { start: 10, end: 45 }));
        assert!(outer.contains(Span { start: 25, end: 44 }));
        assert!(!outer.contains(Span { start: 9, end: 20 }));
        assert!(!outer.contains(Span { start: 40, end: 46 }));
    }

    #[test]
    fn slice_reproduces_source() {
        let text = "see https://example.com now";
        let sp = Span { start: 4, end: 23 };
        assert_eq!(sp.slice(text), "https://example.com");
    }

    #[test]
    fn raw_spans_have_no_title() {
        let s = UrlSpan::raw("https://a.com", Span { start: 0, end: 13 });
        assert_eq!(s.title, None);
        assert_eq!((s.start(), s.end()), (0, 13));
    }

    #[test]
    fn formatted_spans_keep_empty_title() {
        let s = UrlSpan::formatted("x", "", Span { start: 0, end: 5 });
        assert_eq!(s.title.as_deref(), Some(""));
    }
}
