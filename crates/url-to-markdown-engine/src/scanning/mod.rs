//! # URL Scanning
//!
//! Locates URLs in a block's text with exact byte spans.
//!
//! ## Two passes
//!
//! - **Formatted links**: `[label](target)` and `![label](target)`, parsed
//!   with a byte cursor. These spans are exclusion zones.
//! - **Raw URLs**: bare `http(s)://` runs, with trailing prose punctuation
//!   trimmed. A raw match fully inside a formatted span is dropped.
//!
//! Both scanners are pure and total: any `&str` (including `""`) yields a
//! possibly empty, left-to-right, non-overlapping list of [`UrlSpan`]s.
//!
//! ## Modules
//!
//! - **`span`**: `Span` byte range and the `UrlSpan` result type
//! - **`kinds`**: delimiter and punctuation constants
//! - **`cursor`**: byte cursor used by the formatted-link parser
//! - **`formatted`** / **`raw`**: the two scanners

pub mod cursor;
pub mod formatted;
pub mod kinds;
pub mod raw;
pub mod span;

pub use formatted::scan_formatted_links;
pub use raw::scan_raw_urls;
pub use span::{Span, UrlSpan};

/// Formatted and raw URLs found in one text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlAnalysis {
    pub formatted: Vec<UrlSpan>,
    pub raw: Vec<UrlSpan>,
}

/// Runs both scanners over `s`.
pub fn analyze_urls(s: &str) -> UrlAnalysis {
    UrlAnalysis {
        formatted: scan_formatted_links(s),
        raw: scan_raw_urls(s),
    }
}
