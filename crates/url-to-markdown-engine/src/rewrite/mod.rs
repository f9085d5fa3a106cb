//! # Content Rewriting
//!
//! Replaces raw URLs in a block's text with resolver-provided markdown.
//!
//! Raw spans are computed once, up front. They are then resolved and spliced
//! from the last to the first, so a replacement never moves the offsets of a
//! span that has not been processed yet. Resolution is sequential: each
//! `resolve` call is awaited before its splice and before the next call.

pub mod resolve;

pub use resolve::Resolve;

use crate::scanning::scan_raw_urls;

/// How many raw URLs one rewrite pass may convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RewriteLimit {
    /// Every raw URL in the text.
    #[default]
    All,
    /// Only the first `n` raw URLs in document order; the rest are left for
    /// a later pass.
    First(usize),
}

impl RewriteLimit {
    fn take(self, found: usize) -> usize {
        match self {
            RewriteLimit::All => found,
            RewriteLimit::First(n) => n.min(found),
        }
    }
}

/// Result of a rewrite with per-span bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub text: String,
    /// Spans whose resolution produced markdown.
    pub replaced: usize,
    /// Spans the resolver declined.
    pub skipped: usize,
}

impl RewriteOutcome {
    pub fn changed(&self) -> bool {
        self.replaced > 0
    }
}

/// Rewrites raw URLs in `text`, returning the new text.
///
/// Text without raw URLs is returned unchanged and `resolver` is never called.
pub async fn rewrite_content<R>(text: &str, resolver: &R, limit: RewriteLimit) -> String
where
    R: Resolve + ?Sized,
{
    rewrite_content_detailed(text, resolver, limit).await.text
}

/// Same as [`rewrite_content`] but also reports how many spans were replaced.
pub async fn rewrite_content_detailed<R>(
    text: &str,
    resolver: &R,
    limit: RewriteLimit,
) -> RewriteOutcome
where
    R: Resolve + ?Sized,
{
    let mut spans = scan_raw_urls(text);
    spans.truncate(limit.take(spans.len()));

    let mut out = text.to_string();
    let mut replaced = 0;
    let mut skipped = 0;

    for found in spans.iter().rev() {
        match resolver.resolve(&found.url).await {
            Some(markdown) => {
                log::debug!("replacing {} at {}..{}", found.url, found.start(), found.end());
                out.replace_range(found.start()..found.end(), &markdown);
                replaced += 1;
            }
            None => {
                log::debug!("leaving {} unconverted", found.url);
                skipped += 1;
            }
        }
    }

    RewriteOutcome {
        text: out,
        replaced,
        skipped,
    }
}
