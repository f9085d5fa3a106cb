//! # Scanning Kinds
//!
//! Types that own the syntax the scanners recognise. The scanners call
//! these constants; they never hardcode `[`, `](` or the trimmed punctuation.
//!
//! - **`MarkdownLink`**: `[label](target)` and the `!` image prefix
//! - **`RawUrl`**: trailing punctuation trimmed from bare URLs

pub mod markdown_link;
pub mod raw_url;

pub use markdown_link::MarkdownLink;
pub use raw_url::RawUrl;
