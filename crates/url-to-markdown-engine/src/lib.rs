pub mod host;
pub mod io;
pub mod markdown;
pub mod metadata;
pub mod outline;
pub mod resolver;
pub mod rewrite;
pub mod scanning;

// Re-export key types for easier usage
pub use host::{BlockChange, BlockId, BlockProcessor, BlockStore, ProcessReport, StoreError};
pub use io::*;
pub use markdown::{FaviconPosition, FaviconStyle, LinkFormat};
pub use metadata::{
    HtmlTitleSource, MetadataError, MetadataSource, MicrolinkSource, PageMetadata, http_client,
};
pub use outline::{OutlineDocument, SharedOutline};
pub use resolver::{LinkResolver, TitleFallback};
pub use rewrite::{Resolve, RewriteLimit, RewriteOutcome, rewrite_content, rewrite_content_detailed};
pub use scanning::{Span, UrlAnalysis, UrlSpan, analyze_urls, scan_formatted_links, scan_raw_urls};
