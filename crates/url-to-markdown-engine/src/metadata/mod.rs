//! # Page Metadata
//!
//! Sources that look up a page's title for the link resolver.
//!
//! - **`microlink`**: the microlink.io metadata API (default)
//! - **`html`**: fetches the page itself and reads its `<title>` with `scraper`
//!
//! Sources report failures as [`MetadataError`]; deciding what a failure
//! means for the link (fallback title or no conversion) is the resolver's job.

pub mod html;
pub mod microlink;

pub use html::HtmlTitleSource;
pub use microlink::MicrolinkSource;

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("url-to-markdown/", env!("CARGO_PKG_VERSION"));

/// What a source learned about a page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageMetadata {
    /// Page title, if the source found a non-empty one.
    pub title: Option<String>,
    /// Whether the page advertises an icon or logo.
    pub has_icon: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Request failed for {url}: {source}")]
    Request { url: String, source: reqwest::Error },
    #[error("Timed out fetching {0}")]
    Timeout(String),
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("Invalid metadata payload: {0}")]
    InvalidPayload(String),
    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
}

impl MetadataError {
    fn from_request(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            MetadataError::Timeout(url.to_string())
        } else {
            MetadataError::Request {
                url: url.to_string(),
                source,
            }
        }
    }
}

/// Looks up metadata for a page URL.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<PageMetadata, MetadataError>;

    /// Short name for logging.
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<T: MetadataSource + ?Sized> MetadataSource for Box<T> {
    async fn fetch(&self, url: &str) -> Result<PageMetadata, MetadataError> {
        (**self).fetch(url).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Builds the HTTP client shared by the sources.
pub fn http_client(timeout: Duration) -> Result<Client, MetadataError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(MetadataError::Client)
}

/// GETs `target` and returns the body of a successful response.
async fn get_text(
    client: &Client,
    target: reqwest::Url,
    page_url: &str,
) -> Result<String, MetadataError> {
    let response = client
        .get(target)
        .send()
        .await
        .map_err(|e| MetadataError::from_request(page_url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(MetadataError::Status {
            status: status.as_u16(),
            url: page_url.to_string(),
        });
    }

    response
        .text()
        .await
        .map_err(|e| MetadataError::from_request(page_url, e))
}

/// Collapses whitespace runs and drops empty results.
fn non_empty_title(raw: &str) -> Option<String> {
    let title = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    (!title.is_empty()).then_some(title)
}
