use async_trait::async_trait;
use reqwest::{Client, Url};
use scraper::{Html, Selector};

use super::{MetadataError, MetadataSource, PageMetadata, get_text, non_empty_title};

/// Reads the title straight from the page's HTML.
///
/// Useful when the metadata API is rate limited or unreachable.
pub struct HtmlTitleSource {
    client: Client,
}

impl HtmlTitleSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MetadataSource for HtmlTitleSource {
    async fn fetch(&self, url: &str) -> Result<PageMetadata, MetadataError> {
        let target = Url::parse(url).map_err(|source| MetadataError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let html = get_text(&self.client, target, url).await?;
        Ok(parse_page(&html))
    }

    fn name(&self) -> &'static str {
        "html"
    }
}

/// Title and icon presence of an HTML document.
pub fn parse_page(html: &str) -> PageMetadata {
    let document = Html::parse_document(html);
    PageMetadata {
        title: document_title(&document),
        has_icon: has_icon_link(&document),
    }
}

/// Returns the document's `<title>` text.
///
/// Only the title element of the document head counts; titles inside
/// comments, scripts or inline SVG are ignored.
pub fn extract_title(html: &str) -> Option<String> {
    document_title(&Html::parse_document(html))
}

fn document_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("head > title").ok()?;
    let title = document.select(&selector).next()?;
    non_empty_title(&title.text().collect::<String>())
}

fn has_icon_link(document: &Html) -> bool {
    Selector::parse("link[rel~=icon], link[rel~=apple-touch-icon]")
        .map(|selector| document.select(&selector).next().is_some())
        .unwrap_or(false)
}
