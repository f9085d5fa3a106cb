use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;

use super::{MetadataError, MetadataSource, PageMetadata, get_text, non_empty_title};

pub const MICROLINK_API_URL: &str = "https://api.microlink.io/";

/// Metadata from the microlink.io API.
pub struct MicrolinkSource {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct MicrolinkResponse {
    status: Option<String>,
    data: Option<MicrolinkData>,
}

#[derive(Debug, Deserialize)]
struct MicrolinkData {
    title: Option<String>,
    logo: Option<Value>,
    image: Option<Value>,
}

impl MicrolinkSource {
    pub fn new(client: Client) -> Self {
        Self::with_endpoint(client, MICROLINK_API_URL)
    }

    /// Uses a different API base, e.g. a self-hosted microlink instance.
    pub fn with_endpoint(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// The API request for `url`, with the page URL query-encoded.
    pub fn request_url(&self, url: &str) -> Result<Url, MetadataError> {
        Url::parse_with_params(&self.endpoint, &[("url", url)]).map_err(|source| {
            MetadataError::InvalidUrl {
                url: self.endpoint.clone(),
                source,
            }
        })
    }
}

#[async_trait]
impl MetadataSource for MicrolinkSource {
    async fn fetch(&self, url: &str) -> Result<PageMetadata, MetadataError> {
        let api = self.request_url(url)?;
        log::debug!("microlink request: {api}");

        let body = get_text(&self.client, api, url).await?;
        parse_response(&body)
    }

    fn name(&self) -> &'static str {
        "microlink"
    }
}

/// Parses a microlink API body.
///
/// Only `status == "success"` with a `data` object counts as valid. A valid
/// response may still lack a title.
pub fn parse_response(body: &str) -> Result<PageMetadata, MetadataError> {
    let response: MicrolinkResponse =
        serde_json::from_str(body).map_err(|e| MetadataError::InvalidPayload(e.to_string()))?;

    let status = response.status.as_deref().unwrap_or("missing");
    let data = match (status, response.data) {
        ("success", Some(data)) => data,
        _ => {
            return Err(MetadataError::InvalidPayload(format!(
                "unexpected status `{status}`"
            )));
        }
    };

    let has_logo = data.logo.as_ref().is_some_and(is_present);
    let has_image = data
        .image
        .as_ref()
        .and_then(|image| image.get("url"))
        .is_some_and(is_present);

    Ok(PageMetadata {
        title: data.title.as_deref().and_then(non_empty_title),
        has_icon: has_logo || has_image,
    })
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}
