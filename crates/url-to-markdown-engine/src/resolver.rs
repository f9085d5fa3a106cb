//! Resolves a raw URL into a titled markdown link.

use async_trait::async_trait;
use url::Url;

use crate::markdown::LinkFormat;
use crate::metadata::MetadataSource;
use crate::rewrite::Resolve;

/// What to do when no title can be obtained for a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleFallback {
    /// Link anyway, using the URL itself as the title.
    #[default]
    UseUrl,
    /// Leave the URL unconverted.
    Skip,
}

/// A [`Resolve`] backed by a metadata source.
///
/// The link format and fallback policy are fixed at construction; callers
/// build a new resolver when settings change.
pub struct LinkResolver<S> {
    source: S,
    format: LinkFormat,
    fallback: TitleFallback,
}

impl<S: MetadataSource> LinkResolver<S> {
    pub fn new(source: S, format: LinkFormat, fallback: TitleFallback) -> Self {
        Self {
            source,
            format,
            fallback,
        }
    }

    async fn title_for(&self, url: &str) -> Option<String> {
        match self.source.fetch(url).await {
            Ok(meta) => match meta.title {
                Some(title) => return Some(title),
                None => log::debug!("{}: no title for {url}", self.source.name()),
            },
            Err(e) => log::warn!("{}: {e}", self.source.name()),
        }

        match self.fallback {
            TitleFallback::UseUrl => Some(url.to_string()),
            TitleFallback::Skip => None,
        }
    }
}

/// Returns the hostname of an `http`/`https` URL, or `None` if `url` is not
/// one.
pub fn link_host(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    parsed
        .host_str()
        .filter(|host| !host.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl<S: MetadataSource> Resolve for LinkResolver<S> {
    async fn resolve(&self, url: &str) -> Option<String> {
        let Some(host) = link_host(url) else {
            log::debug!("not a linkable URL: {url}");
            return None;
        };

        let title = self.title_for(url).await?;
        Some(self.format.render(&title, url, &host))
    }
}
