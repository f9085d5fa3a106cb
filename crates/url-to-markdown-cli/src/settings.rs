//! Maps persisted settings onto engine types.

use anyhow::Result;
use url_to_markdown_config::{FaviconPosition, MetadataSourceKind, Settings, TitleFallback};
use url_to_markdown_engine::{
    FaviconStyle, HtmlTitleSource, LinkFormat, LinkResolver, MetadataSource, MicrolinkSource,
    RewriteLimit, http_client, markdown, resolver,
};

pub type DynResolver = LinkResolver<Box<dyn MetadataSource>>;

pub fn link_format(settings: &Settings) -> LinkFormat {
    if !settings.enable_favicons {
        return LinkFormat::plain();
    }
    LinkFormat::with_favicon(FaviconStyle {
        size: settings.favicon_size,
        position: match settings.favicon_position {
            FaviconPosition::Before => markdown::FaviconPosition::Before,
            FaviconPosition::After => markdown::FaviconPosition::After,
        },
    })
}

pub fn title_fallback(settings: &Settings) -> resolver::TitleFallback {
    match settings.title_fallback {
        TitleFallback::UseUrl => resolver::TitleFallback::UseUrl,
        TitleFallback::Skip => resolver::TitleFallback::Skip,
    }
}

/// `--first-only` wins over the configured per-block maximum.
pub fn rewrite_limit(settings: &Settings, first_only: bool) -> RewriteLimit {
    if first_only {
        return RewriteLimit::First(1);
    }
    match settings.max_urls_per_block {
        Some(n) => RewriteLimit::First(n),
        None => RewriteLimit::All,
    }
}

pub fn build_resolver(settings: &Settings) -> Result<DynResolver> {
    let client = http_client(settings.request_timeout())?;
    let source: Box<dyn MetadataSource> = match settings.metadata_source {
        MetadataSourceKind::Microlink => Box::new(MicrolinkSource::new(client)),
        MetadataSourceKind::Html => Box::new(HtmlTitleSource::new(client)),
    };
    log::debug!("using {} metadata source", source.name());

    Ok(LinkResolver::new(
        source,
        link_format(settings),
        title_fallback(settings),
    ))
}
