//! Markdown produced for a resolved URL.
//!
//! A plain link is `[title](url)`. With a favicon the image and the link are
//! joined by exactly two spaces, image first or last depending on
//! [`FaviconPosition`].

const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";
const FRAGMENT_SEPARATOR: &str = "  ";

/// Where the favicon image goes relative to the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaviconPosition {
    #[default]
    Before,
    After,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaviconStyle {
    /// Requested icon edge length in pixels.
    pub size: u32,
    pub position: FaviconPosition,
}

impl Default for FaviconStyle {
    fn default() -> Self {
        Self {
            size: 16,
            position: FaviconPosition::Before,
        }
    }
}

/// Rendering options for a resolved link. `favicon: None` disables icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkFormat {
    pub favicon: Option<FaviconStyle>,
}

impl LinkFormat {
    pub fn plain() -> Self {
        Self { favicon: None }
    }

    pub fn with_favicon(style: FaviconStyle) -> Self {
        Self {
            favicon: Some(style),
        }
    }

    /// Renders the replacement markdown for `url`, whose hostname is `host`.
    pub fn render(&self, title: &str, url: &str, host: &str) -> String {
        let link = link(title, url);
        let Some(style) = self.favicon else {
            return link;
        };

        let icon = image(&favicon_alt(host), &favicon_url(host, style.size));
        match style.position {
            FaviconPosition::Before => format!("{icon}{FRAGMENT_SEPARATOR}{link}"),
            FaviconPosition::After => format!("{link}{FRAGMENT_SEPARATOR}{icon}"),
        }
    }
}

pub fn favicon_url(host: &str, size: u32) -> String {
    format!("{FAVICON_SERVICE}?domain={host}&sz={size}")
}

pub fn favicon_alt(host: &str) -> String {
    format!("{host}-favicon")
}

/// `[title](url)` with the title normalised by [`clean_title`].
pub fn link(title: &str, url: &str) -> String {
    format!("[{}]({url})", clean_title(title))
}

pub fn image(alt: &str, url: &str) -> String {
    format!("![{alt}]({url})")
}

/// Makes a fetched title safe to use as a link label.
///
/// Whitespace runs (including newlines) collapse to one space, and square
/// brackets become parentheses. A label containing `]` would end the link
/// early and leave its URL looking raw to the scanner.
pub fn clean_title(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('[', "(")
        .replace(']', ")")
}
