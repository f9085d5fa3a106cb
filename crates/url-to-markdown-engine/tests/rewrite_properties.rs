//! Behaviour of the scanners and the rewriter on whole block texts.

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::sync::Mutex;
use url_to_markdown_engine::{
    Resolve, RewriteLimit, Span, rewrite_content, scan_formatted_links, scan_raw_urls,
};

/// Wraps every URL as `[T:<url>](<url>)` and records calls.
#[derive(Default)]
struct Recording {
    calls: Mutex<Vec<String>>,
    decline: Vec<&'static str>,
}

impl Recording {
    fn declining(urls: &[&'static str]) -> Self {
        Self {
            decline: urls.to_vec(),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Resolve for Recording {
    async fn resolve(&self, url: &str) -> Option<String> {
        self.calls.lock().unwrap().push(url.to_string());
        if self.decline.contains(&url) {
            return None;
        }
        Some(format!("[T:{url}]({url})"))
    }
}

const SAMPLES: &[&str] = &[
    "",
    "plain text",
    "Check out [Example Site](https://example.com) for more info",
    "![Logo](https://example.com/logo.png) and https://raw.example",
    "a https://one.example, b (https://two.example) c [x](https://three.example).",
    "naïve café https://ünïcode.example/päth?q=1 ok",
    "broken [link](https://x.example and https://y.example]",
    "[a](b)[c](d)![e](https://f.example)https://g.example",
];

#[test]
fn formatted_scanning_is_deterministic() {
    for text in SAMPLES {
        assert_eq!(scan_formatted_links(text), scan_formatted_links(text));
    }
}

#[test]
fn raw_spans_never_lie_inside_formatted_spans() {
    for text in SAMPLES {
        let formatted = scan_formatted_links(text);
        for raw in scan_raw_urls(text) {
            assert!(
                !formatted.iter().any(|f| f.span.contains(raw.span)),
                "{raw:?} inside a formatted link in {text:?}"
            );
        }
    }
}

#[test]
fn offsets_reextract_the_match() {
    for text in SAMPLES {
        for raw in scan_raw_urls(text) {
            assert_eq!(&text[raw.start()..raw.end()], raw.url);
        }
        for link in scan_formatted_links(text) {
            let slice = &text[link.start()..link.end()];
            assert!(slice.starts_with('[') || slice.starts_with("!["));
            assert!(slice.ends_with(')'));
            assert!(slice.contains(&link.url));
        }
    }
}

#[test]
fn spans_are_ordered_and_disjoint() {
    for text in SAMPLES {
        for spans in [scan_formatted_links(text), scan_raw_urls(text)] {
            for pair in spans.windows(2) {
                assert!(pair[0].end() <= pair[1].start(), "{pair:?} in {text:?}");
            }
        }
    }
}

#[test]
fn formatted_link_position() {
    let links = scan_formatted_links("Check out [Example Site](https://example.com) for more info");
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].url, "https://example.com");
    assert_eq!(links[0].title.as_deref(), Some("Example Site"));
    assert_eq!(links[0].span, Span { start: 10, end: 45 });
}

#[test]
fn image_link_starts_at_bang() {
    let text = "see ![Logo](https://example.com/logo.png)";
    let links = scan_formatted_links(text);
    assert_eq!(links[0].start(), 4);
    assert_eq!(&text[4..5], "!");
}

#[rstest]
#[case("Visit https://example.com, now.", "https://example.com", 6, 25)]
#[case("Is it https://example.com?", "https://example.com", 6, 25)]
#[case("Wow https://example.com/path!!", "https://example.com/path", 4, 28)]
#[case("List: https://example.com;", "https://example.com", 6, 25)]
fn trailing_punctuation_is_not_part_of_the_url(
    #[case] text: &str,
    #[case] url: &str,
    #[case] start: usize,
    #[case] end: usize,
) {
    let raw = scan_raw_urls(text);
    assert_eq!(raw.len(), 1);
    assert_eq!(raw[0].url, url);
    assert_eq!(raw[0].span, Span { start, end });
}

#[tokio::test]
async fn empty_input_is_not_an_error() {
    let resolver = Recording::default();
    assert!(scan_formatted_links("").is_empty());
    assert!(scan_raw_urls("").is_empty());
    assert_eq!(rewrite_content("", &resolver, RewriteLimit::All).await, "");
    assert!(resolver.calls().is_empty());
}

#[tokio::test]
async fn formatted_only_text_round_trips_without_resolving() {
    let text = "[a](https://a.example) and ![b](https://b.example/i.png)";
    let resolver = Recording::default();

    assert_eq!(rewrite_content(text, &resolver, RewriteLimit::All).await, text);
    assert!(resolver.calls().is_empty());
}

#[tokio::test]
async fn splices_back_to_front() {
    let text = "x https://a.example y https://b.example z";
    let resolver = Recording::default();

    let out = rewrite_content(text, &resolver, RewriteLimit::All).await;

    assert_eq!(
        out,
        "x [T:https://a.example](https://a.example) y [T:https://b.example](https://b.example) z"
    );
    assert_eq!(resolver.calls(), vec!["https://b.example", "https://a.example"]);
}

#[tokio::test]
async fn declined_urls_stay_raw() {
    let text = "x https://a.example y https://b.example z";
    let resolver = Recording::declining(&["https://b.example"]);

    let out = rewrite_content(text, &resolver, RewriteLimit::All).await;

    assert_eq!(
        out,
        "x [T:https://a.example](https://a.example) y https://b.example z"
    );
}

#[tokio::test]
async fn rewritten_text_has_no_raw_urls_left() {
    let text = "a https://one.example, b (https://two.example) c [x](https://three.example).";
    let resolver = Recording::default();

    let out = rewrite_content(text, &resolver, RewriteLimit::All).await;

    assert!(scan_raw_urls(&out).is_empty(), "{out}");
    assert_eq!(scan_formatted_links(&out).len(), 3);
}

#[tokio::test]
async fn first_only_converts_earliest_url() {
    let text = "https://a.example https://b.example";
    let resolver = Recording::default();

    let out = rewrite_content(text, &resolver, RewriteLimit::First(1)).await;

    assert_eq!(out, "[T:https://a.example](https://a.example) https://b.example");
    assert_eq!(resolver.calls(), vec!["https://a.example"]);
}
