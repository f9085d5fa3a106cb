use super::{
    cursor::Cursor,
    kinds::MarkdownLink,
    span::{Span, UrlSpan},
};

/// Finds every markdown link `[label](target)` and image `![label](target)`.
///
/// Labels run up to the first `]` and targets up to the first `)`; either may
/// be empty and targets are not validated, since the result only marks text
/// that must not be linked again. Matches are non-overlapping and reported
/// left to right. An image span starts at its `!`.
pub fn scan_formatted_links(s: &str) -> Vec<UrlSpan> {
    let mut cur = Cursor::new(s);
    let mut out = vec![];

    while !cur.eof() {
        if let Some(link) = try_parse_link(&mut cur) {
            out.push(link);
            continue;
        }
        cur.bump();
    }

    out
}

/// Attempts to parse a link or image starting at the current position.
///
/// On failure, cursor position is restored.
fn try_parse_link(cur: &mut Cursor<'_>) -> Option<UrlSpan> {
    let saved = cur.clone();
    let start = cur.pos();

    cur.eat(MarkdownLink::IMAGE);
    if !cur.eat(MarkdownLink::LABEL_OPEN) {
        *cur = saved;
        return None;
    }

    let label_start = cur.pos();
    if !cur.skip_until(MarkdownLink::LABEL_CLOSE) {
        *cur = saved;
        return None;
    }
    let label_end = cur.pos();
    cur.bump(); // ]

    if !cur.eat(MarkdownLink::TARGET_OPEN) {
        *cur = saved;
        return None;
    }

    let target_start = cur.pos();
    if !cur.skip_until(MarkdownLink::TARGET_CLOSE) {
        *cur = saved;
        return None;
    }
    let target_end = cur.pos();
    cur.bump(); // )

    Some(UrlSpan::formatted(
        &cur.s[target_start..target_end],
        &cur.s[label_start..label_end],
        Span {
            start,
            end: cur.pos(),
        },
    ))
}
