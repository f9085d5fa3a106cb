//! # Outline Documents
//!
//! A markdown outline file viewed as a list of blocks, backed by an
//! `xi_rope::Rope`. Every non-blank line is one block; its content excludes
//! indentation and the list marker, so rewriting a block never touches the
//! outline structure around it.
//!
//! Block ids are assigned at load and live as long as the document.
//!
//! Lines are not interpreted as markdown: lines inside fenced code blocks
//! are blocks too, and their URLs get converted like any other.

use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};
use xi_rope::{Delta, Interval, Rope, RopeInfo};

use crate::host::{BlockChange, BlockId, BlockStore, StoreError};
use crate::scanning::Span;

const LIST_MARKERS: [char; 3] = ['-', '*', '+'];

#[derive(Debug, Clone)]
struct Block {
    id: BlockId,
    /// Byte span of the content within the rope.
    content: Span,
}

#[derive(Debug, Clone)]
pub struct OutlineDocument {
    rope: Rope,
    blocks: Vec<Block>,
    dirty: bool,
}

impl OutlineDocument {
    pub fn parse(text: &str) -> Self {
        let rope = Rope::from(text);
        let blocks = block_spans(&rope)
            .into_iter()
            .map(|content| Block {
                id: BlockId::new(),
                content,
            })
            .collect();

        Self {
            rope,
            blocks,
            dirty: false,
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Ids of all blocks in document order.
    pub fn block_ids(&self) -> Vec<BlockId> {
        self.blocks.iter().map(|b| b.id.clone()).collect()
    }

    /// One change per block, as if each had just been edited.
    pub fn changes(&self) -> Vec<BlockChange> {
        self.blocks
            .iter()
            .map(|b| BlockChange {
                block_id: b.id.clone(),
                content: self.slice(b.content),
            })
            .collect()
    }

    pub fn content(&self, id: &BlockId) -> Option<String> {
        self.find(id).map(|i| self.slice(self.blocks[i].content))
    }

    /// Replaces the content of block `id`, leaving its indentation and
    /// marker in place.
    pub fn replace_content(&mut self, id: &BlockId, new: &str) -> Result<(), StoreError> {
        if new.contains(['\n', '\r']) {
            return Err(StoreError::MultiLine(id.clone()));
        }
        let index = self
            .find(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        let old = self.blocks[index].content;
        let delta: Delta<RopeInfo> = Delta::simple_edit(
            Interval::new(old.start, old.end),
            Rope::from(new),
            self.rope.len(),
        );
        self.rope = delta.apply(&self.rope);

        let new_end = old.start + new.len();
        self.blocks[index].content = Span {
            start: old.start,
            end: new_end,
        };
        for later in &mut self.blocks[index + 1..] {
            later.content = shift(later.content, old.end, new_end);
        }

        self.dirty = true;
        Ok(())
    }

    /// The full document text, including any edits.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Whether any block was replaced since load.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn find(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    fn slice(&self, sp: Span) -> String {
        self.rope.slice_to_cow(sp.start..sp.end).into_owned()
    }
}

/// Moves a span that starts at or after `old_end` by the edit's size change.
fn shift(sp: Span, old_end: usize, new_end: usize) -> Span {
    // offset >= old_end, so this never underflows
    let moved = |offset: usize| offset + new_end - old_end;
    Span {
        start: moved(sp.start),
        end: moved(sp.end),
    }
}

/// Content spans of every non-blank line.
fn block_spans(rope: &Rope) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut offset = 0usize;

    for line in rope.lines_raw(..) {
        let line_start = offset;
        offset += line.len();

        let body = line.trim_end_matches(['\n', '\r']);
        if body.trim().is_empty() {
            continue;
        }

        let content = strip_marker(body.trim_start());
        let start = line_start + (body.len() - content.len());
        spans.push(Span {
            start,
            end: line_start + body.len(),
        });
    }

    spans
}

/// `- item` -> `item`; lines without a marker are returned as is.
fn strip_marker(line: &str) -> &str {
    let Some(rest) = line.strip_prefix(LIST_MARKERS) else {
        return line;
    };
    if rest.is_empty() {
        rest
    } else if let Some(content) = rest.strip_prefix(' ') {
        content
    } else {
        line
    }
}

/// An [`OutlineDocument`] shared between the processor and its owner.
#[derive(Debug)]
pub struct SharedOutline {
    doc: Mutex<OutlineDocument>,
}

impl SharedOutline {
    pub fn new(doc: OutlineDocument) -> Self {
        Self {
            doc: Mutex::new(doc),
        }
    }

    pub fn parse(text: &str) -> Self {
        Self::new(OutlineDocument::parse(text))
    }

    pub fn changes(&self) -> Result<Vec<BlockChange>, StoreError> {
        Ok(self.lock()?.changes())
    }

    pub fn snapshot(&self) -> Result<OutlineDocument, StoreError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, OutlineDocument>, StoreError> {
        self.doc
            .lock()
            .map_err(|_| StoreError::Unavailable("outline lock poisoned".to_string()))
    }
}

#[async_trait]
impl BlockStore for SharedOutline {
    async fn get_block_content(&self, id: &BlockId) -> Option<String> {
        self.lock().ok()?.content(id)
    }

    async fn update_block_content(&self, id: &BlockId, content: &str) -> Result<(), StoreError> {
        self.lock()?.replace_content(id, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const OUTLINE: &str = "- First https://a.example\n  - Child\n\n* Star item\nplain line\n";

    fn contents(doc: &OutlineDocument) -> Vec<String> {
        doc.changes().into_iter().map(|c| c.content).collect()
    }

    #[test]
    fn blocks_exclude_markers_and_indentation() {
        let doc = OutlineDocument::parse(OUTLINE);
        assert_eq!(
            contents(&doc),
            vec!["First https://a.example", "Child", "Star item", "plain line"]
        );
    }

    #[test]
    fn blank_lines_are_not_blocks() {
        let doc = OutlineDocument::parse("\n   \n- a\n\t\n");
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn empty_document() {
        let doc = OutlineDocument::parse("");
        assert!(doc.is_empty());
        assert_eq!(doc.text(), "");
    }

    #[test]
    fn crlf_line_endings() {
        let doc = OutlineDocument::parse("- one\r\n- two\r\n");
        assert_eq!(contents(&doc), vec!["one", "two"]);
    }

    #[test]
    fn marker_without_space_is_content() {
        let doc = OutlineDocument::parse("-dash\n-\n+ plus\n");
        assert_eq!(contents(&doc), vec!["-dash", "", "plus"]);
    }

    #[test]
    fn fenced_code_lines_are_blocks() {
        let doc = OutlineDocument::parse("- notes\n```\nhttps://x.example\n```\n");
        assert_eq!(
            contents(&doc),
            vec!["notes", "```", "https://x.example", "```"]
        );
    }

    #[test]
    fn unchanged_document_round_trips() {
        let doc = OutlineDocument::parse(OUTLINE);
        assert_eq!(doc.text(), OUTLINE);
        assert!(!doc.is_dirty());
    }

    #[test]
    fn replace_grows_and_shifts_later_blocks() {
        let mut doc = OutlineDocument::parse(OUTLINE);
        let ids = doc.block_ids();

        doc.replace_content(&ids[0], "First [A](https://a.example)")
            .unwrap();

        assert_eq!(
            doc.text(),
            "- First [A](https://a.example)\n  - Child\n\n* Star item\nplain line\n"
        );
        assert_eq!(doc.content(&ids[1]).as_deref(), Some("Child"));
        assert_eq!(doc.content(&ids[3]).as_deref(), Some("plain line"));
        assert!(doc.is_dirty());
    }

    #[test]
    fn replace_shrinks_and_shifts_later_blocks() {
        let mut doc = OutlineDocument::parse("- a long block\n- next\n");
        let ids = doc.block_ids();

        doc.replace_content(&ids[0], "x").unwrap();
        doc.replace_content(&ids[1], "next!").unwrap();

        assert_eq!(doc.text(), "- x\n- next!\n");
    }

    #[test]
    fn replace_with_multibyte_content() {
        let mut doc = OutlineDocument::parse("- café\n- b\n");
        let ids = doc.block_ids();

        doc.replace_content(&ids[0], "naïve café").unwrap();
        doc.replace_content(&ids[1], "ü").unwrap();

        assert_eq!(doc.text(), "- naïve café\n- ü\n");
    }

    #[test]
    fn replace_rejects_newlines() {
        let mut doc = OutlineDocument::parse("- a\n");
        let id = doc.block_ids().remove(0);

        let err = doc.replace_content(&id, "two\nlines").unwrap_err();
        assert!(matches!(err, StoreError::MultiLine(_)));
        assert_eq!(doc.text(), "- a\n");
    }

    #[test]
    fn replace_unknown_block() {
        let mut doc = OutlineDocument::parse("- a\n");
        let err = doc.replace_content(&BlockId::from("nope"), "b").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn shared_outline_is_a_block_store() {
        let outline = SharedOutline::parse("- see https://example.com\n");
        let change = outline.changes().unwrap().remove(0);

        assert_eq!(
            outline.get_block_content(&change.block_id).await.as_deref(),
            Some("see https://example.com")
        );
        outline
            .update_block_content(&change.block_id, "see [Example](https://example.com)")
            .await
            .unwrap();

        assert_eq!(
            outline.snapshot().unwrap().text(),
            "- see [Example](https://example.com)\n"
        );
    }
}
