//! # Host Integration
//!
//! The outliner side of the pipeline: a feed of changed blocks, a store to
//! read and write block content, and a processor that runs the rewriter over
//! each change.
//!
//! Writing a block back makes the host emit another change for it. The
//! processor ignores repeat changes for a block inside a short window (see
//! [`RecentlyProcessed`]) so it never reacts to its own writes.

mod processor;
mod suppression;

pub use processor::{BlockProcessor, ProcessReport};
pub use suppression::{DEFAULT_SUPPRESSION_WINDOW, RecentlyProcessed};

use async_trait::async_trait;
use std::fmt;
use uuid::Uuid;

/// Identifier of a block in the host outline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub String);

impl BlockId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for BlockId {
    fn from(id: Uuid) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of the host's change feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockChange {
    pub block_id: BlockId,
    pub content: String,
}

impl BlockChange {
    pub fn new(block_id: impl Into<BlockId>, content: impl Into<String>) -> Self {
        Self {
            block_id: block_id.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Block not found: {0}")]
    NotFound(BlockId),
    #[error("Block content must be a single line: {0}")]
    MultiLine(BlockId),
    #[error("Block store unavailable: {0}")]
    Unavailable(String),
}

/// Block access provided by the host.
#[async_trait]
pub trait BlockStore: Send + Sync {
    async fn get_block_content(&self, id: &BlockId) -> Option<String>;

    async fn update_block_content(&self, id: &BlockId, content: &str) -> Result<(), StoreError>;
}
