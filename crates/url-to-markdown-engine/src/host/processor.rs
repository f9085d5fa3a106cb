use std::sync::Mutex;
use std::time::Duration;

use super::{BlockChange, BlockId, BlockStore, RecentlyProcessed};
use crate::rewrite::{Resolve, RewriteLimit, rewrite_content_detailed};

/// Tally of one [`BlockProcessor::process_changes`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessReport {
    /// Blocks written back with converted links.
    pub updated: usize,
    /// Blocks whose rewrite produced identical text.
    pub unchanged: usize,
    /// Changes ignored because the block was processed moments ago.
    pub suppressed: usize,
    /// Blocks that could not be read or written.
    pub failed: usize,
}

impl ProcessReport {
    pub fn total(&self) -> usize {
        self.updated + self.unchanged + self.suppressed + self.failed
    }
}

enum BlockOutcome {
    Updated,
    Unchanged,
    Failed,
}

/// Runs the rewriter over changed blocks and writes results back.
pub struct BlockProcessor<S, R> {
    store: S,
    resolver: R,
    limit: RewriteLimit,
    recent: Mutex<RecentlyProcessed>,
}

impl<S: BlockStore, R: Resolve> BlockProcessor<S, R> {
    pub fn new(store: S, resolver: R) -> Self {
        Self {
            store,
            resolver,
            limit: RewriteLimit::All,
            recent: Mutex::new(RecentlyProcessed::default()),
        }
    }

    pub fn with_limit(mut self, limit: RewriteLimit) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_suppression_window(mut self, window: Duration) -> Self {
        self.recent = Mutex::new(RecentlyProcessed::new(window));
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Processes each change in order. Failures on one block are logged and
    /// counted; the remaining changes are still processed.
    pub async fn process_changes(&self, changes: &[BlockChange]) -> ProcessReport {
        let mut report = ProcessReport::default();

        for change in changes {
            if !self.claim(&change.block_id) {
                log::debug!("suppressing change for block {}", change.block_id);
                report.suppressed += 1;
                continue;
            }

            match self.process_block(&change.block_id).await {
                BlockOutcome::Updated => report.updated += 1,
                BlockOutcome::Unchanged => report.unchanged += 1,
                BlockOutcome::Failed => report.failed += 1,
            }
        }

        report
    }

    fn claim(&self, id: &BlockId) -> bool {
        match self.recent.lock() {
            Ok(mut recent) => recent.try_claim(id),
            Err(poisoned) => poisoned.into_inner().try_claim(id),
        }
    }

    async fn process_block(&self, id: &BlockId) -> BlockOutcome {
        let Some(content) = self.store.get_block_content(id).await else {
            log::warn!("block {id} disappeared before processing");
            return BlockOutcome::Failed;
        };

        let outcome = rewrite_content_detailed(&content, &self.resolver, self.limit).await;
        if outcome.text == content {
            return BlockOutcome::Unchanged;
        }

        match self.store.update_block_content(id, &outcome.text).await {
            Ok(()) => {
                log::info!(
                    "block {id}: converted {} URL(s), left {}",
                    outcome.replaced,
                    outcome.skipped
                );
                BlockOutcome::Updated
            }
            Err(e) => {
                log::warn!("failed to update block {id}: {e}");
                BlockOutcome::Failed
            }
        }
    }
}
