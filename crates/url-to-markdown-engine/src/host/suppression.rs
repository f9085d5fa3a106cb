use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

use super::BlockId;

pub const DEFAULT_SUPPRESSION_WINDOW: Duration = Duration::from_secs(2);

/// Block ids processed within the last `window`.
#[derive(Debug)]
pub struct RecentlyProcessed {
    window: Duration,
    claimed: HashMap<BlockId, Instant>,
}

impl Default for RecentlyProcessed {
    fn default() -> Self {
        Self::new(DEFAULT_SUPPRESSION_WINDOW)
    }
}

impl RecentlyProcessed {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            claimed: HashMap::new(),
        }
    }

    /// Claims `id` for processing. Returns false while an earlier claim on
    /// the same id is still inside the window.
    pub fn try_claim(&mut self, id: &BlockId) -> bool {
        let now = Instant::now();
        let window = self.window;
        self.claimed
            .retain(|_, claimed_at| now.duration_since(*claimed_at) < window);

        if self.claimed.contains_key(id) {
            return false;
        }
        self.claimed.insert(id.clone(), now);
        true
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn second_claim_inside_window_is_refused() {
        let mut recent = RecentlyProcessed::default();
        let id = BlockId::from("a");

        assert!(recent.try_claim(&id));
        assert!(!recent.try_claim(&id));

        tokio::time::advance(Duration::from_millis(1999)).await;
        assert!(!recent.try_claim(&id));
    }

    #[tokio::test(start_paused = true)]
    async fn claim_expires_after_window() {
        let mut recent = RecentlyProcessed::new(Duration::from_millis(500));
        let id = BlockId::from("a");

        assert!(recent.try_claim(&id));
        tokio::time::advance(Duration::from_millis(500)).await;
        assert!(recent.try_claim(&id));
    }

    #[tokio::test(start_paused = true)]
    async fn ids_are_independent() {
        let mut recent = RecentlyProcessed::default();
        assert!(recent.try_claim(&BlockId::from("a")));
        assert!(recent.try_claim(&BlockId::from("b")));
        assert_eq!(recent.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entries_are_purged() {
        let mut recent = RecentlyProcessed::new(Duration::from_secs(1));
        recent.try_claim(&BlockId::from("a"));
        recent.try_claim(&BlockId::from("b"));

        tokio::time::advance(Duration::from_secs(2)).await;
        recent.try_claim(&BlockId::from("c"));
        assert_eq!(recent.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_window_never_suppresses() {
        let mut recent = RecentlyProcessed::new(Duration::ZERO);
        let id = BlockId::from("a");
        assert!(recent.try_claim(&id));
        assert!(recent.try_claim(&id));
    }
}
