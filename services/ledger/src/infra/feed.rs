use tokio::sync::broadcast;

use crate::domain::repository::ShotObserver;
use crate::domain::types::Shot;

/// Per-subscriber buffer. Slow readers skip ahead instead of blocking writers.
pub const SHOT_FEED_CAPACITY: usize = 64;

/// In-process fan-out of recorded shots.
#[derive(Clone)]
pub struct ShotFeed {
    tx: broadcast::Sender<Shot>,
}

impl ShotFeed {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Shot> {
        self.tx.subscribe()
    }
}

impl Default for ShotFeed {
    fn default() -> Self {
        Self::new(SHOT_FEED_CAPACITY)
    }
}

impl ShotObserver for ShotFeed {
    fn shot_recorded(&self, shot: &Shot) {
        // No subscribers is the common case and not an error.
        let _ = self.tx.send(shot.clone());
    }
}
