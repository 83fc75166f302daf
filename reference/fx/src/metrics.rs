//! Counters describing rate feed activity.

use std::sync::atomic::{AtomicU64, Ordering};

/// Rate feed counters.
#[derive(Debug, Default)]
pub struct FeedStats {
    /// Refreshes requested.
    pub refreshes: AtomicU64,
    /// Refreshes answered from the snapshot cache.
    pub cache_hits: AtomicU64,
    /// Fetches sent to the configured source.
    pub fetches: AtomicU64,
    /// Fetches that failed and fell back to the static snapshot.
    pub fallbacks: AtomicU64,
    /// Snapshots applied to the rate book.
    pub applied: AtomicU64,
    /// Snapshots rejected as unusable (no USD rate, or overflowing rates).
    pub skipped: AtomicU64,
}

impl FeedStats {
    /// Create zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh_requested(&self) {
        self.refreshes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn fetch_attempted(&self) {
        self.fetches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn fell_back(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record whether a snapshot made it into the rate book.
    pub fn snapshot_applied(&self, applied: bool) {
        if applied {
            self.applied.fetch_add(1, Ordering::Relaxed);
        } else {
            self.skipped.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Point-in-time copy of all counters.
    pub fn snapshot(&self) -> FeedStatsSnapshot {
        FeedStatsSnapshot {
            refreshes: self.refreshes.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            fetches: self.fetches.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
            applied: self.applied.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
        }
    }
}

/// Plain copy of [`FeedStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeedStatsSnapshot {
    pub refreshes: u64,
    pub cache_hits: u64,
    pub fetches: u64,
    pub fallbacks: u64,
    pub applied: u64,
    pub skipped: u64,
}
