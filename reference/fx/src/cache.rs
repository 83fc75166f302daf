//! Rate snapshot caching with TTL support.

use chrono::Duration;
use dashmap::DashMap;
use remitroute_common::{constants, expires_in, is_expired, Currency, Timestamp};
use tracing::debug;

use crate::source::RateSnapshot;

/// Cached snapshot entry.
#[derive(Debug, Clone)]
struct CacheEntry {
    snapshot: RateSnapshot,
    expires_at: Timestamp,
}

impl CacheEntry {
    fn new(snapshot: RateSnapshot, ttl: Duration) -> Self {
        Self {
            snapshot,
            expires_at: expires_in(ttl),
        }
    }

    fn is_valid(&self) -> bool {
        !is_expired(self.expires_at)
    }
}

/// Snapshot cache keyed by base currency.
pub struct SnapshotCache {
    cache: DashMap<Currency, CacheEntry>,
    ttl: Duration,
}

impl SnapshotCache {
    /// Create a cache with the default 24 hour TTL.
    pub fn new() -> Self {
        Self::with_ttl(constants::rate_cache_ttl())
    }

    /// Create a cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            cache: DashMap::new(),
            ttl,
        }
    }

    /// Get a snapshot from cache if still fresh.
    pub fn get(&self, base: &Currency) -> Option<RateSnapshot> {
        if let Some(entry) = self.cache.get(base) {
            if entry.is_valid() {
                debug!(base = %base, "Snapshot cache hit");
                return Some(entry.snapshot.clone());
            }
            debug!(base = %base, "Snapshot cache entry expired");
            drop(entry);
            self.cache.remove(base);
        }

        None
    }

    /// Insert a snapshot under its base currency.
    pub fn insert(&self, snapshot: RateSnapshot) {
        let base = snapshot.base.clone();
        self.cache.insert(base, CacheEntry::new(snapshot, self.ttl));
    }

    /// Get the number of entries in cache.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new()
    }
}
