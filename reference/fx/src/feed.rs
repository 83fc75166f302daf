//! Rate feed: keeps the rate book supplied from a rate source.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::book::RateBook;
use crate::cache::SnapshotCache;
use crate::config::FeedConfig;
use crate::metrics::{FeedStats, FeedStatsSnapshot};
use crate::source::{RateSnapshot, RateSource, StaticRateSource};

/// Where the snapshot applied by a refresh came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOrigin {
    /// Still-fresh cached snapshot.
    Cache,
    /// Freshly fetched from the configured source.
    Source,
    /// Static fallback after the source failed.
    Fallback,
}

/// Result of one refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub origin: SnapshotOrigin,
    /// Whether the rate book was rebuilt.
    pub applied: bool,
}

/// Feeds snapshots from a [`RateSource`] into a [`RateBook`].
///
/// Fetch failures never propagate: the feed logs them and applies the
/// static fallback snapshot instead.
pub struct RateFeed {
    source: Arc<dyn RateSource>,
    fallback: StaticRateSource,
    cache: SnapshotCache,
    book: RateBook,
    stats: FeedStats,
    config: FeedConfig,
}

impl RateFeed {
    /// Create a feed writing into `book`.
    pub fn new(source: Arc<dyn RateSource>, book: RateBook, config: FeedConfig) -> Self {
        Self {
            source,
            fallback: StaticRateSource::new(),
            cache: SnapshotCache::with_ttl(config.cache_ttl),
            book,
            stats: FeedStats::new(),
            config,
        }
    }

    /// The book this feed writes into.
    pub fn book(&self) -> &RateBook {
        &self.book
    }

    /// Refresh the rate book.
    ///
    /// Unless `force` is set, a fresh cached snapshot is reused instead of
    /// contacting the source.
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn refresh(&self, force: bool) -> RefreshOutcome {
        self.stats.refresh_requested();

        if !force {
            if let Some(cached) = self.cache.get(&self.config.base) {
                self.stats.cache_hit();
                debug!("Using cached snapshot");
                return self.apply(&cached, SnapshotOrigin::Cache);
            }
        }

        self.stats.fetch_attempted();
        match self.source.fetch_snapshot(&self.config.base).await {
            Ok(snapshot) => {
                self.cache.insert(snapshot.clone());
                self.apply(&snapshot, SnapshotOrigin::Source)
            }
            Err(e) => {
                warn!(error = %e, "Rate source failed, using static rates");
                self.stats.fell_back();
                let fallback = self.fallback.snapshot();
                self.apply(&fallback, SnapshotOrigin::Fallback)
            }
        }
    }

    /// Whether the cached snapshot is missing or stale.
    pub fn needs_refresh(&self) -> bool {
        self.cache.get(&self.config.base).is_none()
    }

    /// Periodically refresh whenever the cached snapshot has expired.
    pub async fn run_refresh_loop(&self) {
        loop {
            tokio::time::sleep(self.config.check_interval).await;
            if self.needs_refresh() {
                self.refresh(true).await;
            }
        }
    }

    /// Spawn [`run_refresh_loop`](Self::run_refresh_loop) on the runtime.
    pub fn spawn_refresh_loop(self: &Arc<Self>) -> JoinHandle<()> {
        let feed = self.clone();
        info!(
            interval_secs = feed.config.check_interval.as_secs(),
            "Starting rate refresh loop"
        );
        tokio::spawn(async move {
            feed.run_refresh_loop().await;
        })
    }

    /// Feed statistics.
    pub fn stats(&self) -> FeedStatsSnapshot {
        self.stats.snapshot()
    }

    fn apply(&self, snapshot: &RateSnapshot, origin: SnapshotOrigin) -> RefreshOutcome {
        let applied = self.book.rebuild(snapshot);
        self.stats.snapshot_applied(applied);
        RefreshOutcome { origin, applied }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MockRateSource;
    use remitroute_common::Currency;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    fn usd_snapshot(eur: Decimal) -> RateSnapshot {
        RateSnapshot::new(
            Currency::usd(),
            [(Currency::usd(), dec!(1)), (Currency::eur(), eur)].into_iter().collect(),
            "MOCK",
        )
    }

    fn setup_feed(source: Arc<MockRateSource>, config: FeedConfig) -> RateFeed {
        RateFeed::new(source, RateBook::seeded(), config)
    }

    #[tokio::test]
    async fn test_refresh_from_source() {
        let source = Arc::new(MockRateSource::new("mock"));
        source.set_snapshot(usd_snapshot(dec!(0.85)));
        let feed = setup_feed(source.clone(), FeedConfig::default());

        let outcome = feed.refresh(false).await;

        assert_eq!(outcome, RefreshOutcome { origin: SnapshotOrigin::Source, applied: true });
        assert_eq!(
            feed.book().convert(dec!(100), &Currency::usd(), &Currency::eur()),
            dec!(85)
        );
    }

    #[tokio::test]
    async fn test_cache_hit_skips_source() {
        let source = Arc::new(MockRateSource::new("mock"));
        source.set_snapshot(usd_snapshot(dec!(0.85)));
        let feed = setup_feed(source.clone(), FeedConfig::default());

        feed.refresh(false).await;
        let outcome = feed.refresh(false).await;

        assert_eq!(outcome.origin, SnapshotOrigin::Cache);
        assert_eq!(source.calls(), 1);
        assert_eq!(feed.stats().cache_hits, 1);

        // Forcing bypasses the cache.
        feed.refresh(true).await;
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_source_failure_falls_back_to_static() {
        let source = Arc::new(MockRateSource::new("mock"));
        let feed = setup_feed(source.clone(), FeedConfig::default());

        let outcome = feed.refresh(false).await;

        assert_eq!(outcome, RefreshOutcome { origin: SnapshotOrigin::Fallback, applied: true });
        assert_eq!(feed.stats().fallbacks, 1);
        // Static USD row rebuilt into a consistent matrix.
        assert_eq!(
            feed.book().convert(dec!(100), &Currency::usd(), &Currency::eur()),
            dec!(92)
        );
        // Fallback snapshots are not cached.
        assert!(feed.needs_refresh());
    }

    #[tokio::test]
    async fn test_snapshot_without_usd_keeps_previous_table() {
        let source = Arc::new(MockRateSource::new("mock"));
        source.set_snapshot(RateSnapshot::new(
            Currency::usd(),
            [(Currency::eur(), dec!(0.5))].into_iter().collect(),
            "MOCK",
        ));
        let feed = setup_feed(source, FeedConfig::default());

        let outcome = feed.refresh(false).await;

        assert!(!outcome.applied);
        assert_eq!(feed.stats().skipped, 1);
        assert_eq!(
            feed.book().current().rate(&Currency::usd(), &Currency::eur()),
            dec!(0.92)
        );
    }

    #[tokio::test]
    async fn test_refresh_loop_refetches_expired_snapshot() {
        let source = Arc::new(MockRateSource::new("mock"));
        source.set_snapshot(usd_snapshot(dec!(0.85)));
        let config = FeedConfig {
            cache_ttl: chrono::Duration::milliseconds(5),
            check_interval: Duration::from_millis(10),
            ..Default::default()
        };
        let feed = Arc::new(setup_feed(source.clone(), config));

        let handle = feed.spawn_refresh_loop();
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();

        assert!(source.calls() >= 2);
        assert!(feed.stats().applied >= 2);
    }
}
