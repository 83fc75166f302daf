//! RemitRoute FX
//!
//! Cross-rate table and the adapter that keeps it fed from a USD-quoted
//! rate source.
//!
//! # Features
//!
//! - Static seed rate matrix, always available
//! - Wholesale rebuild of the matrix from one USD-anchored snapshot
//! - Copy-on-write [`RateBook`] handle shared between readers and the feed
//! - Snapshot caching with a configurable TTL and silent fallback
//!
//! # Example
//!
//! ```rust,ignore
//! use remitroute_fx::{RateBook, RateFeed, FeedConfig, JsonFileRateSource};
//!
//! let book = RateBook::seeded();
//! let feed = RateFeed::new(Arc::new(JsonFileRateSource::new("rates.json")), book.clone(), FeedConfig::default());
//! feed.refresh(false).await;
//!
//! let eur = book.convert(dec!(100), &Currency::usd(), &Currency::eur());
//! ```

pub mod table;
pub mod book;
pub mod source;
pub mod cache;
pub mod feed;
pub mod config;
pub mod metrics;
pub mod error;

pub use table::RateTable;
pub use book::RateBook;
pub use source::{JsonFileRateSource, RateSnapshot, RateSource, StaticRateSource};
pub use cache::SnapshotCache;
pub use feed::{RateFeed, RefreshOutcome, SnapshotOrigin};
pub use config::FeedConfig;
pub use metrics::{FeedStats, FeedStatsSnapshot};
pub use error::FxError;
