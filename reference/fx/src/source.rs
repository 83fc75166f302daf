//! Rate sources and the snapshot shape they produce.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use remitroute_common::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FxError, FxResult};
use crate::table::RateTable;

/// Rates of every currency against a single base, as delivered by a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    /// Currency every rate is quoted against.
    pub base: Currency,
    /// Units of each currency per one unit of `base`.
    pub rates: BTreeMap<Currency, Decimal>,
    /// When the snapshot was produced.
    pub fetched_at: DateTime<Utc>,
    /// Name of the producing source.
    pub source: String,
}

/// On-disk document, mirroring the common `{ "base": .., "rates": {..} }`
/// shape served by public exchange-rate APIs.
#[derive(Debug, Deserialize)]
struct SnapshotDocument {
    #[serde(default)]
    base: Option<String>,
    rates: BTreeMap<String, Decimal>,
}

impl RateSnapshot {
    /// Create a snapshot stamped with the current time.
    pub fn new(
        base: Currency,
        rates: BTreeMap<Currency, Decimal>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            base,
            rates,
            fetched_at: Utc::now(),
            source: source.into(),
        }
    }

    /// Parse a snapshot document. A missing `base` means USD.
    pub fn from_json(json: &str, source: impl Into<String>) -> FxResult<Self> {
        let doc: SnapshotDocument = serde_json::from_str(json)?;
        if doc.rates.is_empty() {
            return Err(FxError::MalformedSnapshot("no rates".to_string()));
        }

        let base = doc.base.map(Currency::new).unwrap_or_else(Currency::usd);
        let rates = doc
            .rates
            .into_iter()
            .map(|(code, rate)| (Currency::new(code), rate))
            .collect();

        Ok(Self::new(base, rates, source))
    }

    /// Rate quoted for a currency.
    pub fn rate_for(&self, currency: &Currency) -> Option<Decimal> {
        self.rates.get(currency).copied()
    }

    /// Drop every currency outside the supported set.
    pub fn filtered_to_supported(mut self) -> Self {
        self.rates.retain(|currency, _| currency.is_supported());
        self
    }
}

/// Supplier of USD-quoted (or other base) rate snapshots.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Get the source name.
    fn name(&self) -> &str;

    /// Fetch a snapshot quoted against `base`.
    async fn fetch_snapshot(&self, base: &Currency) -> FxResult<RateSnapshot>;
}

/// Source that always returns the USD row of the static seed table.
///
/// This is the fallback the feed uses whenever the configured source fails.
#[derive(Debug, Clone, Default)]
pub struct StaticRateSource;

impl StaticRateSource {
    /// Create the static source.
    pub fn new() -> Self {
        Self
    }

    /// The fallback snapshot, available synchronously.
    pub fn snapshot(&self) -> RateSnapshot {
        let seed = RateTable::seeded();
        let rates = seed.row(&Currency::usd()).cloned().unwrap_or_default();
        RateSnapshot::new(Currency::usd(), rates, "STATIC")
    }
}

#[async_trait]
impl RateSource for StaticRateSource {
    fn name(&self) -> &str {
        "STATIC"
    }

    async fn fetch_snapshot(&self, base: &Currency) -> FxResult<RateSnapshot> {
        if *base != Currency::usd() {
            return Err(FxError::UnsupportedBase(base.clone()));
        }
        Ok(self.snapshot())
    }
}

/// Source that reads a snapshot document from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileRateSource {
    path: PathBuf,
    name: String,
}

impl JsonFileRateSource {
    /// Create a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("FILE:{}", path.display());
        Self { path, name }
    }
}

#[async_trait]
impl RateSource for JsonFileRateSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_snapshot(&self, base: &Currency) -> FxResult<RateSnapshot> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        let snapshot = RateSnapshot::from_json(&contents, self.name.clone())?;

        if snapshot.base != *base {
            return Err(FxError::UnsupportedBase(base.clone()));
        }

        debug!(
            source = %self.name,
            currencies = snapshot.rates.len(),
            "Loaded rate snapshot"
        );

        Ok(snapshot.filtered_to_supported())
    }
}

/// Mock rate source for testing.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockRateSource {
    name: String,
    snapshot: parking_lot::Mutex<Option<RateSnapshot>>,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockRateSource {
    /// Create a mock that fails until a snapshot is set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            snapshot: parking_lot::Mutex::new(None),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Serve this snapshot from now on.
    pub fn set_snapshot(&self, snapshot: RateSnapshot) {
        *self.snapshot.lock() = Some(snapshot);
    }

    /// Fail every fetch from now on.
    pub fn fail(&self) {
        *self.snapshot.lock() = None;
    }

    /// Number of fetches attempted.
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl RateSource for MockRateSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_snapshot(&self, _base: &Currency) -> FxResult<RateSnapshot> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.snapshot
            .lock()
            .clone()
            .ok_or_else(|| FxError::SourceUnavailable(self.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "remitroute-{}-{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_snapshot_from_json() {
        let snapshot = RateSnapshot::from_json(
            r#"{"base":"usd","date":"2024-05-01","rates":{"USD":1,"eur":"0.85","BRL":5.1}}"#,
            "TEST",
        )
        .unwrap();

        assert_eq!(snapshot.base, Currency::usd());
        assert_eq!(snapshot.rate_for(&Currency::eur()), Some(dec!(0.85)));
        assert_eq!(snapshot.rates.len(), 3);

        let filtered = snapshot.filtered_to_supported();
        assert_eq!(filtered.rates.len(), 2);
        assert!(filtered.rate_for(&Currency::new("BRL")).is_none());
    }

    #[test]
    fn test_snapshot_without_rates_is_malformed() {
        let result = RateSnapshot::from_json(r#"{"base":"USD","rates":{}}"#, "TEST");
        assert!(matches!(result, Err(FxError::MalformedSnapshot(_))));

        let result = RateSnapshot::from_json("not json", "TEST");
        assert!(matches!(result, Err(FxError::Json(_))));
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticRateSource::new();
        let snapshot = source.fetch_snapshot(&Currency::usd()).await.unwrap();

        assert_eq!(snapshot.rate_for(&Currency::usd()), Some(dec!(1)));
        assert_eq!(snapshot.rate_for(&Currency::eur()), Some(dec!(0.92)));
        assert_eq!(snapshot.rates.len(), 11);

        let result = source.fetch_snapshot(&Currency::eur()).await;
        assert!(matches!(result, Err(FxError::UnsupportedBase(_))));
    }

    #[tokio::test]
    async fn test_json_file_source() {
        let path = temp_file(
            "file-source",
            r#"{"base":"USD","rates":{"USD":1,"EUR":0.5,"XYZ":3}}"#,
        );
        let source = JsonFileRateSource::new(&path);

        let snapshot = source.fetch_snapshot(&Currency::usd()).await.unwrap();
        assert_eq!(snapshot.rate_for(&Currency::eur()), Some(dec!(0.5)));
        assert!(snapshot.rate_for(&Currency::new("XYZ")).is_none());
        assert!(source.name().starts_with("FILE:"));

        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn test_json_file_source_missing_file() {
        let source = JsonFileRateSource::new("/nonexistent/remitroute/rates.json");
        let result = source.fetch_snapshot(&Currency::usd()).await;
        assert!(matches!(result, Err(FxError::Io(_))));
    }

    #[tokio::test]
    async fn test_mock_source() {
        let source = MockRateSource::new("mock");
        assert!(source.fetch_snapshot(&Currency::usd()).await.is_err());

        source.set_snapshot(StaticRateSource::new().snapshot());
        assert!(source.fetch_snapshot(&Currency::usd()).await.is_ok());
        assert_eq!(source.calls(), 2);
    }
}
