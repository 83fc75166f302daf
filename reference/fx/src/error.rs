//! FX error types.

use remitroute_common::Currency;
use thiserror::Error;

/// Errors that can occur while obtaining rate snapshots.
///
/// None of these reach the route engine: the feed logs them and falls back
/// to the static snapshot.
#[derive(Debug, Error)]
pub enum FxError {
    /// Rate source could not produce a snapshot.
    #[error("Rate source unavailable: {0}")]
    SourceUnavailable(String),

    /// Source does not quote the requested base currency.
    #[error("Rate source does not quote base {0}")]
    UnsupportedBase(Currency),

    /// Snapshot document is structurally invalid.
    #[error("Malformed rate snapshot: {0}")]
    MalformedSnapshot(String),

    /// Snapshot file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot JSON could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for FX operations.
pub type FxResult<T> = Result<T, FxError>;
