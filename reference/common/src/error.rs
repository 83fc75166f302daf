//! Error types for RemitRoute.

use thiserror::Error;

use crate::Currency;

/// Errors raised at the caller-facing edge of RemitRoute.
///
/// The route engine itself never fails; these cover input validation done
/// by front-ends and configuration loading.
#[derive(Error, Debug)]
pub enum RemitRouteError {
    /// Transfer amount is zero, negative or unparsable.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Source and destination currency are the same.
    #[error("Source and destination currency must differ (both {0})")]
    SameCurrency(Currency),

    /// Currency code outside the supported set.
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(Currency),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl RemitRouteError {
    /// Get a stable error code for machine-readable output.
    pub fn error_code(&self) -> &'static str {
        match self {
            RemitRouteError::InvalidAmount(_) => "INVALID_AMOUNT",
            RemitRouteError::SameCurrency(_) => "SAME_CURRENCY",
            RemitRouteError::UnsupportedCurrency(_) => "UNSUPPORTED_CURRENCY",
            RemitRouteError::ConfigurationError(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Whether the error stems from user input rather than the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            RemitRouteError::InvalidAmount(_)
                | RemitRouteError::SameCurrency(_)
                | RemitRouteError::UnsupportedCurrency(_)
        )
    }
}
