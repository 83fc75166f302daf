//! Rate feed configuration.

use std::path::PathBuf;
use std::time::Duration;

use remitroute_common::{constants, Currency, DurationExt, RemitRouteError};

/// Rate feed configuration.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Base currency requested from the source. The rate table can only be
    /// rebuilt from USD-quoted snapshots.
    pub base: Currency,
    /// How long a fetched snapshot stays fresh.
    pub cache_ttl: chrono::Duration,
    /// How often the refresh loop looks for an expired snapshot.
    pub check_interval: Duration,
    /// Snapshot document to read rates from, if any.
    pub rates_file: Option<PathBuf>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base: Currency::usd(),
            cache_ttl: constants::rate_cache_ttl(),
            check_interval: constants::rate_refresh_check_interval().as_std(),
            rates_file: None,
        }
    }
}

impl FeedConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(secs) = std::env::var("REMITROUTE_RATE_TTL_SECS") {
            if let Ok(secs) = secs.parse::<i64>() {
                config.cache_ttl = chrono::Duration::seconds(secs);
            }
        }

        if let Ok(secs) = std::env::var("REMITROUTE_REFRESH_INTERVAL_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                config.check_interval = Duration::from_secs(secs);
            }
        }

        if let Ok(path) = std::env::var("REMITROUTE_RATES_FILE") {
            if !path.is_empty() {
                config.rates_file = Some(PathBuf::from(path));
            }
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), RemitRouteError> {
        if self.base != Currency::usd() {
            return Err(RemitRouteError::ConfigurationError(format!(
                "rate table can only be rebuilt from USD snapshots, got base {}",
                self.base
            )));
        }

        if self.cache_ttl <= chrono::Duration::zero() {
            return Err(RemitRouteError::ConfigurationError(
                "rate cache TTL must be positive".to_string(),
            ));
        }

        if self.check_interval.is_zero() {
            return Err(RemitRouteError::ConfigurationError(
                "refresh check interval cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FeedConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cache_ttl, chrono::Duration::hours(24));
        assert_eq!(config.check_interval, Duration::from_secs(3600));
    }

    #[test]
    fn test_invalid_config() {
        let mut config = FeedConfig::default();
        config.check_interval = Duration::ZERO;
        assert!(config.validate().is_err());

        let mut config = FeedConfig::default();
        config.cache_ttl = chrono::Duration::zero();
        assert!(config.validate().is_err());

        let mut config = FeedConfig::default();
        config.base = Currency::eur();
        assert!(config.validate().is_err());
    }
}
