//! Engine configuration.

use remitroute_common::RemitRouteError;
use remitroute_fx::FeedConfig;

/// Top-level configuration for a process hosting the route engine.
///
/// Route policy (fee floor, fee ceiling, result cap) is fixed and not part
/// of this configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Rate feed configuration.
    pub feed: FeedConfig,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Emit JSON log lines.
    pub log_json: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            feed: FeedConfig::default(),
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self {
            feed: FeedConfig::from_env(),
            ..Self::default()
        };

        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.log_level = level;
        }

        if let Ok(format) = std::env::var("LOG_FORMAT") {
            config.log_json = format.eq_ignore_ascii_case("json");
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), RemitRouteError> {
        if self.log_level.trim().is_empty() {
            return Err(RemitRouteError::ConfigurationError(
                "log level cannot be empty".to_string(),
            ));
        }

        self.feed.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.log_json);
    }

    #[test]
    fn test_invalid_config() {
        let mut config = EngineConfig::default();
        config.log_level = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.feed.check_interval = std::time::Duration::ZERO;
        assert!(config.validate().is_err());
    }
}
