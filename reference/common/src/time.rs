//! Time utilities and constants for RemitRoute.

use chrono::{DateTime, Duration, Utc};

/// Rate feed timing constants.
pub mod constants {
    use super::Duration;

    /// How long a fetched rate snapshot stays fresh (24 hours).
    pub fn rate_cache_ttl() -> Duration {
        Duration::hours(24)
    }

    /// How often the refresh loop checks for an expired snapshot (1 hour).
    pub fn rate_refresh_check_interval() -> Duration {
        Duration::hours(1)
    }
}

/// A timestamp with timezone (always UTC for RemitRoute).
pub type Timestamp = DateTime<Utc>;

/// Get the current timestamp.
pub fn now() -> Timestamp {
    Utc::now()
}

/// Check if a timestamp has expired (is in the past).
pub fn is_expired(expiry: Timestamp) -> bool {
    now() > expiry
}

/// Calculate expiry time from now.
pub fn expires_in(duration: Duration) -> Timestamp {
    now() + duration
}

/// Duration extensions for convenient construction.
pub trait DurationExt {
    fn as_std(&self) -> std::time::Duration;
}

impl DurationExt for Duration {
    fn as_std(&self) -> std::time::Duration {
        self.to_std().unwrap_or(std::time::Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_expired() {
        let past = now() - Duration::seconds(10);
        assert!(is_expired(past));

        let future = now() + Duration::seconds(10);
        assert!(!is_expired(future));
    }

    #[test]
    fn test_negative_duration_as_std() {
        assert_eq!(Duration::seconds(-5).as_std(), std::time::Duration::ZERO);
        assert_eq!(
            constants::rate_refresh_check_interval().as_std(),
            std::time::Duration::from_secs(3600)
        );
    }
}
