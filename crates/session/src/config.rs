//! Session lifetime and sweep configuration.

use std::time::Duration;

/// Default maximum session lifetime in days.
const DEFAULT_LIFETIME_DAYS: i64 = 7;

/// Default sweep interval in seconds (3 hours).
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 10_800;

/// Configuration for session expiry.
///
/// Lifetime is a sliding window measured from `last_refresh`, not from
/// session creation.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Maximum session lifetime in days (default: 7).
    pub lifetime_days: i64,
    /// How often the expiry sweep runs, in seconds (default: 10800).
    pub sweep_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            lifetime_days: DEFAULT_LIFETIME_DAYS,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
        }
    }
}

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var                       | Required | Default |
    /// |-------------------------------|----------|---------|
    /// | `SESSION_LIFETIME_DAYS`       | no       | `7`     |
    /// | `SESSION_SWEEP_INTERVAL_SECS` | no       | `10800` |
    ///
    /// # Panics
    ///
    /// Panics if a set variable does not parse.
    pub fn from_env() -> Self {
        let lifetime_days: i64 = std::env::var("SESSION_LIFETIME_DAYS")
            .unwrap_or_else(|_| DEFAULT_LIFETIME_DAYS.to_string())
            .parse()
            .expect("SESSION_LIFETIME_DAYS must be a valid i64");

        let sweep_interval_secs: u64 = std::env::var("SESSION_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| DEFAULT_SWEEP_INTERVAL_SECS.to_string())
            .parse()
            .expect("SESSION_SWEEP_INTERVAL_SECS must be a valid u64");

        Self {
            lifetime_days,
            sweep_interval_secs,
        }
    }

    /// Session lifetime as a chrono duration.
    pub fn lifetime(&self) -> chrono::Duration {
        chrono::Duration::days(self.lifetime_days)
    }

    /// Sweep interval as a std duration.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}
