//! Default values for configuration options.

use std::time::Duration;

pub use crate::registrar::DEFAULT_API_URL as API_URL;
pub use crate::resolver::DEFAULT_IP_URL as IP_URL;

/// Default seconds between public IP checks.
pub const CHECK_INTERVAL_SECS: u64 = 5;

/// Default Prometheus exporter port.
pub const PROM_EXP_PORT: u16 = 2112;

/// Default seconds between failed public IP lookups.
pub const RETRY_DELAY_SECS: u64 = 30;

/// Environment variable holding the API key.
pub const ENV_KEY: &str = "godaddykey";

/// Environment variable holding the API secret.
pub const ENV_SECRET: &str = "godaddysecret";

/// Default check interval as Duration.
#[must_use]
pub const fn check_interval() -> Duration {
    Duration::from_secs(CHECK_INTERVAL_SECS)
}

/// Default retry delay as Duration.
#[must_use]
pub const fn retry_delay() -> Duration {
    Duration::from_secs(RETRY_DELAY_SECS)
}
