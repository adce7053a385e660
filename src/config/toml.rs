//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Credential configuration section
    #[serde(default)]
    pub auth: AuthSection,

    /// Managed record section
    #[serde(default)]
    pub record: RecordSection,

    /// Registrar API section
    #[serde(default)]
    pub registrar: RegistrarSection,

    /// Public IP resolver section
    #[serde(default)]
    pub resolver: ResolverSection,

    /// Prometheus exporter section
    #[serde(default)]
    pub metrics: MetricsSection,
}

/// Credential configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthSection {
    /// Credential source: "env" or "flag"
    pub method: Option<String>,

    /// API key (used with method = "flag")
    pub key: Option<String>,

    /// API secret (used with method = "flag")
    pub secret: Option<String>,
}

/// Managed record section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordSection {
    /// Domain name
    pub domain: Option<String>,

    /// Record name under the domain
    pub sub_domain: Option<String>,
}

/// Registrar API section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrarSection {
    /// API base URL
    pub api_url: Option<String>,

    /// "proceed" or "abort"
    pub on_init_failure: Option<String>,
}

/// Public IP resolver section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverSection {
    /// IP echo service URL
    pub url: Option<String>,

    /// Seconds between checks
    pub check_interval: Option<u64>,

    /// Seconds before the first retry of a failed lookup
    pub retry_delay: Option<u64>,

    /// Give up a lookup after this many attempts (unset = never)
    pub max_attempts: Option<u32>,

    /// Maximum retry delay in seconds
    pub max_delay: Option<u64>,

    /// Backoff multiplier
    pub multiplier: Option<f64>,
}

/// Prometheus exporter section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    /// Listen port
    pub port: Option<u16>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# DDNS-GoDaddy Configuration File

[auth]
# Where to read credentials from: "env" or "flag" (default: env)
# With "env" the key and secret come from $godaddykey and $godaddysecret.
# method = "env"

# API key and secret (used with method = "flag")
# key = "your-key"
# secret = "your-secret"

[record]
# Domain name (required)
# domain = "example.com"

# Record name under the domain (required), "@" for the apex
# sub_domain = "dev"

[registrar]
# API base URL (default: https://api.godaddy.com)
# api_url = "https://api.godaddy.com"

# What to do if the initial record read fails: "proceed" or "abort"
# on_init_failure = "proceed"

[resolver]
# IP echo service (default: https://api.ipify.org?format=text)
# url = "https://api.ipify.org?format=text"

# Seconds between public IP checks (default: 5)
check_interval = 5

# Seconds to wait after a failed lookup (default: 30)
retry_delay = 30

# Give up a lookup after this many attempts (default: retry forever)
# max_attempts = 10

# Maximum retry delay in seconds (default: retry_delay)
# max_delay = 300

# Backoff multiplier (default: 1.0, a fixed delay)
# multiplier = 2.0

[metrics]
# Prometheus exporter port (default: 2112)
port = 2112
"#
    .to_string()
}
