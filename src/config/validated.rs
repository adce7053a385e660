//! Validated configuration after merging CLI, environment, and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use url::Url;

use crate::reconcile::InitFailurePolicy;
use crate::registrar::Credentials;
use crate::resolver::RetryPolicy;

use super::cli::{AuthMethodArg, Cli, InitFailureArg};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// [`ValidatedConfig::from_raw_with_env`] takes the environment lookup as a
/// parameter so credentials can be supplied without touching process state.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Registrar key and secret
    pub credentials: Credentials,

    /// Domain name (required)
    pub domain: String,

    /// Record name under the domain (required)
    pub sub_domain: String,

    /// Registrar API base URL
    pub api_url: Url,

    /// IP echo service URL
    pub ip_url: Url,

    /// Pause between public IP checks
    pub check_interval: Duration,

    /// Prometheus exporter port
    pub metrics_port: u16,

    /// Retry policy for failed public IP lookups
    pub retry_policy: RetryPolicy,

    /// What to do when the initial registrar read fails
    pub on_init_failure: InitFailurePolicy,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attempts = self
            .retry_policy
            .max_attempts
            .map_or_else(|| "unbounded".to_string(), |n| format!("{n}x"));

        write!(
            f,
            "Config {{ record: {}.{}, api_url: {}, ip_url: {}, check_interval: {}s, \
             retry: {}/{}s, metrics_port: {}, on_init_failure: {:?} }}",
            self.sub_domain,
            self.domain,
            self.api_url,
            self.ip_url,
            self.check_interval.as_secs(),
            attempts,
            self.retry_policy.initial_delay.as_secs(),
            self.metrics_port,
            self.on_init_failure,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config,
    /// reading credentials from the process environment when `--auth env` is in effect.
    ///
    /// # Errors
    ///
    /// See [`ValidatedConfig::from_raw_with_env`].
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        Self::from_raw_with_env(cli, toml, |name| std::env::var(name).ok())
    }

    /// Creates a validated configuration using `env` to look up environment variables.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required fields are missing (`domain`, `sub_domain`, key, secret)
    /// - A URL is invalid or not http(s)
    /// - Durations are zero
    /// - Retry settings are inconsistent
    /// - An enumerated TOML value is not recognised
    /// - The credentials cannot be sent as a header
    pub fn from_raw_with_env<F>(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        env: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Self::resolve_credentials(cli, toml, env)?;

        let domain = Self::resolve_required(
            cli.domain.as_deref(),
            toml.and_then(|t| t.record.domain.as_deref()),
            field::DOMAIN,
            "Use --domain or set record.domain in config file",
        )?;

        let sub_domain = Self::resolve_required(
            cli.sub_domain.as_deref(),
            toml.and_then(|t| t.record.sub_domain.as_deref()),
            field::SUB_DOMAIN,
            "Use --sub-domain or set record.sub_domain in config file",
        )?;

        let api_url = parse_http_url(
            cli.api_url
                .as_deref()
                .or_else(|| toml.and_then(|t| t.registrar.api_url.as_deref()))
                .unwrap_or(defaults::API_URL),
        )?;

        let ip_url = parse_http_url(
            cli.ip_url
                .as_deref()
                .or_else(|| toml.and_then(|t| t.resolver.url.as_deref()))
                .unwrap_or(defaults::IP_URL),
        )?;

        let check_interval = Self::resolve_check_interval(cli, toml)?;

        let metrics_port = cli
            .prom_exp_port
            .or_else(|| toml.and_then(|t| t.metrics.port))
            .unwrap_or(defaults::PROM_EXP_PORT);

        let retry_policy = Self::build_retry_policy(cli, toml)?;

        let on_init_failure = Self::resolve_init_failure(cli, toml)?;

        Ok(Self {
            credentials,
            domain,
            sub_domain,
            api_url,
            ip_url,
            check_interval,
            metrics_port,
            retry_policy,
            on_init_failure,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_required(
        cli: Option<&str>,
        toml: Option<&str>,
        name: &'static str,
        hint: &'static str,
    ) -> Result<String, ConfigError> {
        cli.or(toml)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .ok_or_else(|| ConfigError::missing(name, hint))
    }

    fn resolve_auth_method(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<AuthMethodArg, ConfigError> {
        if let Some(method) = cli.auth {
            return Ok(method);
        }

        match toml.and_then(|t| t.auth.method.as_deref()) {
            Some(s) => parse_auth_method(s),
            None => Ok(AuthMethodArg::Env),
        }
    }

    fn resolve_credentials<F>(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        env: F,
    ) -> Result<Credentials, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (key, secret) = match Self::resolve_auth_method(cli, toml)? {
            AuthMethodArg::Env => {
                let key = Self::resolve_required(
                    env(defaults::ENV_KEY).as_deref(),
                    None,
                    field::KEY,
                    "Set the godaddykey environment variable or use --auth flag",
                )?;
                let secret = Self::resolve_required(
                    env(defaults::ENV_SECRET).as_deref(),
                    None,
                    field::SECRET,
                    "Set the godaddysecret environment variable or use --auth flag",
                )?;
                (key, secret)
            }
            AuthMethodArg::Flag => {
                let key = Self::resolve_required(
                    cli.key.as_deref(),
                    toml.and_then(|t| t.auth.key.as_deref()),
                    field::KEY,
                    "Use --key or set auth.key in config file",
                )?;
                let secret = Self::resolve_required(
                    cli.secret.as_deref(),
                    toml.and_then(|t| t.auth.secret.as_deref()),
                    field::SECRET,
                    "Use --secret or set auth.secret in config file",
                )?;
                (key, secret)
            }
        };

        let credentials = Credentials::new(key, secret);
        credentials
            .authorization()
            .map_err(|_| ConfigError::InvalidCredentials)?;

        Ok(credentials)
    }

    fn resolve_check_interval(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .check_interval
            .or_else(|| toml.and_then(|t| t.resolver.check_interval))
            .unwrap_or(defaults::CHECK_INTERVAL_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "check_interval",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn build_retry_policy(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<RetryPolicy, ConfigError> {
        let resolver = toml.map(|t| &t.resolver);

        let delay_secs = cli
            .retry_delay
            .or_else(|| resolver.and_then(|r| r.retry_delay))
            .unwrap_or(defaults::RETRY_DELAY_SECS);

        let max_delay_secs = resolver.and_then(|r| r.max_delay).unwrap_or(delay_secs);

        let multiplier = resolver
            .and_then(|r| r.multiplier)
            .unwrap_or(RetryPolicy::DEFAULT_MULTIPLIER);

        let max_attempts = resolver.and_then(|r| r.max_attempts);

        if delay_secs == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "retry_delay",
                reason: "must be greater than 0".to_string(),
            });
        }

        if max_attempts == Some(0) {
            return Err(ConfigError::InvalidRetry(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        if multiplier <= 0.0 || !multiplier.is_finite() {
            return Err(ConfigError::InvalidRetry(
                "multiplier must be a positive finite number".to_string(),
            ));
        }

        if max_delay_secs < delay_secs {
            return Err(ConfigError::InvalidRetry(format!(
                "max_delay ({max_delay_secs}s) must be >= retry_delay ({delay_secs}s)"
            )));
        }

        let policy = RetryPolicy::new()
            .with_initial_delay(Duration::from_secs(delay_secs))
            .with_max_delay(Duration::from_secs(max_delay_secs))
            .with_multiplier(multiplier);

        Ok(match max_attempts {
            Some(n) => policy.with_max_attempts(n),
            None => policy,
        })
    }

    fn resolve_init_failure(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<InitFailurePolicy, ConfigError> {
        if let Some(arg) = cli.on_init_failure {
            return Ok(arg.into());
        }

        match toml.and_then(|t| t.registrar.on_init_failure.as_deref()) {
            Some(s) => parse_init_failure(s).map(InitFailurePolicy::from),
            None => Ok(InitFailurePolicy::default()),
        }
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn parse_http_url(s: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(s).map_err(|e| ConfigError::InvalidUrl {
        url: s.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::InvalidUrl {
            url: s.to_string(),
            reason: format!("unsupported scheme '{scheme}', expected http or https"),
        }),
    }
}

fn parse_auth_method(s: &str) -> Result<AuthMethodArg, ConfigError> {
    match s.to_lowercase().as_str() {
        "env" => Ok(AuthMethodArg::Env),
        "flag" => Ok(AuthMethodArg::Flag),
        _ => Err(ConfigError::InvalidChoice {
            field: "auth.method",
            value: s.to_string(),
            expected: "\"env\" or \"flag\"",
        }),
    }
}

fn parse_init_failure(s: &str) -> Result<InitFailureArg, ConfigError> {
    match s.to_lowercase().as_str() {
        "proceed" => Ok(InitFailureArg::Proceed),
        "abort" => Ok(InitFailureArg::Abort),
        _ => Err(ConfigError::InvalidChoice {
            field: "registrar.on_init_failure",
            value: s.to_string(),
            expected: "\"proceed\" or \"abort\"",
        }),
    }
}
