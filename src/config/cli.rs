//! CLI argument parsing using clap.
//!
//! Long options are kebab-case; the camelCase spellings of the original
//! flags (`--checkInterval`, `--subDomain`, `--promExpPort`) are aliases.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::reconcile::InitFailurePolicy;

/// DDNS-GoDaddy: keep a registrar A record pointed at this host's public IP.
///
/// Polls a public IP echo service and replaces the A record whenever the
/// address changes. Exposes `internet_ok` on a Prometheus endpoint.
#[derive(Debug, Parser)]
#[command(name = "ddns-godaddy")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Where to read the API key and secret from
    #[arg(long, value_enum)]
    pub auth: Option<AuthMethodArg>,

    /// Registrar API key (with --auth flag)
    #[arg(long)]
    pub key: Option<String>,

    /// Registrar API secret (with --auth flag)
    #[arg(long)]
    pub secret: Option<String>,

    /// Seconds between public IP checks
    #[arg(long = "check-interval", alias = "checkInterval", value_name = "SECS")]
    pub check_interval: Option<u64>,

    /// Domain name, e.g. example.com
    #[arg(long)]
    pub domain: Option<String>,

    /// Record name under the domain, e.g. dev; use "@" for the apex
    #[arg(long = "sub-domain", alias = "subDomain")]
    pub sub_domain: Option<String>,

    /// Port for the Prometheus exporter
    #[arg(long = "prom-exp-port", alias = "promExpPort", value_name = "PORT")]
    pub prom_exp_port: Option<u16>,

    /// Public IP echo service URL
    #[arg(long = "ip-url", value_name = "URL")]
    pub ip_url: Option<String>,

    /// Registrar API base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Seconds to wait before retrying a failed public IP lookup
    #[arg(long = "retry-delay", value_name = "SECS")]
    pub retry_delay: Option<u64>,

    /// What to do if the initial registrar read fails
    #[arg(long = "on-init-failure", value_enum)]
    pub on_init_failure: Option<InitFailureArg>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for ddns-godaddy
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "ddns-godaddy.toml")]
        output: PathBuf,
    },
}

/// Credential source argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuthMethodArg {
    /// Read `godaddykey` and `godaddysecret` from the environment
    Env,
    /// Use --key and --secret (or the config file)
    Flag,
}

/// Init-failure argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InitFailureArg {
    /// Log the error and start with an unknown baseline
    Proceed,
    /// Exit with an error
    Abort,
}

impl From<InitFailureArg> for InitFailurePolicy {
    fn from(arg: InitFailureArg) -> Self {
        match arg {
            InitFailureArg::Proceed => Self::ProceedWithUnknown,
            InitFailureArg::Abort => Self::Abort,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
