//! Configuration layer for DDNS-GoDaddy.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! # Credentials
//!
//! With `--auth env` (the default) the key and secret are read from the
//! `godaddykey` and `godaddysecret` environment variables only; `--key`,
//! `--secret` and the `[auth]` values are ignored. With `--auth flag` they
//! come from the CLI, then the config file.
//!
//! # TOML-Only Options
//!
//! - `resolver.max_attempts` (default: retry forever)
//! - `resolver.max_delay` (default: same as `retry_delay`)
//! - `resolver.multiplier` (default: 1.0)

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{AuthMethodArg, Cli, Command, InitFailureArg};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
