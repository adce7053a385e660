//! Registrar client for the managed A record.
//!
//! This module provides:
//! - The record payload ([`DnsRecord`])
//! - API credentials ([`Credentials`])
//! - The read/replace seam the reconciler depends on ([`DnsRegistrar`])
//! - The HTTP implementation ([`GoDaddyClient`])

mod client;
mod credentials;
mod error;
mod record;


pub use client::{DEFAULT_API_URL, DnsRegistrar, GoDaddyClient, SetOutcome, record_url};
pub use credentials::Credentials;
pub use error::RegistrarError;
pub use record::{DnsRecord, UPDATE_TTL_SECS};
