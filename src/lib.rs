//! DDNS-GoDaddy: dynamic DNS for a single GoDaddy A record
//!
//! A library for keeping a registrar A record pointed at the host's current
//! public IP, with an `internet_ok` Prometheus gauge reflecting whether the
//! public IP lookup is succeeding.

pub mod config;
pub mod metrics;
pub mod reconcile;
pub mod registrar;
pub mod resolver;
pub mod time;
pub mod transport;
