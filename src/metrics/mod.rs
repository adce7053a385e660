//! Prometheus metrics for the resolver's health.
//!
//! [`Metrics`] owns a private registry holding the `internet_ok` gauge and
//! implements [`HealthObserver`], so the resolver drives the gauge without
//! knowing about Prometheus. [`exporter`] serves the registry over HTTP.

pub mod exporter;


use std::fmt;

use prometheus::{IntGauge, Registry, TextEncoder};
use thiserror::Error;

use crate::resolver::HealthObserver;

/// Name of the resolver health gauge.
pub const INTERNET_OK: &str = "internet_ok";

/// Error type for metrics registration and encoding.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// The Prometheus client rejected a metric or failed to encode.
    #[error("Prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// The daemon's metrics registry.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    internet_ok: IntGauge,
}

impl fmt::Debug for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metrics")
            .field(INTERNET_OK, &self.internet_ok.get())
            .finish_non_exhaustive()
    }
}

impl Metrics {
    /// Creates the registry with `internet_ok` set to 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the gauge cannot be registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();
        let internet_ok = IntGauge::new(INTERNET_OK, "Internet up or down")?;
        registry.register(Box::new(internet_ok.clone()))?;
        internet_ok.set(1);

        Ok(Self {
            registry,
            internet_ok,
        })
    }

    /// Current value of the `internet_ok` gauge.
    #[must_use]
    pub fn internet_ok(&self) -> i64 {
        self.internet_ok.get()
    }

    /// Encodes every registered metric in the Prometheus text format.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn render(&self) -> Result<String, MetricsError> {
        Ok(TextEncoder::new().encode_to_string(&self.registry.gather())?)
    }
}

impl HealthObserver for Metrics {
    fn on_resolver_up(&self) {
        self.internet_ok.set(1);
    }

    fn on_resolver_down(&self) {
        self.internet_ok.set(0);
    }
}
