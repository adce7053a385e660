//! Public-IP resolver.
//!
//! This module provides:
//! - The lookup seam the poller depends on ([`PublicIpSource`])
//! - The HTTP echo-service implementation ([`PublicIpResolver`])
//! - Retry configuration ([`RetryPolicy`])
//! - Health reporting hooks ([`HealthObserver`])

mod health;
mod public_ip;
mod retry;

#[cfg(test)]
mod public_ip_tests;
#[cfg(test)]
mod retry_tests;

pub use health::{HealthObserver, NoopObserver};
pub use public_ip::{
    DEFAULT_IP_URL, LookupError, PublicIpResolver, PublicIpSource, ResolveError,
};
pub use retry::RetryPolicy;
