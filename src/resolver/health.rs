//! Resolver health reporting.

use std::sync::Arc;

/// Receives resolver health transitions.
///
/// The resolver calls [`on_resolver_down`](Self::on_resolver_down) before
/// each retry sleep and [`on_resolver_up`](Self::on_resolver_up) as soon as
/// a lookup succeeds. Implementations must be cheap and non-blocking.
pub trait HealthObserver: Send + Sync {
    /// A lookup succeeded.
    fn on_resolver_up(&self);

    /// A lookup failed and the resolver is about to wait and retry.
    fn on_resolver_down(&self);
}

/// Observer that ignores every transition.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl HealthObserver for NoopObserver {
    fn on_resolver_up(&self) {}

    fn on_resolver_down(&self) {}
}

impl<T: HealthObserver + ?Sized> HealthObserver for Arc<T> {
    fn on_resolver_up(&self) {
        (**self).on_resolver_up();
    }

    fn on_resolver_down(&self) {
        (**self).on_resolver_down();
    }
}
