//! Retry policy for public-IP lookups.

use std::time::Duration;

/// How long to wait between failed lookups, and how many lookups to attempt.
///
/// The default is the daemon's production behaviour: retry forever with a
/// fixed 30 second pause. A multiplier above 1.0 turns the fixed pause into
/// exponential backoff capped at `max_delay`.
///
/// # Example
///
/// ```
/// use ddns_godaddy::resolver::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.delay_for_retry(7), Duration::from_secs(30));
///
/// let bounded = RetryPolicy::new()
///     .with_max_attempts(5)
///     .with_initial_delay(Duration::from_secs(1))
///     .with_max_delay(Duration::from_secs(8))
///     .with_multiplier(2.0);
/// assert_eq!(bounded.delay_for_retry(10), Duration::from_secs(8));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of attempts including the first one; `None` retries forever.
    pub max_attempts: Option<u32>,

    /// Delay before the first retry.
    pub initial_delay: Duration,

    /// Upper bound for any single delay.
    pub max_delay: Duration,

    /// Factor applied to the delay after each retry.
    pub multiplier: f64,
}

impl RetryPolicy {
    /// Default delay between attempts (30 seconds).
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(30);

    /// Default multiplier (1.0, i.e. a fixed interval).
    pub const DEFAULT_MULTIPLIER: f64 = 1.0;

    /// Creates the default unbounded, fixed-interval policy.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_attempts: None,
            initial_delay: Self::DEFAULT_DELAY,
            max_delay: Self::DEFAULT_DELAY,
            multiplier: Self::DEFAULT_MULTIPLIER,
        }
    }

    /// Limits the number of attempts.
    ///
    /// # Panics
    ///
    /// Panics if `max_attempts` is 0.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        assert!(max_attempts >= 1, "max_attempts must be at least 1");
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Sets the delay before the first retry.
    ///
    /// Raises `max_delay` to match when it would otherwise be smaller.
    /// A zero delay is accepted; tests pair it with an instant sleeper.
    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        if self.max_delay.as_nanos() < delay.as_nanos() {
            self.max_delay = delay;
        }
        self
    }

    /// Sets the cap on a single delay.
    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the backoff multiplier.
    ///
    /// # Panics
    ///
    /// Panics if `multiplier` is not a positive finite number.
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        assert!(
            multiplier > 0.0 && multiplier.is_finite(),
            "multiplier must be positive and finite"
        );
        self.multiplier = multiplier;
        self
    }

    /// Delay to wait before retry number `retry` (0 = first retry).
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let exponent = i32::try_from(retry).unwrap_or(i32::MAX);
        let delay_secs = self.initial_delay.as_secs_f64() * self.multiplier.powi(exponent);
        let capped = delay_secs.min(self.max_delay.as_secs_f64());
        Duration::try_from_secs_f64(capped).unwrap_or(self.max_delay)
    }

    /// Returns true if another attempt may follow attempt number `attempt` (1-based).
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        match self.max_attempts {
            Some(max) => attempt < max,
            None => true,
        }
    }

    /// Returns true if the policy never gives up.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.max_attempts.is_none()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
