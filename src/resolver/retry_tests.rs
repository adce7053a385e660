//! Tests for `RetryPolicy`.

use super::RetryPolicy;
use std::time::Duration;

mod defaults {
    use super::*;

    #[test]
    fn default_is_unbounded_fixed_thirty_seconds() {
        let policy = RetryPolicy::default();

        assert!(policy.is_unbounded());
        assert_eq!(policy.initial_delay, Duration::from_secs(30));
        assert_eq!(policy.max_delay, Duration::from_secs(30));
        assert!((policy.multiplier - 1.0).abs() < f64::EPSILON);
        assert_eq!(policy, RetryPolicy::new());
    }

    #[test]
    fn default_delay_never_changes() {
        let policy = RetryPolicy::default();

        for retry in [0, 1, 5, 1_000, u32::MAX] {
            assert_eq!(policy.delay_for_retry(retry), Duration::from_secs(30));
        }
    }

    #[test]
    fn unbounded_policy_always_retries() {
        let policy = RetryPolicy::default();

        assert!(policy.should_retry(1));
        assert!(policy.should_retry(u32::MAX));
    }
}

mod builder {
    use super::*;

    #[test]
    fn with_max_attempts_bounds_retries() {
        let policy = RetryPolicy::new().with_max_attempts(3);

        assert_eq!(policy.max_attempts, Some(3));
        assert!(policy.should_retry(1));
        assert!(policy.should_retry(2));
        assert!(!policy.should_retry(3));
    }

    #[test]
    fn single_attempt_never_retries() {
        let policy = RetryPolicy::new().with_max_attempts(1);

        assert!(!policy.should_retry(1));
    }

    #[test]
    #[should_panic(expected = "max_attempts must be at least 1")]
    fn zero_attempts_panics() {
        let _ = RetryPolicy::new().with_max_attempts(0);
    }

    #[test]
    fn initial_delay_above_max_raises_max() {
        let policy = RetryPolicy::new().with_initial_delay(Duration::from_secs(90));

        assert_eq!(policy.max_delay, Duration::from_secs(90));
        assert_eq!(policy.delay_for_retry(0), Duration::from_secs(90));
    }

    #[test]
    fn zero_delay_is_allowed() {
        let policy = RetryPolicy::new().with_initial_delay(Duration::ZERO);

        assert_eq!(policy.delay_for_retry(3), Duration::ZERO);
    }

    #[test]
    #[should_panic(expected = "multiplier must be positive and finite")]
    fn non_positive_multiplier_panics() {
        let _ = RetryPolicy::new().with_multiplier(0.0);
    }
}

mod backoff {
    use super::*;

    fn exponential() -> RetryPolicy {
        RetryPolicy::new()
            .with_initial_delay(Duration::from_secs(2))
            .with_max_delay(Duration::from_secs(20))
            .with_multiplier(2.0)
    }

    #[test]
    fn delay_grows_by_multiplier() {
        let policy = exponential();

        assert_eq!(policy.delay_for_retry(0), Duration::from_secs(2));
        assert_eq!(policy.delay_for_retry(1), Duration::from_secs(4));
        assert_eq!(policy.delay_for_retry(2), Duration::from_secs(8));
    }

    #[test]
    fn delay_is_capped_at_max() {
        let policy = exponential();

        assert_eq!(policy.delay_for_retry(4), Duration::from_secs(20));
        assert_eq!(policy.delay_for_retry(u32::MAX), Duration::from_secs(20));
    }
}
