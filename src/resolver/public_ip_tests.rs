//! Tests for `PublicIpResolver`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{HealthObserver, LookupError, PublicIpResolver, PublicIpSource, ResolveError, RetryPolicy};
use crate::time::{InstantSleeper, Sleeper};
use crate::transport::mock::ScriptedClient;
use crate::transport::{HttpError, HttpResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Health {
    Up,
    Down,
}

/// Records every health transition in order.
#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<Health>>,
}

impl RecordingObserver {
    fn events(&self) -> Vec<Health> {
        self.events.lock().unwrap().clone()
    }
}

impl HealthObserver for RecordingObserver {
    fn on_resolver_up(&self) {
        self.events.lock().unwrap().push(Health::Up);
    }

    fn on_resolver_down(&self) {
        self.events.lock().unwrap().push(Health::Down);
    }
}

/// Records requested durations and returns immediately.
#[derive(Default)]
struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
    count: AtomicUsize,
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.sleeps.lock().unwrap().push(duration);
    }
}

fn ip_url() -> url::Url {
    url::Url::parse("https://api.ipify.org?format=text").unwrap()
}

#[tokio::test]
async fn returns_trimmed_body_on_first_success() {
    let client = Arc::new(ScriptedClient::replying(http::StatusCode::OK, "198.51.100.4\n"));
    let resolver = PublicIpResolver::new(Arc::clone(&client), ip_url()).with_sleeper(InstantSleeper);

    let ip = resolver.resolve().await.unwrap();

    assert_eq!(ip, "198.51.100.4");
    assert_eq!(client.calls(), 1);
    let captured = client.captured();
    assert_eq!(captured[0].method, http::Method::GET);
    assert_eq!(captured[0].url.as_str(), "https://api.ipify.org/?format=text");
}

#[tokio::test]
async fn empty_body_counts_as_success() {
    let client = ScriptedClient::replying(http::StatusCode::OK, "");
    let resolver = PublicIpResolver::new(client, ip_url()).with_sleeper(InstantSleeper);

    assert_eq!(resolver.resolve().await.unwrap(), "");
}

#[tokio::test]
async fn n_failures_cause_exactly_n_retries_of_at_least_thirty_seconds() {
    let failures = 4;
    let client = Arc::new(ScriptedClient::failing_then(failures, "9.9.9.9"));
    let sleeper = Arc::new(RecordingSleeper::default());
    let resolver =
        PublicIpResolver::new(Arc::clone(&client), ip_url()).with_sleeper(Arc::clone(&sleeper));

    let ip = resolver.resolve().await.unwrap();

    assert_eq!(ip, "9.9.9.9");
    assert_eq!(client.calls(), failures + 1);
    assert_eq!(sleeper.count.load(Ordering::SeqCst), failures);
    assert!(
        sleeper
            .sleeps
            .lock()
            .unwrap()
            .iter()
            .all(|d| *d >= Duration::from_secs(30))
    );
}

#[tokio::test]
async fn body_read_failure_is_retried() {
    let client = ScriptedClient::new(vec![
        Err(HttpError::Body(Box::new(std::io::Error::other("reset")))),
        Ok(HttpResponse::with_status(http::StatusCode::OK, "192.0.2.1")),
    ]);
    let resolver = PublicIpResolver::new(client, ip_url()).with_sleeper(InstantSleeper);

    assert_eq!(resolver.resolve().await.unwrap(), "192.0.2.1");
}

#[tokio::test]
async fn non_success_status_is_retried() {
    let client = Arc::new(ScriptedClient::new(vec![
        Ok(HttpResponse::with_status(http::StatusCode::SERVICE_UNAVAILABLE, "busy")),
        Ok(HttpResponse::with_status(http::StatusCode::OK, "192.0.2.2")),
    ]));
    let resolver = PublicIpResolver::new(Arc::clone(&client), ip_url()).with_sleeper(InstantSleeper);

    assert_eq!(resolver.resolve().await.unwrap(), "192.0.2.2");
    assert_eq!(client.calls(), 2);
}

#[tokio::test]
async fn observer_sees_down_before_each_retry_then_up() {
    let client = ScriptedClient::failing_then(2, "9.9.9.9");
    let observer = Arc::new(RecordingObserver::default());
    let resolver = PublicIpResolver::new(client, ip_url())
        .with_sleeper(InstantSleeper)
        .with_observer(Arc::clone(&observer));

    resolver.resolve().await.unwrap();

    assert_eq!(observer.events(), [Health::Down, Health::Down, Health::Up]);
}

#[tokio::test]
async fn bounded_policy_gives_up_with_last_error() {
    let client = Arc::new(ScriptedClient::failing_then(5, "unused"));
    let observer = Arc::new(RecordingObserver::default());
    let resolver = PublicIpResolver::new(Arc::clone(&client), ip_url())
        .with_sleeper(InstantSleeper)
        .with_observer(Arc::clone(&observer))
        .with_retry_policy(RetryPolicy::new().with_max_attempts(3));

    let err = resolver.resolve().await.unwrap_err();

    let ResolveError::Exhausted {
        attempts,
        last_error,
    } = err;
    assert_eq!(attempts, 3);
    assert!(matches!(last_error, LookupError::Http(HttpError::Connection(_))));
    assert_eq!(client.calls(), 3);
    assert_eq!(observer.events(), [Health::Down; 3]);
}

#[tokio::test(start_paused = true)]
async fn default_sleeper_waits_thirty_seconds_between_attempts() {
    let client = ScriptedClient::failing_then(1, "203.0.113.9");
    let resolver = PublicIpResolver::new(client, ip_url());
    let started = tokio::time::Instant::now();

    let ip = resolver.resolve().await.unwrap();

    assert_eq!(ip, "203.0.113.9");
    assert!(started.elapsed() >= Duration::from_secs(30));
}

#[test]
fn builder_keeps_url_and_policy() {
    let policy = RetryPolicy::new().with_initial_delay(Duration::from_secs(1));
    let resolver = PublicIpResolver::new(ScriptedClient::default(), ip_url())
        .with_retry_policy(policy.clone())
        .with_sleeper(InstantSleeper);

    assert_eq!(resolver.url(), &ip_url());
    assert_eq!(resolver.retry_policy(), &policy);
}
