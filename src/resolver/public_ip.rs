//! Public IP lookup through an HTTP echo service.

use std::future::Future;

use thiserror::Error;
use url::Url;

use super::{HealthObserver, NoopObserver, RetryPolicy};
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::{HttpClient, HttpError, HttpRequest};

/// Default IP echo endpoint. Answers with the caller's address as plain text.
pub const DEFAULT_IP_URL: &str = "https://api.ipify.org?format=text";

/// A single failed lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The request could not be sent or its body could not be read.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The echo service answered with a non-success status.
    #[error("IP echo service returned status {0}")]
    Status(http::StatusCode),
}

/// Error returned when a bounded [`RetryPolicy`] runs out of attempts.
///
/// The default unbounded policy never produces this error.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Every allowed attempt failed.
    #[error("Public IP lookup failed after {attempts} attempt(s): {last_error}")]
    Exhausted {
        /// Number of attempts made
        attempts: u32,
        /// The error from the final attempt
        #[source]
        last_error: LookupError,
    },
}

/// Source of the caller's current public IP address.
pub trait PublicIpSource: Send + Sync {
    /// Returns the current public IP as text.
    ///
    /// # Errors
    ///
    /// Only returns an error if the source gives up; see [`ResolveError`].
    fn resolve(&self) -> impl Future<Output = Result<String, ResolveError>> + Send;
}

impl<T: PublicIpSource> PublicIpSource for std::sync::Arc<T> {
    fn resolve(&self) -> impl Future<Output = Result<String, ResolveError>> + Send {
        (**self).resolve()
    }
}

/// Looks the public IP up with `GET {url}`, retrying per a [`RetryPolicy`].
///
/// The body is returned with surrounding whitespace trimmed and is not
/// otherwise validated; an empty body counts as a successful lookup.
///
/// # Type Parameters
///
/// - `H`: HTTP client
/// - `S`: sleeper used between retries (defaults to [`TokioSleeper`])
/// - `O`: health observer (defaults to [`NoopObserver`])
#[derive(Debug)]
pub struct PublicIpResolver<H, S = TokioSleeper, O = NoopObserver> {
    client: H,
    sleeper: S,
    observer: O,
    url: Url,
    retry_policy: RetryPolicy,
}

impl<H> PublicIpResolver<H> {
    /// Creates a resolver with the default retry policy, sleeper, and no observer.
    #[must_use]
    pub fn new(client: H, url: Url) -> Self {
        Self {
            client,
            sleeper: TokioSleeper,
            observer: NoopObserver,
            url,
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl<H, S, O> PublicIpResolver<H, S, O> {
    /// Replaces the sleeper used between retries.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> PublicIpResolver<H, S2, O> {
        PublicIpResolver {
            client: self.client,
            sleeper,
            observer: self.observer,
            url: self.url,
            retry_policy: self.retry_policy,
        }
    }

    /// Replaces the health observer.
    #[must_use]
    pub fn with_observer<O2>(self, observer: O2) -> PublicIpResolver<H, S, O2> {
        PublicIpResolver {
            client: self.client,
            sleeper: self.sleeper,
            observer,
            url: self.url,
            retry_policy: self.retry_policy,
        }
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Returns the echo service URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }
}

impl<H: HttpClient, S: Sleeper, O: HealthObserver> PublicIpResolver<H, S, O> {
    async fn lookup_once(&self) -> Result<String, LookupError> {
        let response = self.client.request(HttpRequest::get(self.url.clone())).await?;

        if !response.is_success() {
            return Err(LookupError::Status(response.status));
        }

        Ok(response.body_lossy().trim().to_string())
    }

    async fn resolve_with_retry(&self) -> Result<String, ResolveError> {
        let mut attempt: u32 = 1;

        loop {
            match self.lookup_once().await {
                Ok(ip) => {
                    self.observer.on_resolver_up();
                    return Ok(ip);
                }
                Err(e) => {
                    self.observer.on_resolver_down();

                    if !self.retry_policy.should_retry(attempt) {
                        return Err(ResolveError::Exhausted {
                            attempts: attempt,
                            last_error: e,
                        });
                    }

                    let delay = self.retry_policy.delay_for_retry(attempt - 1);
                    tracing::warn!(
                        "Failed getting public IP ({e}), retrying in {}s",
                        delay.as_secs()
                    );
                    self.sleeper.sleep(delay).await;
                    attempt = attempt.saturating_add(1);
                }
            }
        }
    }
}

impl<H: HttpClient, S: Sleeper, O: HealthObserver> PublicIpSource for PublicIpResolver<H, S, O> {
    async fn resolve(&self) -> Result<String, ResolveError> {
        self.resolve_with_retry().await
    }
}
