//! Scripted HTTP client shared by the resolver and registrar tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Replays a queue of canned results and records every request it sees.
///
/// Once the queue is empty every further request fails with
/// [`HttpError::Timeout`].
#[derive(Debug, Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    calls: AtomicUsize,
}

impl ScriptedClient {
    pub fn new(replies: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    /// A client that answers once with the given status and body.
    pub fn replying(status: http::StatusCode, body: &str) -> Self {
        Self::new(vec![Ok(HttpResponse::with_status(status, body))])
    }

    /// A client that fails `failures` times and then answers 200 with `body`.
    pub fn failing_then(failures: usize, body: &str) -> Self {
        let mut replies: Vec<_> = (0..failures).map(|_| Err(connection_refused())).collect();
        replies.push(Ok(HttpResponse::with_status(http::StatusCode::OK, body)));
        Self::new(replies)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn captured(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for ScriptedClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(HttpError::Timeout))
    }
}

pub fn connection_refused() -> HttpError {
    HttpError::Connection(Box::new(std::io::Error::from(
        std::io::ErrorKind::ConnectionRefused,
    )))
}
