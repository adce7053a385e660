//! Error types for HTTP operations.

use thiserror::Error;

/// A request that could not be sent, or whose response could not be read.
///
/// A response with an unwelcome status code is not an `HttpError`; callers
/// inspect [`HttpResponse::status`](super::HttpResponse) themselves.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The connection could not be established or was dropped mid-request.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server did not answer within the client timeout.
    #[error("Request timed out")]
    Timeout,

    /// Headers arrived but reading the body failed.
    #[error("Failed to read response body: {0}")]
    Body(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The request could not be built from the given URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
