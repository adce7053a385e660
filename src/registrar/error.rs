//! Error types for registrar operations.

use thiserror::Error;

use crate::transport::HttpError;

/// Error type for registrar API calls.
///
/// None of these are retried by the client; the reconciler logs them and
/// tries again on its next tick.
#[derive(Debug, Error)]
pub enum RegistrarError {
    /// The request could not be sent or the response could not be received.
    #[error("Registrar request failed: {0}")]
    Transport(#[from] HttpError),

    /// The registrar answered with a status other than the expected one.
    #[error("Registrar returned status {status}{}", body_suffix(.body))]
    UnexpectedStatus {
        /// The HTTP status code returned
        status: http::StatusCode,
        /// Response body as text, if any
        body: Option<String>,
    },

    /// The response body was not a non-empty JSON array of records.
    #[error("Malformed registrar response: {reason}")]
    MalformedResponse {
        /// What was wrong with the body
        reason: String,
    },

    /// The update payload could not be encoded.
    #[error("Failed to encode record payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// The record URL could not be derived from the API base URL.
    #[error("Invalid registrar URL '{url}': {reason}")]
    InvalidUrl {
        /// The offending URL
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The key or secret cannot be sent in an HTTP header.
    #[error("Credentials contain characters not allowed in an HTTP header")]
    InvalidCredentials,
}

impl RegistrarError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }
}

#[allow(clippy::ref_option)] // thiserror hands fields over by reference
fn body_suffix(body: &Option<String>) -> String {
    body.as_deref()
        .filter(|b| !b.is_empty())
        .map(|b| format!(": {b}"))
        .unwrap_or_default()
}
