//! Registrar API credentials.

use std::fmt;

use http::HeaderValue;
use http::header::InvalidHeaderValue;

/// The key/secret pair issued by the registrar.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key: String,
    secret: String,
}

impl Credentials {
    /// Creates credentials from a key and secret.
    #[must_use]
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Returns the API key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Builds the `Authorization` header value, `sso-key {key}:{secret}`.
    ///
    /// The returned value is marked sensitive.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or secret contains bytes that are not
    /// allowed in an HTTP header.
    pub fn authorization(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut value = HeaderValue::from_str(&format!("sso-key {}:{}", self.key, self.secret))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}
