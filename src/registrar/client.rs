//! Registrar client trait and GoDaddy-style HTTP implementation.

use std::future::Future;

use http::{HeaderValue, StatusCode, header::AUTHORIZATION};
use url::Url;

use super::{Credentials, DnsRecord, RegistrarError};
use crate::transport::{HttpClient, HttpRequest};

/// Default registrar API base URL.
pub const DEFAULT_API_URL: &str = "https://api.godaddy.com";

/// Result of a successful [`DnsRegistrar::set_record`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetOutcome {
    /// The registrar answered with an empty body.
    Confirmed,
    /// The registrar accepted the request but sent back a non-empty body.
    Warning(String),
}

/// Read and replace access to the single A record this daemon manages.
pub trait DnsRegistrar: Send + Sync {
    /// Fetches the record currently stored at the registrar.
    ///
    /// # Errors
    ///
    /// - [`RegistrarError::Transport`] if the request cannot be sent
    /// - [`RegistrarError::UnexpectedStatus`] if the status is not 200
    /// - [`RegistrarError::MalformedResponse`] if the body is not a non-empty record array
    fn get_current_record(&self) -> impl Future<Output = Result<DnsRecord, RegistrarError>> + Send;

    /// Replaces the stored record with `record`.
    ///
    /// # Errors
    ///
    /// - [`RegistrarError::Transport`] if the request cannot be sent
    /// - [`RegistrarError::UnexpectedStatus`] if the status is not 2xx
    fn set_record(
        &self,
        record: &DnsRecord,
    ) -> impl Future<Output = Result<SetOutcome, RegistrarError>> + Send;
}

impl<T: DnsRegistrar> DnsRegistrar for std::sync::Arc<T> {
    fn get_current_record(&self) -> impl Future<Output = Result<DnsRecord, RegistrarError>> + Send {
        (**self).get_current_record()
    }

    fn set_record(
        &self,
        record: &DnsRecord,
    ) -> impl Future<Output = Result<SetOutcome, RegistrarError>> + Send {
        (**self).set_record(record)
    }
}

/// Client for the `/v1/domains/{domain}/records/A/{name}` endpoint.
///
/// The record URL and `Authorization` header are computed once at
/// construction; every call is a single request with no retries.
#[derive(Debug)]
pub struct GoDaddyClient<H> {
    client: H,
    record_url: Url,
    authorization: HeaderValue,
}

impl<H> GoDaddyClient<H> {
    /// Creates a client for `sub_domain.domain` under `api_url`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::InvalidUrl`] if `api_url` cannot carry a path,
    /// or [`RegistrarError::InvalidCredentials`] if the credentials cannot be
    /// sent as a header.
    pub fn new(
        client: H,
        api_url: &Url,
        credentials: &Credentials,
        domain: &str,
        sub_domain: &str,
    ) -> Result<Self, RegistrarError> {
        let record_url = record_url(api_url, domain, sub_domain)?;
        let authorization = credentials
            .authorization()
            .map_err(|_| RegistrarError::InvalidCredentials)?;

        Ok(Self {
            client,
            record_url,
            authorization,
        })
    }

    /// Returns the record URL used for both reads and writes.
    #[must_use]
    pub const fn record_url(&self) -> &Url {
        &self.record_url
    }

    fn authorized(&self, request: HttpRequest) -> HttpRequest {
        request.with_header(AUTHORIZATION, self.authorization.clone())
    }
}

impl<H: HttpClient> DnsRegistrar for GoDaddyClient<H> {
    async fn get_current_record(&self) -> Result<DnsRecord, RegistrarError> {
        let request = self.authorized(HttpRequest::get(self.record_url.clone()));
        let response = self.client.request(request).await?;

        if response.status != StatusCode::OK {
            return Err(RegistrarError::UnexpectedStatus {
                status: response.status,
                body: Some(response.body_lossy()),
            });
        }

        let records: Vec<DnsRecord> = serde_json::from_slice(&response.body)
            .map_err(|e| RegistrarError::malformed(e.to_string()))?;

        records
            .into_iter()
            .next()
            .ok_or_else(|| RegistrarError::malformed("registrar returned no A record"))
    }

    async fn set_record(&self, record: &DnsRecord) -> Result<SetOutcome, RegistrarError> {
        let body =
            serde_json::to_vec(std::slice::from_ref(record)).map_err(RegistrarError::Encode)?;
        let request = self
            .authorized(HttpRequest::put(self.record_url.clone()))
            .with_json_body(body);

        let response = self.client.request(request).await?;
        let text = response.body_lossy();

        if !response.is_success() {
            return Err(RegistrarError::UnexpectedStatus {
                status: response.status,
                body: Some(text),
            });
        }

        let text = text.trim();
        if text.is_empty() {
            Ok(SetOutcome::Confirmed)
        } else {
            Ok(SetOutcome::Warning(text.to_string()))
        }
    }
}

/// Builds `{api_url}/v1/domains/{domain}/records/A/{sub_domain}`.
///
/// Any path already present on `api_url` is kept as a prefix.
///
/// # Errors
///
/// Returns [`RegistrarError::InvalidUrl`] if `api_url` cannot be a base URL.
pub fn record_url(api_url: &Url, domain: &str, sub_domain: &str) -> Result<Url, RegistrarError> {
    let mut url = api_url.clone();
    url.set_query(None);
    url.set_fragment(None);

    url.path_segments_mut()
        .map_err(|()| RegistrarError::InvalidUrl {
            url: api_url.to_string(),
            reason: "URL cannot be a base".to_string(),
        })?
        .pop_if_empty()
        .extend(["v1", "domains", domain, "records", "A", sub_domain]);

    Ok(url)
}
