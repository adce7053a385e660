//! HTTP transport shared by the resolver and the registrar client.
//!
//! This module provides:
//! - Request/response value types ([`HttpRequest`], [`HttpResponse`])
//! - The client seam both outbound callers are generic over ([`HttpClient`])
//! - The production implementation backed by reqwest ([`ReqwestClient`])

mod client;
mod error;
mod request;

#[cfg(test)]
pub(crate) mod mock;


pub use client::ReqwestClient;
pub use error::HttpError;
pub use request::{HttpClient, HttpRequest, HttpResponse};
