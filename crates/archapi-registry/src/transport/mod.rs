//! HTTP transport boundary.
//!
//! Clients only ever need "GET this URL, give me status and body". The
//! [`Transport`] trait captures that, so callers can plug in their own HTTP
//! stack (or a test double) and own timeout policy themselves.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use archapi_core::TransportError;
use reqwest::{Client, ClientBuilder};
use tracing::debug;
use url::Url;

/// Boxed future returned by dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Check for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs HTTP GET requests on behalf of the clients.
///
/// Implementations return every response the server produced, whatever its
/// status; `Err` is reserved for exchanges that did not complete.
pub trait Transport: Send + Sync {
    /// Fetch `url`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on connection, timeout or body read failure.
    fn get<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<TransportResponse, TransportError>>;
}

/// `reqwest`-backed implementation of [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Default request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a transport with the default timeout and user agent
    pub fn new() -> Result<Self, TransportError> {
        Self::with_options(Self::DEFAULT_TIMEOUT, default_user_agent())
    }

    /// Create a transport with a custom timeout and user agent
    pub fn with_options(timeout: Duration, user_agent: &str) -> Result<Self, TransportError> {
        let client = ClientBuilder::new()
            // Connection pooling configuration
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(timeout)
            .gzip(true)
            .user_agent(user_agent)
            .build()
            .map_err(|e| TransportError::with_source("failed to create HTTP client", e))?;

        Ok(Self { client })
    }

    /// Wrap an already configured `reqwest` client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn get<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<TransportResponse, TransportError>> {
        Box::pin(async move {
            debug!(url = %url, "sending GET request");

            let response = self
                .client
                .get(url.clone())
                .header(reqwest::header::ACCEPT, "application/json")
                .send()
                .await
                .map_err(|e| TransportError::with_source(format!("GET {} failed", url), e))?;

            let status = response.status().as_u16();
            let body = response
                .bytes()
                .await
                .map_err(|e| TransportError::with_source("failed to read response body", e))?
                .to_vec();

            debug!(url = %url, status, bytes = body.len(), "received response");
            Ok(TransportResponse { status, body })
        })
    }
}

/// `archapi/<version>`
pub fn default_user_agent() -> &'static str {
    concat!("archapi/", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
pub(crate) mod mock;
