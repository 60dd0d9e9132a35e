//! AUR RPC client

use std::fmt;
use std::sync::Arc;

use archapi_core::{ArchApiError, ArchApiResult, Operation, Package, PackageInfo, TransportError};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::api::{Query, RpcEnvelope, SearchBy, AUR_RPC_URL};
use crate::config::{ClientConfig, ConfigError};
use crate::transport::Transport;

/// Client for the AUR `search` and `info` RPC operations.
///
/// Holds no mutable state; clone it or share it freely between tasks.
#[derive(Clone)]
pub struct RegistryClient {
    transport: Arc<dyn Transport>,
    rpc_url: Url,
}

impl RegistryClient {
    /// Create a client for the public AUR endpoint
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let rpc_url = Url::parse(AUR_RPC_URL).expect("AUR_RPC_URL is a valid URL");
        Self { transport, rpc_url }
    }

    /// Point the client at a different RPC endpoint
    pub fn with_rpc_url(mut self, rpc_url: Url) -> Self {
        self.rpc_url = rpc_url;
        self
    }

    /// Create a client with its own HTTP transport from configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.build_transport()?).with_rpc_url(config.rpc_url()?))
    }

    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    /// Look up packages by exact name.
    ///
    /// Results come back in whatever order the server chose; names with no
    /// match are simply missing from the result.
    ///
    /// # Errors
    ///
    /// Fails with [`ArchApiError::Validation`] before any request when `names`
    /// is empty. Transport, decode and remote failures are passed through.
    pub async fn info<I, S>(&self, names: I) -> ArchApiResult<Vec<PackageInfo>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.execute(&Query::info(names)).await
    }

    /// Search packages.
    ///
    /// With `by` unset the server matches against name and description.
    pub async fn search(&self, by: Option<SearchBy>, term: &str) -> ArchApiResult<Vec<Package>> {
        self.execute(&Query::search(by, term)).await
    }

    /// Send `query` and decode the results as `T`
    pub async fn execute<T: DeserializeOwned>(&self, query: &Query) -> ArchApiResult<Vec<T>> {
        let operation = query.operation();
        let url = query.to_url(&self.rpc_url)?;

        debug!(%operation, url = %url, "sending RPC request");

        let response = self
            .transport
            .get(&url)
            .await
            .map_err(|e| ArchApiError::transport(operation, e))?;

        let status_error = || ArchApiError::transport(operation, TransportError::status(response.status));

        // The service reports failures inside the envelope, sometimes with an
        // error status; only fall back to the status when the body is unusable.
        let envelope = match RpcEnvelope::parse(operation, &response.body) {
            Ok(envelope) => envelope,
            Err(ArchApiError::Decode { source, .. }) if !response.is_success() => {
                let error = TransportError::status_with_source(response.status, source);
                return Err(ArchApiError::transport(operation, error));
            }
            Err(e) => return Err(e),
        };
        if !response.is_success() && !envelope.is_error() {
            return Err(status_error());
        }

        let results = envelope.into_results(operation)?;
        debug!(%operation, count = results.len(), "decoded RPC results");
        Ok(results)
    }
}

impl fmt::Debug for RegistryClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryClient")
            .field("rpc_url", &self.rpc_url.as_str())
            .finish_non_exhaustive()
    }
}
