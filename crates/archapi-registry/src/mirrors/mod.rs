//! Arch Linux mirror status feed client

use std::fmt;
use std::sync::Arc;

use archapi_core::{ArchApiError, ArchApiResult, DecodeStage, MirrorList, Operation, TransportError};
use tracing::debug;
use url::Url;

use crate::config::{ClientConfig, ConfigError};
use crate::transport::Transport;

/// Default mirror status feed
pub const MIRROR_STATUS_URL: &str = "https://archlinux.org/mirrors/status/json/";

/// Client for the mirror status feed
#[derive(Clone)]
pub struct MirrorClient {
    transport: Arc<dyn Transport>,
    feed_url: Url,
}

impl MirrorClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let feed_url = Url::parse(MIRROR_STATUS_URL).expect("MIRROR_STATUS_URL is a valid URL");
        Self { transport, feed_url }
    }

    pub fn with_feed_url(mut self, feed_url: Url) -> Self {
        self.feed_url = feed_url;
        self
    }

    /// Create a client with its own HTTP transport from configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.build_transport()?).with_feed_url(config.mirrors_url()?))
    }

    pub fn feed_url(&self) -> &Url {
        &self.feed_url
    }

    /// Fetch the current mirror status.
    ///
    /// The feed has no in-band error format: a non-success status is a
    /// transport error and any body that is not a mirror list is a decode error.
    pub async fn list_mirrors(&self) -> ArchApiResult<MirrorList> {
        let operation = Operation::ListMirrors;
        debug!(url = %self.feed_url, "fetching mirror status");

        let response = self
            .transport
            .get(&self.feed_url)
            .await
            .map_err(|e| ArchApiError::transport(operation, e))?;

        if !response.is_success() {
            return Err(ArchApiError::transport(
                operation,
                TransportError::status(response.status),
            ));
        }

        let list = decode_mirror_list(&response.body)?;
        debug!(mirrors = list.urls.len(), "decoded mirror status");
        Ok(list)
    }
}

/// Decode a mirror status document
pub fn decode_mirror_list(body: &[u8]) -> ArchApiResult<MirrorList> {
    serde_json::from_slice(body)
        .map_err(|e| ArchApiError::decode(Operation::ListMirrors, DecodeStage::MirrorList, e))
}

impl fmt::Debug for MirrorClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MirrorClient")
            .field("feed_url", &self.feed_url.as_str())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
