//! Client configuration: endpoints, timeout and user agent.
//!
//! A config file is plain TOML; every key is optional:
//!
//! ```toml
//! rpc_url = "https://aur.archlinux.org/rpc/"
//! mirrors_url = "https://archlinux.org/mirrors/status/json/"
//! timeout_secs = 30
//! user_agent = "my-tool/1.0"
//! ```

use std::sync::Arc;
use std::time::Duration;

use archapi_core::TransportError;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::api::AUR_RPC_URL;
use crate::mirrors::MIRROR_STATUS_URL;
use crate::transport::{default_user_agent, HttpTransport, Transport};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.as_deref().map_or("config", |p| p.as_str()))]
    Parse {
        path: Option<Utf8PathBuf>,
        #[source]
        source: toml::de::Error,
    },

    #[error("Configuration field '{field}' is not a valid URL: {source}")]
    InvalidUrl {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Failed to set up HTTP transport: {0}")]
    Transport(#[from] TransportError),
}

/// Settings shared by the registry and mirror clients
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub rpc_url: String,
    pub mirrors_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: AUR_RPC_URL.to_string(),
            mirrors_url: MIRROR_STATUS_URL.to_string(),
            timeout_secs: HttpTransport::DEFAULT_TIMEOUT.as_secs(),
            user_agent: default_user_agent().to_string(),
        }
    }
}

impl ClientConfig {
    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config = Self::parse_toml(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML text without validating values.
    ///
    /// For callers that layer overrides on top and call [`validate`](Self::validate)
    /// on the merged result.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse { path: None, source })
    }

    /// Load and validate configuration from a TOML file
    pub async fn load_from_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let config = Self::read_file(path).await?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file without validating values
    pub async fn read_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_owned(),
                source,
            })?;

        Self::parse_toml(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: Some(path.to_owned()),
                source,
            },
            other => other,
        })
    }

    /// Check URLs and timeout
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rpc_url()?;
        self.mirrors_url()?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "user_agent",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn rpc_url(&self) -> Result<Url, ConfigError> {
        parse_http_url("rpc_url", &self.rpc_url)
    }

    pub fn mirrors_url(&self) -> Result<Url, ConfigError> {
        parse_http_url("mirrors_url", &self.mirrors_url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build an HTTP transport honouring the timeout and user agent
    pub fn build_transport(&self) -> Result<Arc<dyn Transport>, ConfigError> {
        let transport = HttpTransport::with_options(self.timeout(), &self.user_agent)?;
        Ok(Arc::new(transport))
    }
}

fn parse_http_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|source| ConfigError::InvalidUrl { field, source })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::Invalid {
            field,
            reason: format!("unsupported scheme '{}'", scheme),
        }),
    }
}
