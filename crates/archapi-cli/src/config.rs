//! Configuration layering: built-in defaults, then the config file, then
//! environment variables and command-line flags (clap merges those two).

use archapi_registry::{ClientConfig, ConfigError};
use camino::Utf8PathBuf;
use tracing::debug;

use crate::commands::CliResult;
use crate::ConfigOverrides;

/// Resolve the effective client configuration
pub async fn load(overrides: &ConfigOverrides) -> CliResult<ClientConfig> {
    let mut config = match &overrides.config {
        Some(path) => {
            let path = Utf8PathBuf::from_path_buf(path.clone()).map_err(|p| ConfigError::Invalid {
                field: "config",
                reason: format!("path {} is not valid UTF-8", p.display()),
            })?;
            debug!("Loading config from {}", path);
            ClientConfig::read_file(&path).await?
        }
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => {
                debug!("Loading config from {}", path);
                ClientConfig::read_file(&path).await?
            }
            None => ClientConfig::default(),
        },
    };

    // Validate the merged result so flags and env can fix a bad file value
    apply_overrides(&mut config, overrides);
    config.validate()?;
    Ok(config)
}

/// `<config dir>/archapi/config.toml`
pub fn default_config_path() -> Option<Utf8PathBuf> {
    let dir = dirs::config_dir()?;
    Utf8PathBuf::from_path_buf(dir.join("archapi").join("config.toml")).ok()
}

/// Apply flag and environment overrides (highest priority)
pub fn apply_overrides(config: &mut ClientConfig, overrides: &ConfigOverrides) {
    if let Some(rpc_url) = &overrides.rpc_url {
        config.rpc_url = rpc_url.clone();
    }
    if let Some(mirrors_url) = &overrides.mirrors_url {
        config.mirrors_url = mirrors_url.clone();
    }
    if let Some(timeout) = overrides.timeout {
        config.timeout_secs = timeout;
    }
}
