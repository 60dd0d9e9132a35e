//! Command implementations and dispatch logic.
//!
//! Each command is an async function taking a [`CommandContext`].

use archapi_core::ArchApiError;
use archapi_registry::{ClientConfig, ConfigError, MirrorClient, RegistryClient};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

pub mod info;
pub mod mirrors;
pub mod search;

#[cfg(test)]
mod tests;

use crate::{output::OutputHandler, Commands};

/// Errors surfaced by the command-line front end
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ArchApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to create async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("Failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            CliError::Api(e) => e.suggestion(),
            CliError::Config(_) => Some("Check the config file or the ARCHAPI_* environment variables"),
            _ => None,
        }
    }
}

/// Shared context for all commands
pub struct CommandContext {
    pub registry: RegistryClient,
    pub mirrors: MirrorClient,
    pub output: OutputHandler,
    pub json: bool,
}

impl CommandContext {
    /// Build both clients on one shared transport
    pub fn new(config: &ClientConfig, json: bool) -> CliResult<Self> {
        let transport = config.build_transport()?;
        let registry = RegistryClient::new(transport.clone()).with_rpc_url(config.rpc_url()?);
        let mirrors = MirrorClient::new(transport).with_feed_url(config.mirrors_url()?);

        Ok(Self {
            registry,
            mirrors,
            output: OutputHandler::new(),
            json,
        })
    }

    /// Print `value` as pretty JSON on stdout
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> CliResult<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> CliResult<()> {
    match command {
        Commands::Search { by, term } => {
            info!("Searching for '{}' (by: {:?})", term, by);
            search::execute(by, term, ctx).await
        }
        Commands::Info { names } => {
            info!("Looking up {} package(s)", names.len());
            info::execute(names, ctx).await
        }
        Commands::Mirrors {
            country,
            protocol,
            active,
        } => {
            info!(
                "Listing mirrors (country: {:?}, protocol: {:?}, active: {})",
                country, protocol, active
            );
            mirrors::execute(mirrors::MirrorFilter { country, protocol, active }, ctx).await
        }
    }
}
