//! # archapi-cli
//!
//! Query the AUR and the Arch Linux mirror status feed from the terminal.
//!
//! Handles argument parsing, logging setup and configuration loading, then
//! dispatches to the command handlers in [`commands`].

use std::path::PathBuf;
use std::process::ExitCode;

use archapi_registry::SearchBy;
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod output;

use commands::{CliError, CliResult, CommandContext};
use output::errors::ErrorFormatter;

/// Query the AUR and Arch Linux mirror status
#[derive(Parser, Debug)]
#[command(name = "archapi", version, about = "Query the AUR and Arch Linux mirror status")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

/// Settings that take precedence over the config file
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigOverrides {
    /// Config file (defaults to <config dir>/archapi/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// AUR RPC endpoint
    #[arg(long, global = true, env = "ARCHAPI_RPC_URL", value_name = "URL")]
    pub rpc_url: Option<String>,

    /// Mirror status feed
    #[arg(long, global = true, env = "ARCHAPI_MIRRORS_URL", value_name = "URL")]
    pub mirrors_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "ARCHAPI_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search AUR packages
    Search {
        /// Field to match (name, name-desc, maintainer, depends, makedepends, optdepends, checkdepends)
        #[arg(long)]
        by: Option<SearchBy>,
        term: String,
    },
    /// Show details for AUR packages
    Info {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// List mirrors from the status feed
    Mirrors {
        /// Only mirrors in this ISO country code
        #[arg(long)]
        country: Option<String>,
        /// Only mirrors serving this protocol
        #[arg(long)]
        protocol: Option<String>,
        /// Only active mirrors
        #[arg(long)]
        active: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    debug!("Starting archapi v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(error = ?e, "command failed");
            eprint!("{}", ErrorFormatter::new().format_error(&e));
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: Cli) -> CliResult<()> {
    let rt = tokio::runtime::Runtime::new().map_err(CliError::Runtime)?;

    rt.block_on(async {
        let config = config::load(&cli.overrides).await?;
        let ctx = CommandContext::new(&config, cli.json)?;
        commands::dispatch_command(cli.command, &ctx).await
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    // RUST_LOG wins over --verbose when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "archapi={level},archapi_core={level},archapi_registry={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
