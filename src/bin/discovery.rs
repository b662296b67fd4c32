//! # Discovery CLI Tool
//!
//! Command-line front end for node health discovery: generate the node
//! resource map and show health for any resource path.

mod cli;

use clap::{Parser, Subcommand};
use node_discovery::constants::EXIT_INVALID;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "discovery")]
#[command(about = "Discovery interface for node resource health")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate resource health map
    Discover,
    /// Show health status for any resource path
    Show {
        /// Resource path below the root, e.g. "site_001>rack_001". The root id
        /// ("no-cluster" or the cluster id) is not part of the path; leave the
        /// path empty for the whole tree.
        #[arg(long, value_name = "RPATH", default_value = "")]
        health: String,
        /// Regenerate instead of reading the cached health map
        #[arg(long)]
        no_cache: bool,
    },
    /// Report whether a generation is in progress
    Status,
    /// Remove a stale generation marker left by a crashed run
    ClearMarker,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging takes its environment from the loaded configuration
    let result = match cli::load_config(cli.config.as_deref()) {
        Ok(config) => {
            node_discovery::logging::init_cli_logging(&config.environment, cli.verbose);
            cli::run(cli, config).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}\n");
            eprintln!("usage: discovery [-h|--help] [discover] [show --health [<rpath>]] [status]");
            ExitCode::from(EXIT_INVALID as u8)
        }
    }
}
