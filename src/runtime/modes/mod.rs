//! Mode routing
//!
//! This module provides unified entry points for the execution modes:
//! - Server mode (HTTP server, default)
//! - CLI mode (import / export / config generation)

pub mod cli;
pub mod server;

pub use cli::run_cli;
pub use server::run_server;

use crate::cli::Commands;

/// Mode detection result
#[derive(Debug, PartialEq)]
pub enum Mode {
    Server,
    Cli,
}

/// Detect which mode to run based on the parsed subcommand
pub fn detect_mode(command: &Commands) -> Mode {
    match command {
        Commands::Serve => Mode::Server,
        _ => Mode::Cli,
    }
}
