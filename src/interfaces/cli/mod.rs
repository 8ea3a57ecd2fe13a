//! CLI interface module
//!
//! This module provides command-line interface functionality for couponhub.
//! Commands talk to the configured storage backend directly.

pub mod commands;

use std::fmt;

use crate::cli::Commands;
use crate::config::StaticConfig;
use crate::services::CatalogService;
use crate::storage::StorageFactory;
use commands::{config_generate, export_records, import_records};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::CouponError> for CliError {
    fn from(err: crate::errors::CouponError) -> Self {
        CliError::StorageError(err.format_simple())
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: &Commands, config: &StaticConfig) -> Result<(), CliError> {
    // Generate doesn't need storage
    if let Commands::ConfigGen { path, force } = cmd {
        return config_generate(path.clone(), *force).await;
    }

    let storage = StorageFactory::create(&config.storage).await?;
    let catalog = CatalogService::new(storage);

    match cmd {
        Commands::Import { file, collection } => import_records(&catalog, file, *collection).await,
        Commands::Export { collection, output } => {
            export_records(&catalog, *collection, output.clone()).await
        }
        Commands::Serve => Err(CliError::CommandError(
            "serve is handled by the server mode".to_string(),
        )),
        Commands::ConfigGen { .. } => unreachable!("handled above"),
    }
}
