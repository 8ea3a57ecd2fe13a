//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for couponhub using clap's derive macros.

use clap::{Parser, Subcommand};

use crate::storage::Collection;

/// couponhub - coupon and deal catalog service
#[derive(Parser)]
#[command(name = "couponhub")]
#[command(version)]
#[command(about = "Coupon and deal catalog service", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true, default_value = crate::config::DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Import records from a CSV file
    Import {
        /// Input file path
        file: String,

        /// Target collection: stores | coupons
        #[arg(long, default_value = "stores")]
        collection: Collection,
    },

    /// Export a collection to CSV
    Export {
        /// Source collection: stores | coupons
        #[arg(long, default_value = "stores")]
        collection: Collection,

        /// Output file path (default: generated name in the current directory)
        #[arg(long, short = 'o')]
        output: Option<String>,
    },

    /// Generate example configuration file
    ConfigGen {
        /// Output path (default: config.example.toml)
        path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// 没有子命令时默认启动服务器
    pub fn command_or_default(&self) -> &Commands {
        self.command.as_ref().unwrap_or(&Commands::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let cli = Cli::try_parse_from(["couponhub"]).unwrap();
        assert_eq!(cli.command_or_default(), &Commands::Serve);
        assert_eq!(cli.config, "config.toml");
    }

    #[test]
    fn test_import_collection_flag() {
        let cli =
            Cli::try_parse_from(["couponhub", "import", "deals.csv", "--collection", "coupons"])
                .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Import {
                file: "deals.csv".to_string(),
                collection: Collection::Coupons,
            })
        );
    }

    #[test]
    fn test_export_defaults() {
        let cli = Cli::try_parse_from(["couponhub", "export"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Export {
                collection: Collection::Stores,
                output: None,
            })
        );
    }

    #[test]
    fn test_unknown_collection_rejected() {
        assert!(Cli::try_parse_from(["couponhub", "import", "x.csv", "--collection", "blog"]).is_err());
    }

    #[test]
    fn test_config_gen_path() {
        let cli = Cli::try_parse_from(["couponhub", "config-gen", "out.toml", "--force"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::ConfigGen {
                path: Some("out.toml".to_string()),
                force: true,
            })
        );
    }
}
