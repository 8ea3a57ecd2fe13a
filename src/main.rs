use clap::Parser;
use colored::Colorize;

use couponhub::cli::Cli;
use couponhub::config::{get_config, init_config_from};
use couponhub::runtime::modes::{self, Mode};
use couponhub::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config_from(&cli.config);
    let config = get_config();
    let command = cli.command_or_default();

    match modes::detect_mode(command) {
        Mode::Server => {
            // Guard 必须活到进程结束，否则日志丢失
            let _guard = init_logging(&config.logging)?;
            modes::run_server(&config).await.inspect_err(|e| {
                eprintln!("{} {:#}", "[ERROR]".red().bold(), e);
            })
        }
        Mode::Cli => {
            if let Err(e) = modes::run_cli(command, &config).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
