// DevTerm - Remote Device Terminal Client
mod cli;
mod core;
mod domain;
mod infrastructure;
mod tui;

use std::path::Path;

use anyhow::Result;
use clap::Parser;

use cli::args::{Args, Command};
use cli::commands::execute_command;
use domain::config::DevTermConfig;
use domain::error::DevTermError;
use infrastructure::config::ConfigManager;
use infrastructure::logging::init_logging;
use tui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_config(&args)?;
    if let Some(server) = &args.server {
        config.server.url = server.clone();
    }

    let log_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        config.global.log_level.as_str()
    };
    if let Err(e) = init_logging(log_level) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    match &args.command {
        Some(Command::Tui) | None => {
            let mut app = App::new(config)?;
            app.run().await?;
            Ok(())
        }
        _ => match execute_command(args, config).await {
            Ok(()) => Ok(()),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }
}

fn load_config(args: &Args) -> Result<DevTermConfig, DevTermError> {
    let manager = ConfigManager::new()?;
    match &args.config {
        Some(path) => manager.load_config_from_path(Path::new(path)),
        None => manager.load_config(),
    }
}
