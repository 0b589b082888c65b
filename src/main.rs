use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::Path;

use contact_manager::cli::Cli;
use contact_manager::config::Config;
use contact_manager::utils::{report_error, TerminalConsole};
use contact_manager::{ContactManager, Database};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if let Some(config_path) = &cli.config {
        Config::load_custom(config_path)?
    } else {
        Config::load()?
    };

    if !config.general.color {
        colored::control::set_override(false);
    }

    // Logs go to a file to keep the interactive terminal clean
    init_logging(cli.log_level(), &config.log_file_path())?;

    let db = match Database::connect(&config.database).await {
        Ok(db) => db,
        Err(e) => {
            report_error(&e);
            std::process::exit(1);
        }
    };

    let mut session = ContactManager::new(db, TerminalConsole::new());
    let outcome = session.run().await;
    let closed = session.into_executor().close().await;

    outcome?;
    closed?;
    Ok(())
}

fn init_logging(level: log::LevelFilter, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    Ok(())
}
