//! todomvc - terminal task list
//!
//! CLI entry point: one command per invocation, or an interactive shell.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info};

use todomvc::app::App;
use todomvc::cli::{Cli, Command};
use todomvc::config::Config;
use todomvc::shell;

/// Log file under the platform data dir, e.g. ~/.local/share/todomvc/logs/todomvc.log
fn log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("todomvc")
        .join("logs")
        .join("todomvc.log")
}

/// Route tracing output to the log file so it never mixes with the list on stdout
fn setup_logging(verbose: bool) -> Result<()> {
    let path = log_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).context(format!("Failed to create log directory {}", dir.display()))?;
    }

    // Each one-shot command appends to the same file
    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .context(format!("Failed to open log file {}", path.display()))?;

    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(filter)
        .init();

    debug!(path = %path.display(), verbose, "Logging initialized");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if !config.display.color {
        colored::control::set_override(false);
    }

    info!(
        dir = %config.storage.dir.display(),
        key = %config.storage.key,
        "todomvc starting"
    );

    let mut app = App::open(&config).context("Failed to open task store")?;

    let command = cli.command.unwrap_or(Command::List { filter: None });
    let result = match command.to_request() {
        Some(request) => {
            let outcome = app.handle(request);
            for note in &outcome.notes {
                eprintln!("{}", note.yellow());
            }
            println!("{}", app.render(outcome.view));
            Ok(())
        }
        None => shell::run(&mut app),
    };

    // Always write the final state, even if the shell failed
    app.close().await?;
    result
}
