//! Strictly Chess - terminal client binary.

#![warn(missing_docs)]

mod cli;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use strictly_chess_client::{ClientConfig, SERVER_URL_ENV, run_tui};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            server_url,
            config,
            log_file,
        } => play(server_url, config, log_file).await,
        Command::CheckConfig { config } => check_config(config),
    }
}

/// Resolves the effective configuration: CLI over environment over file over defaults.
fn effective_config(
    path: Option<&Path>,
    server_url: Option<String>,
    log_file: Option<PathBuf>,
) -> Result<ClientConfig> {
    let server_url = server_url.or_else(|| std::env::var(SERVER_URL_ENV).ok());
    let config = ClientConfig::load(path)?.with_overrides(server_url, log_file);
    config.validate()?;
    Ok(config)
}

/// Run the terminal UI against the configured authority
async fn play(
    server_url: Option<String>,
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
) -> Result<()> {
    let config = effective_config(config.as_deref(), server_url, log_file)?;
    run_tui(config).await
}

/// Print the effective configuration
fn check_config(path: Option<PathBuf>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = effective_config(path.as_deref(), None, None)?;
    info!(server_url = %config.server_url(), "Configuration is valid");
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
