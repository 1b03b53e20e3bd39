//! Command-line interface for strictly_chess.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Strictly Chess - terminal chess client for a remote rules authority
#[derive(Parser, Debug)]
#[command(name = "strictly_chess")]
#[command(about = "Play chess in the terminal against a remote rules authority", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal UI
    Play {
        /// Rules authority URL (overrides config and environment)
        #[arg(long)]
        server_url: Option<String>,

        /// Path to config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Log file for the session
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Load, validate and print the effective configuration
    CheckConfig {
        /// Path to config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
