//! Strictly Chess client - turn orchestration against a remote rules authority.
//!
//! The client never decides legality. It asks the authority which cells a
//! selected marker may reach, submits the chosen move, and animates the
//! accepted result together with the opponent's reply.
//!
//! # Architecture
//!
//! - **Protocol**: [`RulesAuthority`] seam, [`HttpAuthority`] transport, and
//!   the normalizing [`MoveProtocolClient`]
//! - **Orchestrator**: the Idle / AwaitingDestination / Submitting / Resolving
//!   state machine, reporting [`GameEvent`]s
//! - **Status**: the status line derived from accepted exchanges
//! - **Config**: TOML configuration with environment and CLI overrides
//! - **TUI**: `ratatui` front end driving the orchestrator
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use strictly_chess::Side;
//! use strictly_chess_client::{ClientConfig, HttpAuthority, MoveProtocolClient, Orchestrator};
//! use tokio::sync::mpsc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ClientConfig::default();
//! let authority = HttpAuthority::from_config(&config)?;
//! let (event_tx, _event_rx) = mpsc::unbounded_channel();
//! let mut orchestrator = Orchestrator::new(
//!     MoveProtocolClient::new(Arc::new(authority)),
//!     config.timings(),
//!     Side::White,
//!     event_tx,
//! );
//! orchestrator.click("11".parse()?).await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod orchestrator;
pub mod protocol;
mod status;
mod tui;

pub use config::{ClientConfig, ConfigError, DEFAULT_CONFIG_PATH, Endpoints, SERVER_URL_ENV};
pub use orchestrator::{Command, GameEvent, MoveRecord, Orchestrator, Phase, Timings};
pub use protocol::{
    AcceptedMove, HttpAuthority, MovePair, MoveProtocolClient, MoveVerdict, ProtocolError,
    ProtocolErrorKind, RulesAuthority,
};
pub use status::{GameStatus, StatusLine};
pub use tui::run_tui;
