//! Client configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::orchestrator::Timings;

/// Config file read when no path is given, if it exists.
pub const DEFAULT_CONFIG_PATH: &str = "strictly_chess.toml";

/// Environment variable overriding the authority URL.
pub const SERVER_URL_ENV: &str = "STRICTLY_CHESS_SERVER_URL";

/// Paths of the three authority operations.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Endpoints {
    /// Legal-move query.
    #[serde(default = "default_legal_moves_path")]
    legal_moves: String,

    /// Move submission.
    #[serde(default = "default_submit_move_path")]
    submit_move: String,

    /// Game reset.
    #[serde(default = "default_reset_path")]
    reset: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            legal_moves: default_legal_moves_path(),
            submit_move: default_submit_move_path(),
            reset: default_reset_path(),
        }
    }
}

fn default_legal_moves_path() -> String {
    "/get_valid_moves".to_string()
}

fn default_submit_move_path() -> String {
    "/make_move".to_string()
}

fn default_reset_path() -> String {
    "/reset_game".to_string()
}

/// Configuration for the chess client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the rules authority.
    #[serde(default = "default_server_url")]
    server_url: String,

    /// Endpoint paths on the authority.
    #[serde(default)]
    endpoints: Endpoints,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    request_timeout_ms: u64,

    /// How long a captured marker lingers before removal.
    #[serde(default = "default_capture_delay_ms")]
    capture_delay_ms: u64,

    /// Pause before animating the opponent's reply.
    #[serde(default = "default_reply_delay_ms")]
    reply_delay_ms: u64,

    /// Log file used while the terminal UI is running.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_server_url() -> String {
    "http://127.0.0.1:7861".to_string()
}

fn default_request_timeout_ms() -> u64 {
    5_000
}

fn default_capture_delay_ms() -> u64 {
    300
}

fn default_reply_delay_ms() -> u64 {
    500
}

fn default_log_file() -> PathBuf {
    PathBuf::from("strictly_chess.log")
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            endpoints: Endpoints::default(),
            request_timeout_ms: default_request_timeout_ms(),
            capture_delay_ms: default_capture_delay_ms(),
            reply_delay_ms: default_reply_delay_ms(),
            log_file: default_log_file(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(server_url = %config.server_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the given file, or [`DEFAULT_CONFIG_PATH`] if present, or defaults.
    ///
    /// An explicitly named file must exist.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_file(DEFAULT_CONFIG_PATH),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Applies command-line or environment overrides.
    pub fn with_overrides(mut self, server_url: Option<String>, log_file: Option<PathBuf>) -> Self {
        if let Some(server_url) = server_url {
            self.server_url = server_url;
        }
        if let Some(log_file) = log_file {
            self.log_file = log_file;
        }
        self
    }

    /// Checks the values are usable.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(ConfigError::new(format!(
                "server_url must be an http(s) URL, got {:?}",
                self.server_url
            )));
        }
        for path in [
            &self.endpoints.legal_moves,
            &self.endpoints.submit_move,
            &self.endpoints.reset,
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::new(format!(
                    "endpoint paths must start with '/', got {:?}",
                    path
                )));
            }
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::new("request_timeout_ms must be positive"));
        }
        Ok(())
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Pacing delays for move resolution.
    pub fn timings(&self) -> Timings {
        Timings::new(
            Duration::from_millis(self.capture_delay_ms),
            Duration::from_millis(self.reply_delay_ms),
        )
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new config error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
