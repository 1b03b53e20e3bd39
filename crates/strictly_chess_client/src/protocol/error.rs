//! Protocol error types.

use derive_more::{Display, Error};
use strictly_chess::CoordinateError;
use tracing::instrument;

/// What went wrong talking to the authority.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ProtocolErrorKind {
    /// The request never completed (connect, timeout, I/O).
    #[display("transport failure: {_0}")]
    Transport(String),
    /// The authority answered with a non-success HTTP status.
    #[display("unexpected HTTP status {_0}")]
    Status(u16),
    /// The response body was not the expected JSON.
    #[display("malformed response: {_0}")]
    Decode(String),
    /// The response named a cell that does not exist.
    #[display("invalid position token: {_0}")]
    Token(String),
}

/// Protocol error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Protocol error: {} at {}:{}", kind, file, line)]
pub struct ProtocolError {
    /// Error category.
    pub kind: ProtocolErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ProtocolError {
    /// Creates a new protocol error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: ProtocolErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Transport failure.
    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ProtocolErrorKind::Transport(message.into()))
    }

    /// Decoding failure.
    #[track_caller]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ProtocolErrorKind::Decode(message.into()))
    }
}

impl From<reqwest::Error> for ProtocolError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::new(ProtocolErrorKind::Status(status.as_u16()))
        } else {
            Self::transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProtocolError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}

impl From<CoordinateError> for ProtocolError {
    #[track_caller]
    fn from(err: CoordinateError) -> Self {
        Self::new(ProtocolErrorKind::Token(err.token))
    }
}
