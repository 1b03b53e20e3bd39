//! Error types for the board model.

use derive_more::{Display, Error};
use tracing::instrument;

use crate::{Coordinate, Piece};

/// A position token that does not name one of the 64 cells.
#[derive(Debug, Clone, Display, Error)]
#[display("Invalid coordinate {:?}: {} at {}:{}", token, message, file, line)]
pub struct CoordinateError {
    /// The offending token.
    pub token: String,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl CoordinateError {
    /// Creates a new coordinate error with caller location tracking.
    #[track_caller]
    #[instrument(skip(token, message))]
    pub fn new(token: impl Into<String>, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            token: token.into(),
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// A piece identifier that is not of the form `<side>-<kind>`.
#[derive(Debug, Clone, Display, Error)]
#[display("Invalid piece identifier {:?} at {}:{}", identifier, file, line)]
pub struct PieceParseError {
    /// The offending identifier.
    pub identifier: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl PieceParseError {
    /// Creates a new piece parse error with caller location tracking.
    #[track_caller]
    pub fn new(identifier: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            identifier: identifier.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Attempted to place a marker on a cell that already holds one.
#[derive(Debug, Clone, Display, Error)]
#[display(
    "Cannot place {} on {}: occupied by {} ({}:{})",
    incoming,
    coordinate,
    occupant,
    file,
    line
)]
pub struct PlacementError {
    /// Target cell.
    pub coordinate: Coordinate,
    /// Marker that was refused.
    pub incoming: Piece,
    /// Marker already on the cell.
    pub occupant: Piece,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl PlacementError {
    /// Creates a new placement error with caller location tracking.
    #[track_caller]
    pub fn new(coordinate: Coordinate, incoming: Piece, occupant: Piece) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            coordinate,
            incoming,
            occupant,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
