//! Strictly Chess - board presentation model for a remote-authority chess client.
//!
//! This crate knows nothing about chess rules. It models what the client
//! shows: 64 addressable cells, the piece markers occupying them, the
//! highlight tags painted on them, and the player's current selection.
//! Legality and game status live with an external authority.
//!
//! # Architecture
//!
//! - **Coordinate**: `(file, rank)` pair with the two-digit wire token (`"40"`)
//! - **Piece**: `(side, kind)` marker identified as `"white-king"`
//! - **Board**: 64 cells, occupants, displaced (captured) markers, highlights
//! - **Selection**: the selected cell and its legal destinations
//!
//! # Example
//!
//! ```
//! use strictly_chess::{Board, Coordinate, Highlight};
//!
//! let mut board = Board::new();
//! let from: Coordinate = "11".parse().unwrap();
//! let to: Coordinate = "13".parse().unwrap();
//!
//! board.highlight([to], Highlight::LegalMove);
//! board.move_marker(from, to);
//! assert!(board.piece_at(from).is_none());
//! assert_eq!(board.piece_at(to).unwrap().to_string(), "white-pawn");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod coordinate;
mod error;
mod piece;
mod selection;

pub use board::{Board, Cell, Highlight, starting_layout};
pub use coordinate::{BOARD_SIZE, Coordinate, Shade};
pub use error::{CoordinateError, PieceParseError, PlacementError};
pub use piece::{Piece, PieceKind, Side};
pub use selection::Selection;
