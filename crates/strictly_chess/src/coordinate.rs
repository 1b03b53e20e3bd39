//! Cell coordinates and their two-digit wire token.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::instrument;

use crate::CoordinateError;

/// Number of files, and of ranks, on the board.
pub const BOARD_SIZE: u8 = 8;

/// Colouring of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shade {
    /// `(file + rank)` is even.
    Light,
    /// `(file + rank)` is odd.
    Dark,
}

/// One of the 64 cells, addressed by file then rank.
///
/// The wire token is the file digit followed by the rank digit, so the
/// white king starts on `"40"` and the black queen on `"37"`. The token is
/// the only identifier exchanged with the rules authority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    file: u8,
    rank: u8,
}

impl Coordinate {
    /// Creates a coordinate, rejecting files or ranks outside `0..8`.
    #[track_caller]
    pub fn new(file: u8, rank: u8) -> Result<Self, CoordinateError> {
        if file >= BOARD_SIZE || rank >= BOARD_SIZE {
            return Err(CoordinateError::new(
                format!("{file}{rank}"),
                "file and rank must be in 0..8",
            ));
        }
        Ok(Self { file, rank })
    }

    /// File (column) of this cell, `0..8`.
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Rank (row) of this cell, `0..8`.
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Row-major index into a 64-cell array.
    pub const fn index(self) -> usize {
        self.rank as usize * BOARD_SIZE as usize + self.file as usize
    }

    /// Inverse of [`Coordinate::index`].
    pub const fn from_index(index: usize) -> Option<Self> {
        if index >= (BOARD_SIZE as usize) * (BOARD_SIZE as usize) {
            return None;
        }
        Some(Self {
            file: (index % BOARD_SIZE as usize) as u8,
            rank: (index / BOARD_SIZE as usize) as u8,
        })
    }

    /// All 64 coordinates in index order (rank 0 first).
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..usize::from(BOARD_SIZE * BOARD_SIZE)).filter_map(Self::from_index)
    }

    /// Light iff `file + rank` is even.
    pub const fn shade(self) -> Shade {
        if (self.file + self.rank) % 2 == 0 {
            Shade::Light
        } else {
            Shade::Dark
        }
    }

    /// Steps by the given deltas, or `None` when that leaves the board.
    pub fn offset(self, files: i8, ranks: i8) -> Option<Self> {
        let file = self.file.checked_add_signed(files)?;
        let rank = self.rank.checked_add_signed(ranks)?;
        Self::new(file, rank).ok()
    }

    /// Parses a two-digit token such as `"40"`.
    #[instrument]
    pub fn parse(token: &str) -> Result<Self, CoordinateError> {
        let bytes = token.as_bytes();
        if bytes.len() != 2 {
            return Err(CoordinateError::new(token, "expected exactly two digits"));
        }
        let digit = |b: u8| (b'0'..b'0' + BOARD_SIZE).contains(&b).then(|| b - b'0');
        match (digit(bytes[0]), digit(bytes[1])) {
            (Some(file), Some(rank)) => Ok(Self { file, rank }),
            _ => Err(CoordinateError::new(token, "digits must be in '0'..'7'")),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file, self.rank)
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Coordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Self::parse(&token).map_err(serde::de::Error::custom)
    }
}
