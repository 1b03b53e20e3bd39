//! Game status as reported by the authority, and the status line shown to the player.

use std::fmt;

use strictly_chess::Side;
use tracing::warn;

use crate::protocol::WireStatus;

/// Authority verdict on the game after an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum GameStatus {
    /// Play continues.
    #[default]
    Ongoing,
    /// Side to move is mated.
    Checkmate,
    /// Side to move cannot move and is not in check.
    Stalemate,
}

impl From<WireStatus> for GameStatus {
    fn from(status: WireStatus) -> Self {
        match status {
            WireStatus::Ongoing => GameStatus::Ongoing,
            WireStatus::Checkmate => GameStatus::Checkmate,
            WireStatus::Stalemate => GameStatus::Stalemate,
            WireStatus::Unknown => {
                warn!("Unrecognised game status from authority, treating as ongoing");
                GameStatus::Ongoing
            }
        }
    }
}

/// The single line of status text shown under the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLine {
    /// Play continues with this side to move.
    Turn(Side),
    /// Game over by checkmate.
    Checkmate,
    /// Game over by stalemate.
    Stalemate,
}

impl StatusLine {
    /// Status of a fresh game: first player to move.
    pub const fn initial() -> Self {
        StatusLine::Turn(Side::White)
    }

    /// Derives the status line from an accepted exchange.
    ///
    /// Terminal statuses win outright. Otherwise the side to move comes
    /// from the authority: its explicit `turn` if sent, else the shape of
    /// the reply. When the opponent has already answered it is the
    /// human's move, and when it has not the opponent is to move.
    pub fn derive(status: GameStatus, turn: Option<Side>, replied: bool, human: Side) -> Self {
        match status {
            GameStatus::Checkmate => StatusLine::Checkmate,
            GameStatus::Stalemate => StatusLine::Stalemate,
            GameStatus::Ongoing => StatusLine::Turn(turn.unwrap_or(if replied {
                human
            } else {
                human.opponent()
            })),
        }
    }

    /// Whether the game has ended.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, StatusLine::Turn(_))
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLine::Turn(side) => write!(f, "{}'s turn", side.label()),
            StatusLine::Checkmate => f.write_str("Checkmate!"),
            StatusLine::Stalemate => f.write_str("Stalemate!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses_ignore_turn() {
        let line = StatusLine::derive(GameStatus::Checkmate, Some(Side::White), true, Side::White);
        assert_eq!(line.to_string(), "Checkmate!");
        let line = StatusLine::derive(GameStatus::Stalemate, None, false, Side::Black);
        assert_eq!(line.to_string(), "Stalemate!");
        assert!(line.is_terminal());
    }

    #[test]
    fn test_explicit_turn_wins_over_reply_shape() {
        let line = StatusLine::derive(GameStatus::Ongoing, Some(Side::Black), true, Side::White);
        assert_eq!(line, StatusLine::Turn(Side::Black));
    }

    #[test]
    fn test_turn_from_reply_shape() {
        let replied = StatusLine::derive(GameStatus::Ongoing, None, true, Side::White);
        assert_eq!(replied.to_string(), "White's turn");
        let waiting = StatusLine::derive(GameStatus::Ongoing, None, false, Side::White);
        assert_eq!(waiting.to_string(), "Black's turn");
    }

    #[test]
    fn test_initial_is_white_to_move() {
        assert_eq!(StatusLine::initial().to_string(), "White's turn");
        assert!(!StatusLine::initial().is_terminal());
    }
}
