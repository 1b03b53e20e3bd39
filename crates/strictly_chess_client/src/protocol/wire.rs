//! JSON bodies exchanged with the rules authority.
//!
//! Position tokens stay as raw strings in responses; turning them into
//! [`Coordinate`]s is the protocol client's job, so a malformed token is a
//! decoding failure rather than a serde failure.

use derive_new::new;
use serde::{Deserialize, Deserializer, Serialize};
use strictly_chess::{Coordinate, Side};

/// Body of the legal-move query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct LegalMovesRequest {
    /// Cell whose destinations are requested.
    pub position: Coordinate,
}

/// Reply to the legal-move query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct LegalMovesResponse {
    /// Destination tokens.
    #[serde(default)]
    pub valid_moves: Vec<String>,
}

/// Body of a move submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct SubmitMoveRequest {
    /// Source cell.
    pub from: Coordinate,
    /// Destination cell.
    pub to: Coordinate,
}

/// A move as reported by the authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct WireMove {
    /// Source token.
    pub from: String,
    /// Destination token.
    pub to: String,
}

/// Game status strings the authority may send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireStatus {
    /// Play continues. Also accepted as `"active"`.
    #[default]
    #[serde(alias = "active")]
    Ongoing,
    /// Side to move is mated.
    Checkmate,
    /// Side to move has no legal moves and is not in check.
    Stalemate,
    /// Anything else.
    #[serde(other)]
    Unknown,
}

/// Reply to a move submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitMoveResponse {
    /// Whether the authority accepted the move.
    pub valid: bool,
    /// Whether the destination held a marker that was captured.
    #[serde(default, deserialize_with = "lenient_flag")]
    pub captured: bool,
    /// Opponent reply to chain after the move.
    #[serde(default)]
    pub ai_move: Option<WireMove>,
    /// Status after the exchange.
    #[serde(default)]
    pub game_status: WireStatus,
    /// Rejection reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Side to move next, when the authority says so.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn: Option<Side>,
}

impl SubmitMoveResponse {
    /// An accepted move with no capture, no reply and play ongoing.
    pub fn accepted() -> Self {
        Self {
            valid: true,
            captured: false,
            ai_move: None,
            game_status: WireStatus::Ongoing,
            message: None,
            turn: None,
        }
    }

    /// A rejected move.
    pub fn rejected(message: Option<String>) -> Self {
        Self {
            valid: false,
            message,
            ..Self::accepted()
        }
    }
}

/// Accepts a boolean, or any non-null value as `true`.
///
/// Some servers report the captured piece kind (`"pawn"`) or
/// `null` instead of a boolean.
fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => false,
        Some(serde_json::Value::Bool(flag)) => flag,
        Some(serde_json::Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    })
}
