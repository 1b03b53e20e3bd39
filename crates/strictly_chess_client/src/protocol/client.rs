//! Normalizes authority replies into domain values.

use std::fmt;
use std::sync::Arc;

use strictly_chess::{Coordinate, Side};
use tracing::{debug, info, instrument, warn};

use super::{
    LegalMovesRequest, MovePair, ProtocolError, RulesAuthority, SubmitMoveRequest,
    SubmitMoveResponse, WireMove,
};
use crate::status::GameStatus;

/// Details of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptedMove {
    /// The destination held a marker that is now captured.
    pub captured: bool,
    /// Opponent reply to apply after the move.
    pub reply: Option<MovePair>,
    /// Game status after the exchange.
    pub status: GameStatus,
    /// Side to move, if the authority said so.
    pub turn: Option<Side>,
}

/// Outcome of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveVerdict {
    /// The authority vetoed the move. Nothing on the board may change.
    Rejected {
        /// Reason given by the authority.
        reason: Option<String>,
    },
    /// The authority applied the move.
    Accepted(AcceptedMove),
}

/// Client for the three remote operations.
#[derive(Clone)]
pub struct MoveProtocolClient {
    authority: Arc<dyn RulesAuthority>,
}

impl fmt::Debug for MoveProtocolClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoveProtocolClient").finish_non_exhaustive()
    }
}

impl MoveProtocolClient {
    /// Wraps an authority.
    pub fn new(authority: Arc<dyn RulesAuthority>) -> Self {
        Self { authority }
    }

    /// Legal destinations for the marker on `from`.
    ///
    /// Never fails: transport or decoding problems are logged and
    /// reported as no destinations.
    #[instrument(skip(self), fields(from = %from))]
    pub async fn query_legal_moves(&self, from: Coordinate) -> Vec<Coordinate> {
        match self.try_query_legal_moves(from).await {
            Ok(destinations) => {
                debug!(count = destinations.len(), "Received legal destinations");
                destinations
            }
            Err(e) => {
                warn!(error = %e, "Legal move query failed, showing no destinations");
                Vec::new()
            }
        }
    }

    async fn try_query_legal_moves(
        &self,
        from: Coordinate,
    ) -> Result<Vec<Coordinate>, ProtocolError> {
        let response = self
            .authority
            .legal_moves(&LegalMovesRequest::new(from))
            .await?;
        response
            .valid_moves
            .iter()
            .map(|token| Coordinate::parse(token).map_err(ProtocolError::from))
            .collect()
    }

    /// Submits a move and normalizes the verdict.
    #[instrument(skip(self), fields(mv = %mv))]
    pub async fn submit_move(&self, mv: MovePair) -> Result<MoveVerdict, ProtocolError> {
        let response = self
            .authority
            .submit_move(&SubmitMoveRequest::new(mv.from, mv.to))
            .await?;
        let verdict = normalize_verdict(response)?;
        match &verdict {
            MoveVerdict::Rejected { reason } => info!(reason = ?reason, "Move rejected"),
            MoveVerdict::Accepted(accepted) => info!(
                captured = accepted.captured,
                reply = ?accepted.reply,
                status = %accepted.status,
                "Move accepted"
            ),
        }
        Ok(verdict)
    }

    /// Asks the authority to start a new game.
    #[instrument(skip(self))]
    pub async fn reset_game(&self) -> Result<(), ProtocolError> {
        self.authority.reset_game().await?;
        info!("Authority acknowledged reset");
        Ok(())
    }
}

#[track_caller]
fn parse_move(wire: &WireMove) -> Result<MovePair, ProtocolError> {
    Ok(MovePair::new(
        Coordinate::parse(&wire.from)?,
        Coordinate::parse(&wire.to)?,
    ))
}

fn normalize_verdict(response: SubmitMoveResponse) -> Result<MoveVerdict, ProtocolError> {
    if !response.valid {
        return Ok(MoveVerdict::Rejected {
            reason: response.message,
        });
    }
    let reply = response.ai_move.as_ref().map(parse_move).transpose()?;
    Ok(MoveVerdict::Accepted(AcceptedMove {
        captured: response.captured,
        reply,
        status: response.game_status.into(),
        turn: response.turn,
    }))
}
