//! Request/response protocol with the remote rules authority.
//!
//! [`RulesAuthority`] is the wire seam: one method per remote operation,
//! speaking the raw JSON bodies in [`wire`]. [`HttpAuthority`] implements
//! it over HTTP. [`MoveProtocolClient`] sits on top and turns wire replies
//! into domain values, applying the degrade-on-failure policy.

mod client;
mod error;
mod http;
pub mod wire;

use std::fmt;

use async_trait::async_trait;
use derive_new::new;
use strictly_chess::Coordinate;

pub use client::{AcceptedMove, MoveProtocolClient, MoveVerdict};
pub use error::{ProtocolError, ProtocolErrorKind};
pub use http::HttpAuthority;
pub use wire::{
    LegalMovesRequest, LegalMovesResponse, SubmitMoveRequest, SubmitMoveResponse, WireMove,
    WireStatus,
};

/// A source/destination pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, new)]
pub struct MovePair {
    /// Source cell.
    pub from: Coordinate,
    /// Destination cell.
    pub to: Coordinate,
}

impl fmt::Display for MovePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// The external authority that adjudicates moves and plays the opponent.
#[async_trait]
pub trait RulesAuthority: Send + Sync {
    /// Asks for the legal destinations of the marker on a cell.
    async fn legal_moves(
        &self,
        request: &LegalMovesRequest,
    ) -> Result<LegalMovesResponse, ProtocolError>;

    /// Submits a move for adjudication.
    async fn submit_move(
        &self,
        request: &SubmitMoveRequest,
    ) -> Result<SubmitMoveResponse, ProtocolError>;

    /// Starts a new game. Any response body counts as acknowledgement.
    async fn reset_game(&self) -> Result<(), ProtocolError>;
}
