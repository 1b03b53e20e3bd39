//! Scripted rules authority and helpers shared by the client tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use strictly_chess::{Coordinate, Side};
use strictly_chess_client::protocol::{
    LegalMovesRequest, LegalMovesResponse, SubmitMoveRequest, SubmitMoveResponse, WireMove,
    WireStatus,
};
use strictly_chess_client::{
    GameEvent, MovePair, MoveProtocolClient, Orchestrator, ProtocolError, RulesAuthority, Timings,
};
use tokio::sync::mpsc;
use tokio::time::sleep;

/// A call the orchestrator made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Legal(Coordinate),
    Submit(MovePair),
    Reset,
}

/// Authority answering from queues filled by the test.
///
/// An unscripted legal-move query answers with no destinations, an
/// unscripted submission fails as a transport error, and an unscripted
/// reset succeeds. Queries and submissions answer immediately unless a
/// latency is set.
#[derive(Default)]
pub struct FakeAuthority {
    legal: Mutex<VecDeque<Result<LegalMovesResponse, ProtocolError>>>,
    submissions: Mutex<VecDeque<Result<SubmitMoveResponse, ProtocolError>>>,
    resets: Mutex<VecDeque<Result<(), ProtocolError>>>,
    calls: Mutex<Vec<Call>>,
    latency: Mutex<Duration>,
}

impl FakeAuthority {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues the destinations for the next legal-move query.
    pub fn legal(&self, tokens: &[&str]) {
        let response = LegalMovesResponse::new(tokens.iter().map(|t| t.to_string()).collect());
        self.legal.lock().unwrap().push_back(Ok(response));
    }

    pub fn legal_fails(&self) {
        self.legal
            .lock()
            .unwrap()
            .push_back(Err(ProtocolError::transport("connection refused")));
    }

    /// Queues the response to the next submission.
    pub fn respond(&self, response: SubmitMoveResponse) {
        self.submissions.lock().unwrap().push_back(Ok(response));
    }

    pub fn submit_fails(&self) {
        self.submissions
            .lock()
            .unwrap()
            .push_back(Err(ProtocolError::transport("connection reset")));
    }

    pub fn reset_fails(&self) {
        self.resets
            .lock()
            .unwrap()
            .push_back(Err(ProtocolError::transport("timed out")));
    }

    /// Makes every later query and submission take `latency` to answer.
    pub fn delay_responses(&self, latency: Duration) {
        *self.latency.lock().unwrap() = latency;
    }

    async fn respond_after_latency(&self) {
        let latency = *self.latency.lock().unwrap();
        if !latency.is_zero() {
            sleep(latency).await;
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RulesAuthority for FakeAuthority {
    async fn legal_moves(
        &self,
        request: &LegalMovesRequest,
    ) -> Result<LegalMovesResponse, ProtocolError> {
        self.calls.lock().unwrap().push(Call::Legal(request.position));
        self.respond_after_latency().await;
        self.legal
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(LegalMovesResponse::default()))
    }

    async fn submit_move(
        &self,
        request: &SubmitMoveRequest,
    ) -> Result<SubmitMoveResponse, ProtocolError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Submit(MovePair::new(request.from, request.to)));
        self.respond_after_latency().await;
        self.submissions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProtocolError::transport("no scripted response")))
    }

    async fn reset_game(&self) -> Result<(), ProtocolError> {
        self.calls.lock().unwrap().push(Call::Reset);
        self.resets.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}

pub fn at(token: &str) -> Coordinate {
    Coordinate::parse(token).expect("valid token")
}

pub fn mv(from: &str, to: &str) -> MovePair {
    MovePair::new(at(from), at(to))
}

/// Accepted response with the given capture flag and reply.
pub fn accepted(
    captured: bool,
    reply: Option<(&str, &str)>,
    status: WireStatus,
) -> SubmitMoveResponse {
    SubmitMoveResponse {
        captured,
        ai_move: reply.map(|(from, to)| WireMove::new(from.to_string(), to.to_string())),
        game_status: status,
        ..SubmitMoveResponse::accepted()
    }
}

/// Orchestrator over the fake authority, playing white.
pub fn orchestrator(
    authority: &Arc<FakeAuthority>,
    timings: Timings,
) -> (Orchestrator, mpsc::UnboundedReceiver<GameEvent>) {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let client = MoveProtocolClient::new(authority.clone());
    (Orchestrator::new(client, timings, Side::White, event_tx), event_rx)
}

/// Everything emitted so far.
pub fn drain(events: &mut mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
    let mut drained = Vec::new();
    while let Ok(event) = events.try_recv() {
        drained.push(event);
    }
    drained
}

/// The emitted events without phase changes.
pub fn visible(events: Vec<GameEvent>) -> Vec<GameEvent> {
    events
        .into_iter()
        .filter(|e| !matches!(e, GameEvent::PhaseChanged(_)))
        .collect()
}
