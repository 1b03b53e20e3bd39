//! Move orchestration: the turn state machine between the player, the board and the authority.
//!
//! The orchestrator owns the board model and the selection, talks to the
//! authority through a [`MoveProtocolClient`], and reports every visible
//! change as a [`GameEvent`]. It is driven either directly, one awaited
//! [`Orchestrator::click`] at a time, or as a task reading [`Command`]s in
//! [`Orchestrator::run`].
//!
//! Accepted moves are resolved from a queue of [`MoveRecord`]s. The human
//! move goes in first; an opponent reply is queued only after the move's
//! own relocation and capture removal have finished, so the two never
//! interleave however many replies are chained.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use derive_getters::Getters;
use derive_new::new;
use strictly_chess::{Board, Coordinate, Highlight, Selection, Side};
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::protocol::{AcceptedMove, MovePair, MoveProtocolClient, MoveVerdict, ProtocolError};
use crate::status::StatusLine;

/// Pacing delays used while resolving a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Timings {
    /// How long a captured marker stays visible before removal.
    pub capture_delay: Duration,
    /// Pause before an opponent reply starts.
    pub reply_delay: Duration,
}

impl Timings {
    /// No pauses at all.
    pub const fn instant() -> Self {
        Self {
            capture_delay: Duration::ZERO,
            reply_delay: Duration::ZERO,
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self::new(Duration::from_millis(300), Duration::from_millis(500))
    }
}

/// Where the turn cycle currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
pub enum Phase {
    /// Nothing selected.
    #[default]
    Idle,
    /// A marker is selected and its destinations are highlighted.
    AwaitingDestination,
    /// A move is with the authority.
    Submitting,
    /// An accepted move's effects are being applied.
    Resolving,
}

/// Input accepted by [`Orchestrator::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// The player clicked a cell.
    Click(Coordinate),
    /// The player asked for a new game.
    Reset,
}

/// Visible changes reported by the orchestrator, in the order they happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The state machine moved to a new phase.
    PhaseChanged(Phase),
    /// A cell was selected.
    Selected {
        /// The selected cell.
        cell: Coordinate,
    },
    /// Legal destinations for the selection are highlighted.
    DestinationsHighlighted {
        /// The highlighted cells (possibly none).
        cells: Vec<Coordinate>,
    },
    /// Selection and destination highlights were cleared.
    SelectionCleared,
    /// A marker was relocated.
    MarkerMoved {
        /// Source cell.
        from: Coordinate,
        /// Destination cell.
        to: Coordinate,
    },
    /// A displaced marker started its removal.
    CaptureStarted {
        /// Cell holding the captured marker.
        at: Coordinate,
    },
    /// A displaced marker was destroyed.
    MarkerRemoved {
        /// Cell that held it.
        at: Coordinate,
    },
    /// The authority vetoed a move.
    MoveRejected {
        /// The attempted move.
        mv: MovePair,
        /// Reason given, if any.
        reason: Option<String>,
    },
    /// A remote call failed; nothing changed.
    RequestFailed {
        /// Operation that failed.
        action: &'static str,
        /// Error description.
        error: String,
    },
    /// The status line changed.
    StatusChanged(StatusLine),
    /// The board was re-initialized for a new game.
    BoardReset,
}

/// One move to animate: produced by a submission, consumed once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    /// The move.
    pub mv: MovePair,
    /// Capture flag reported by the authority. `None` for chained replies,
    /// which capture when their destination is occupied.
    pub captured: Option<bool>,
    /// Opponent reply to chain after this move.
    pub reply: Option<MovePair>,
}

impl MoveRecord {
    /// Record for a move the authority accepted.
    pub fn accepted(mv: MovePair, accepted: &AcceptedMove) -> Self {
        Self {
            mv,
            captured: Some(accepted.captured),
            reply: accepted.reply,
        }
    }

    /// Record for a chained opponent reply.
    pub fn reply(mv: MovePair) -> Self {
        Self {
            mv,
            captured: None,
            reply: None,
        }
    }
}

/// The turn/move state machine.
#[derive(Debug, Getters)]
pub struct Orchestrator {
    #[getter(skip)]
    client: MoveProtocolClient,
    /// Pacing delays.
    timings: Timings,
    /// Side the human plays.
    human: Side,
    /// Board presentation model.
    board: Board,
    /// Selected cell and its destinations.
    selection: Selection,
    /// Current phase.
    phase: Phase,
    /// Status line shown to the player.
    status: StatusLine,
    #[getter(skip)]
    pending: VecDeque<MoveRecord>,
    #[getter(skip)]
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl Orchestrator {
    /// Creates an orchestrator with a freshly initialized board.
    #[instrument(skip(client, event_tx))]
    pub fn new(
        client: MoveProtocolClient,
        timings: Timings,
        human: Side,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        info!("Creating move orchestrator");
        Self {
            client,
            timings,
            human,
            board: Board::new(),
            selection: Selection::new(),
            phase: Phase::Idle,
            status: StatusLine::initial(),
            pending: VecDeque::new(),
            event_tx,
        }
    }

    fn emit(&self, event: GameEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("Event receiver dropped");
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            debug!(from = %self.phase, to = %phase, "Phase transition");
            self.phase = phase;
            self.emit(GameEvent::PhaseChanged(phase));
        }
    }

    fn set_status(&mut self, status: StatusLine) {
        self.status = status;
        info!(status = %status, "Status updated");
        self.emit(GameEvent::StatusChanged(status));
    }

    /// Handles a click on a cell.
    ///
    /// Clicks that arrive while a move is in flight are ignored.
    #[instrument(skip(self), fields(cell = %cell, phase = %self.phase))]
    pub async fn click(&mut self, cell: Coordinate) {
        match self.phase {
            Phase::Idle => {
                if self.board.is_occupied(cell) {
                    self.select(cell).await;
                } else {
                    debug!("Ignoring click on empty cell");
                }
            }
            Phase::AwaitingDestination => match self.selection.active() {
                Some(from) if self.selection.is_destination(cell) => {
                    self.submit(MovePair::new(from, cell)).await;
                }
                _ => {
                    self.clear_selection();
                    self.set_phase(Phase::Idle);
                }
            },
            Phase::Submitting | Phase::Resolving => {
                debug!("Ignoring click while a move is in flight");
            }
        }
    }

    async fn select(&mut self, cell: Coordinate) {
        self.clear_selection();
        self.selection.select(cell);
        self.board.highlight([cell], Highlight::Selected);
        self.emit(GameEvent::Selected { cell });

        let destinations = self.client.query_legal_moves(cell).await;
        self.selection.set_destinations(destinations.iter().copied());
        self.board.highlight(destinations.iter().copied(), Highlight::LegalMove);
        self.emit(GameEvent::DestinationsHighlighted {
            cells: destinations,
        });
        self.set_phase(Phase::AwaitingDestination);
    }

    fn clear_selection(&mut self) {
        if !self.selection.is_active() {
            return;
        }
        self.selection.clear();
        self.board.clear_highlights(Highlight::Selected);
        self.board.clear_highlights(Highlight::LegalMove);
        self.emit(GameEvent::SelectionCleared);
    }

    #[instrument(skip(self), fields(mv = %mv))]
    async fn submit(&mut self, mv: MovePair) {
        self.set_phase(Phase::Submitting);
        match self.client.submit_move(mv).await {
            Err(e) => {
                warn!(error = %e, "Move submission failed, keeping selection");
                self.emit(GameEvent::RequestFailed {
                    action: "submit move",
                    error: e.kind.to_string(),
                });
                self.set_phase(Phase::AwaitingDestination);
            }
            Ok(MoveVerdict::Rejected { reason }) => {
                self.emit(GameEvent::MoveRejected { mv, reason });
                self.clear_selection();
                self.set_phase(Phase::Idle);
            }
            Ok(MoveVerdict::Accepted(accepted)) => {
                self.resolve(mv, accepted).await;
                self.clear_selection();
                self.set_phase(Phase::Idle);
            }
        }
    }

    async fn resolve(&mut self, mv: MovePair, accepted: AcceptedMove) {
        self.set_phase(Phase::Resolving);
        self.pending.push_back(MoveRecord::accepted(mv, &accepted));
        while let Some(record) = self.pending.pop_front() {
            self.apply(record).await;
        }
        self.set_status(StatusLine::derive(
            accepted.status,
            accepted.turn,
            accepted.reply.is_some(),
            self.human,
        ));
    }

    /// Relocation, then capture removal, then queueing of any reply.
    #[instrument(skip(self), fields(mv = %record.mv))]
    async fn apply(&mut self, record: MoveRecord) {
        let MovePair { from, to } = record.mv;
        let captured = record.captured.unwrap_or_else(|| self.board.is_occupied(to));

        match self.board.move_marker(from, to) {
            Some(piece) => {
                debug!(piece = %piece, "Marker moved");
                self.emit(GameEvent::MarkerMoved { from, to });
            }
            None => warn!("No marker on source cell, board is out of step with the authority"),
        }

        if captured {
            if self.board.mark_captured(to) {
                self.emit(GameEvent::CaptureStarted { at: to });
                sleep(self.timings.capture_delay).await;
                if let Some(piece) = self.board.remove_displaced(to) {
                    debug!(piece = %piece, "Captured marker removed");
                }
                self.emit(GameEvent::MarkerRemoved { at: to });
            } else {
                warn!("Capture reported but destination held no other marker");
            }
        } else if let Some(stray) = self.board.remove_displaced(to) {
            warn!(piece = %stray, "Destination was occupied without a reported capture");
            self.emit(GameEvent::MarkerRemoved { at: to });
        }

        if let Some(reply) = record.reply {
            sleep(self.timings.reply_delay).await;
            self.pending.push_back(MoveRecord::reply(reply));
        }
    }

    /// Starts a new game.
    ///
    /// On success the board is re-initialized, the status reset and the
    /// phase returns to idle. On transport failure nothing changes and
    /// `false` is returned.
    #[instrument(skip(self))]
    pub async fn reset(&mut self) -> bool {
        match self.client.reset_game().await {
            Ok(()) => {
                self.start_new_game();
                true
            }
            Err(e) => {
                report_reset_failure(&self.event_tx, &e);
                false
            }
        }
    }

    /// Local half of a reset the authority has acknowledged.
    fn start_new_game(&mut self) {
        self.pending.clear();
        self.selection.clear();
        self.board.initialize();
        self.emit(GameEvent::BoardReset);
        self.set_status(StatusLine::initial());
        self.set_phase(Phase::Idle);
    }

    /// Runs the orchestrator until the command channel closes.
    ///
    /// One click is handled at a time. While it is in flight, further
    /// clicks are dropped. A reset is sent to the authority while the
    /// click keeps running; only an acknowledged reset cancels it. A
    /// refused reset lets the click finish so an accepted move is never
    /// half applied. Returns the orchestrator so its final state can be
    /// inspected.
    #[instrument(skip_all)]
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) -> Self {
        info!("Starting move orchestration");
        self.emit(GameEvent::StatusChanged(self.status));

        while let Some(command) = commands.recv().await {
            match command {
                Command::Reset => {
                    self.reset().await;
                }
                Command::Click(cell) => {
                    let client = self.client.clone();
                    let event_tx = self.event_tx.clone();
                    let acknowledged = {
                        let handler = self.click(cell);
                        tokio::pin!(handler);
                        let mut reset: Option<ResetCall<'_>> = None;
                        let mut finished = false;
                        let mut open = true;
                        loop {
                            tokio::select! {
                                biased;
                                result = await_reset(&mut reset) => {
                                    reset = None;
                                    match result {
                                        Ok(()) => break true,
                                        Err(e) => {
                                            report_reset_failure(&event_tx, &e);
                                            if finished {
                                                break false;
                                            }
                                        }
                                    }
                                }
                                () = &mut handler, if !finished => {
                                    finished = true;
                                    if reset.is_none() {
                                        break false;
                                    }
                                }
                                next = commands.recv(), if open => match next {
                                    Some(Command::Reset) if reset.is_none() => {
                                        info!("Reset requested mid-sequence");
                                        reset = Some(Box::pin(client.reset_game()));
                                    }
                                    Some(Command::Reset) => debug!("Reset already in flight"),
                                    Some(Command::Click(ignored)) => {
                                        debug!(cell = %ignored, "Dropping click while busy");
                                    }
                                    None => open = false,
                                },
                            }
                        }
                    };
                    if acknowledged {
                        info!("Authority acknowledged reset, abandoning sequence");
                        self.start_new_game();
                    }
                }
            }
        }

        info!("Command channel closed, stopping orchestration");
        self
    }
}

/// A reset round trip started while a click is in flight.
type ResetCall<'a> = Pin<Box<dyn Future<Output = Result<(), ProtocolError>> + Send + 'a>>;

/// Resolves with the reset outcome, or never when no reset is in flight.
async fn await_reset(reset: &mut Option<ResetCall<'_>>) -> Result<(), ProtocolError> {
    match reset {
        Some(call) => call.await,
        None => std::future::pending().await,
    }
}

fn report_reset_failure(event_tx: &mpsc::UnboundedSender<GameEvent>, error: &ProtocolError) {
    warn!(error = %error, "Reset failed, keeping current game");
    let event = GameEvent::RequestFailed {
        action: "reset game",
        error: error.kind.to_string(),
    };
    if event_tx.send(event).is_err() {
        debug!("Event receiver dropped");
    }
}
