//! Application state mirrored from orchestrator events.

use crossterm::event::KeyCode;
use strictly_chess::{Board, Coordinate, Highlight};
use tracing::debug;

use super::input::move_cursor;
use crate::orchestrator::{GameEvent, Phase};
use crate::status::StatusLine;

/// What the terminal shows.
///
/// The orchestrator owns the real board. This copy is rebuilt from the
/// events it emits, so drawing never touches orchestrator state.
#[derive(Debug, Clone)]
pub struct App {
    board: Board,
    cursor: Coordinate,
    phase: Phase,
    status: StatusLine,
    notice: Option<String>,
}

impl App {
    /// Creates the view of a fresh game with the cursor on the white king's pawn.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            cursor: Coordinate::new(4, 1).unwrap_or_default(),
            phase: Phase::Idle,
            status: StatusLine::initial(),
            notice: None,
        }
    }

    /// The mirrored board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Cell under the keyboard cursor.
    pub fn cursor(&self) -> Coordinate {
        self.cursor
    }

    /// Current orchestrator phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current status line.
    pub fn status(&self) -> StatusLine {
        self.status
    }

    /// Transient notice, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Moves the cursor for a navigation key.
    pub fn move_cursor(&mut self, key: KeyCode) {
        self.cursor = move_cursor(self.cursor, key);
    }

    /// Applies an orchestrator event.
    pub fn handle_event(&mut self, event: GameEvent) {
        debug!(?event, "Handling game event");

        match event {
            GameEvent::PhaseChanged(phase) => {
                self.phase = phase;
            }
            GameEvent::Selected { cell } => {
                self.notice = None;
                self.board.highlight([cell], Highlight::Selected);
            }
            GameEvent::DestinationsHighlighted { cells } => {
                if cells.is_empty() {
                    self.notice = Some("No legal moves from that square".to_string());
                }
                self.board.highlight(cells, Highlight::LegalMove);
            }
            GameEvent::SelectionCleared => {
                self.board.clear_highlights(Highlight::Selected);
                self.board.clear_highlights(Highlight::LegalMove);
            }
            GameEvent::MarkerMoved { from, to } => {
                self.board.move_marker(from, to);
            }
            GameEvent::CaptureStarted { at } => {
                self.board.mark_captured(at);
            }
            GameEvent::MarkerRemoved { at } => {
                self.board.remove_displaced(at);
            }
            GameEvent::MoveRejected { mv, reason } => {
                self.notice = Some(match reason {
                    Some(reason) => format!("{} rejected: {}", mv, reason),
                    None => format!("{} rejected", mv),
                });
            }
            GameEvent::RequestFailed { action, error } => {
                self.notice = Some(format!("Could not {}: {}", action, error));
            }
            GameEvent::StatusChanged(status) => {
                self.status = status;
            }
            GameEvent::BoardReset => {
                self.board.initialize();
                self.notice = None;
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
