//! Board presentation model: 64 cells, their markers and highlight tags.
//!
//! The board holds no rules. It relocates, tags and detaches markers when
//! told to, and nothing else. In particular [`Board::move_marker`] never
//! destroys a marker already sitting on the destination: that occupant is
//! kept as the cell's *displaced* marker until the caller detaches it with
//! [`Board::remove_displaced`], so capture removal can be sequenced (and
//! delayed) separately from the move itself.

use std::collections::{BTreeMap, BTreeSet};

use strum::EnumIter;
use tracing::{debug, instrument, warn};

use crate::{BOARD_SIZE, Coordinate, Piece, PieceKind, PlacementError, Shade, Side};

/// Named visual tag painted on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum Highlight {
    /// The currently selected cell.
    Selected,
    /// A legal destination for the selection.
    LegalMove,
    /// A displaced marker in its removal animation.
    Captured,
}

/// One renderable cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    coordinate: Coordinate,
    occupant: Option<Piece>,
    displaced: Option<Piece>,
    highlights: BTreeSet<Highlight>,
}

impl Cell {
    fn empty(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            occupant: None,
            displaced: None,
            highlights: BTreeSet::new(),
        }
    }

    /// Address of this cell.
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Light or dark colouring.
    pub fn shade(&self) -> Shade {
        self.coordinate.shade()
    }

    /// Marker that owns this cell.
    pub fn occupant(&self) -> Option<Piece> {
        self.occupant
    }

    /// Marker pushed aside by a move and awaiting removal.
    pub fn displaced(&self) -> Option<Piece> {
        self.displaced
    }

    /// Whether the tag is painted on this cell.
    pub fn has_highlight(&self, tag: Highlight) -> bool {
        self.highlights.contains(&tag)
    }

    /// All tags painted on this cell.
    pub fn highlights(&self) -> &BTreeSet<Highlight> {
        &self.highlights
    }
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The canonical 32-marker starting arrangement.
///
/// White occupies ranks 0 and 1, black mirrors it on ranks 7 and 6.
pub fn starting_layout() -> impl Iterator<Item = (Coordinate, Piece)> {
    (0..BOARD_SIZE).flat_map(|file| {
        let back = BACK_RANK[usize::from(file)];
        [
            (file, 0, Piece::new(Side::White, back)),
            (file, 1, Piece::new(Side::White, PieceKind::Pawn)),
            (file, 6, Piece::new(Side::Black, PieceKind::Pawn)),
            (file, 7, Piece::new(Side::Black, back)),
        ]
        .into_iter()
        .filter_map(|(file, rank, piece)| Some((Coordinate::new(file, rank).ok()?, piece)))
    })
}

/// 8×8 board of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Cell>,
}

impl Board {
    /// Creates a board in the starting arrangement.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.initialize();
        board
    }

    /// Creates a board with 64 bare cells.
    pub fn empty() -> Self {
        Self {
            cells: Coordinate::all().map(Cell::empty).collect(),
        }
    }

    /// Clears every cell and lays out the starting arrangement.
    #[instrument(skip(self))]
    pub fn initialize(&mut self) {
        self.cells = Coordinate::all().map(Cell::empty).collect();
        for (coordinate, piece) in starting_layout() {
            if let Err(e) = self.place_piece(coordinate, piece) {
                warn!(error = %e, "Starting layout collided with itself");
            }
        }
        debug!(markers = self.marker_count(), "Board initialized");
    }

    /// The cell at a coordinate.
    pub fn cell(&self, coordinate: Coordinate) -> &Cell {
        &self.cells[coordinate.index()]
    }

    fn cell_mut(&mut self, coordinate: Coordinate) -> &mut Cell {
        &mut self.cells[coordinate.index()]
    }

    /// All cells in index order (rank 0 first).
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Marker owning the cell, ignoring any displaced one.
    pub fn piece_at(&self, coordinate: Coordinate) -> Option<Piece> {
        self.cell(coordinate).occupant
    }

    /// Whether a marker owns the cell.
    pub fn is_occupied(&self, coordinate: Coordinate) -> bool {
        self.piece_at(coordinate).is_some()
    }

    /// Number of owning markers on the board.
    pub fn marker_count(&self) -> usize {
        self.cells.iter().filter(|c| c.occupant.is_some()).count()
    }

    /// Snapshot of which marker owns which cell.
    pub fn markers(&self) -> BTreeMap<Coordinate, Piece> {
        self.cells
            .iter()
            .filter_map(|c| c.occupant.map(|p| (c.coordinate, p)))
            .collect()
    }

    /// Attaches a marker to an empty cell.
    ///
    /// An occupied cell is left untouched and reported as an error.
    #[track_caller]
    pub fn place_piece(
        &mut self,
        coordinate: Coordinate,
        piece: Piece,
    ) -> Result<(), PlacementError> {
        let cell = self.cell_mut(coordinate);
        if let Some(occupant) = cell.occupant {
            return Err(PlacementError::new(coordinate, piece, occupant));
        }
        cell.occupant = Some(piece);
        Ok(())
    }

    /// Relocates the marker on `from` to `to`.
    ///
    /// Returns the moved marker, or `None` if `from` was empty. A marker
    /// already owning `to` becomes that cell's displaced marker; it is not
    /// removed here.
    #[instrument(skip_all, fields(from = %from, to = %to))]
    pub fn move_marker(&mut self, from: Coordinate, to: Coordinate) -> Option<Piece> {
        if from == to {
            return self.piece_at(from);
        }
        let piece = self.cell_mut(from).occupant.take()?;
        let destination = self.cell_mut(to);
        if let Some(previous) = destination.occupant.replace(piece) {
            if let Some(stale) = destination.displaced.replace(previous) {
                warn!(stale = %stale, "Dropping displaced marker that was never removed");
            }
            debug!(displaced = %previous, "Destination occupant displaced");
        }
        Some(piece)
    }

    /// Tags the displaced marker on a cell for its removal animation.
    ///
    /// Returns `false` when the cell has no displaced marker.
    pub fn mark_captured(&mut self, coordinate: Coordinate) -> bool {
        let cell = self.cell_mut(coordinate);
        if cell.displaced.is_none() {
            return false;
        }
        cell.highlights.insert(Highlight::Captured);
        true
    }

    /// Detaches and destroys the displaced marker on a cell.
    pub fn remove_displaced(&mut self, coordinate: Coordinate) -> Option<Piece> {
        let cell = self.cell_mut(coordinate);
        cell.highlights.remove(&Highlight::Captured);
        cell.displaced.take()
    }

    /// Paints a tag on each listed cell. Idempotent.
    pub fn highlight(&mut self, coordinates: impl IntoIterator<Item = Coordinate>, tag: Highlight) {
        for coordinate in coordinates {
            self.cell_mut(coordinate).highlights.insert(tag);
        }
    }

    /// Removes a tag from every cell. Idempotent.
    pub fn clear_highlights(&mut self, tag: Highlight) {
        for cell in &mut self.cells {
            cell.highlights.remove(&tag);
        }
    }

    /// Cells currently carrying a tag.
    pub fn highlighted(&self, tag: Highlight) -> BTreeSet<Coordinate> {
        self.cells
            .iter()
            .filter(|c| c.highlights.contains(&tag))
            .map(|c| c.coordinate)
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
