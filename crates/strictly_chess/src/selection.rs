//! Selection tracker: the selected cell and its legal destinations.

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use crate::Coordinate;

/// At most one selected cell, plus the destinations legal for it.
///
/// The destination set can only be non-empty while a selection is active.
/// Both halves are updated together by every method, so no sequence of
/// calls can leave destinations behind without a selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    active: Option<Coordinate>,
    destinations: BTreeSet<Coordinate>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a cell, discarding any previous selection first.
    ///
    /// The caller is responsible for checking the cell holds a marker.
    #[instrument(skip(self))]
    pub fn select(&mut self, cell: Coordinate) {
        self.clear();
        self.active = Some(cell);
    }

    /// Replaces the destination set for the active selection.
    ///
    /// Ignored (returns `false`) when nothing is selected.
    pub fn set_destinations(&mut self, destinations: impl IntoIterator<Item = Coordinate>) -> bool {
        if self.active.is_none() {
            debug!("Ignoring destinations without an active selection");
            return false;
        }
        self.destinations = destinations.into_iter().collect();
        true
    }

    /// Drops the selection and its destinations. No-op when empty.
    pub fn clear(&mut self) {
        self.active = None;
        self.destinations.clear();
    }

    /// The selected cell, if any.
    pub fn active(&self) -> Option<Coordinate> {
        self.active
    }

    /// Destinations legal for the selected cell.
    pub fn destinations(&self) -> &BTreeSet<Coordinate> {
        &self.destinations
    }

    /// Whether a cell is selected.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Whether `cell` is a legal destination for the selection.
    pub fn is_destination(&self, cell: Coordinate) -> bool {
        self.destinations.contains(&cell)
    }
}
