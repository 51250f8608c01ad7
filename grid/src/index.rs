//! Grid index: the occupancy lookup from cell to sessions.
//!
//! The index owns the session records and a reverse map from every occupied
//! `Cell` to the sessions sitting in it. It is the single source of truth for
//! occupancy queries. A full rebuild is O(n) over the session collection;
//! commits and rollbacks use the incremental `relocate`.
//!
//! A cell normally holds one session. Externally loaded data can put two in
//! the same cell; the index keeps all of them so they can be displayed, and
//! any non-empty cell counts as occupied.

#[cfg(test)]
#[path = "index_test.rs"]
mod index_test;

use std::collections::HashMap;

use tracing::debug;

use crate::consts::LARGE_INDEX_THRESHOLD;
use crate::model::{Cell, Session, SessionId, SlotId, SpaceId};

/// Cell-to-session occupancy index.
#[derive(Debug, Clone, Default)]
pub struct GridIndex {
    sessions: HashMap<SessionId, Session>,
    cells: HashMap<Cell, Vec<SessionId>>,
}

impl GridIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over `sessions`. Later duplicates of an id replace earlier ones.
    #[must_use]
    pub fn index_for(sessions: Vec<Session>) -> Self {
        let mut index = Self {
            sessions: HashMap::with_capacity(sessions.len()),
            cells: HashMap::with_capacity(sessions.len()),
        };
        for session in sessions {
            index.insert(session);
        }
        if index.len() > LARGE_INDEX_THRESHOLD {
            debug!(sessions = index.len(), cells = index.cells.len(), "rebuilt large grid index");
        }
        index
    }

    /// Insert or replace a session.
    pub fn insert(&mut self, session: Session) {
        if let Some(previous) = self.sessions.remove(&session.id) {
            self.detach(previous.id, previous.cell());
        }
        self.cells.entry(session.cell()).or_default().push(session.id);
        self.sessions.insert(session.id, session);
    }

    /// Remove a session by id, returning it if it was present.
    pub fn remove(&mut self, id: &SessionId) -> Option<Session> {
        let session = self.sessions.remove(id)?;
        self.detach(session.id, session.cell());
        Some(session)
    }

    /// Move a session to `to`, returning the cell it left.
    ///
    /// Returns `None` (and changes nothing) if the session is unknown.
    pub fn relocate(&mut self, id: &SessionId, to: Cell) -> Option<Cell> {
        let session = self.sessions.get_mut(id)?;
        let from = session.cell();
        session.space_id = to.space_id;
        session.slot_id = to.slot_id;
        if from != to {
            self.detach(*id, from);
            self.cells.entry(to).or_default().push(*id);
        }
        Some(from)
    }

    /// Sessions occupying `(space_id, slot_id)`; empty when the cell is free.
    #[must_use]
    pub fn cell_sessions(&self, space_id: SpaceId, slot_id: SlotId) -> Vec<&Session> {
        self.occupants(&Cell::new(space_id, slot_id))
            .iter()
            .filter_map(|id| self.sessions.get(id))
            .collect()
    }

    /// Ids of the sessions occupying `cell`.
    #[must_use]
    pub fn occupants(&self, cell: &Cell) -> &[SessionId] {
        self.cells.get(cell).map_or(&[], Vec::as_slice)
    }

    /// Whether any session occupies `cell`.
    #[must_use]
    pub fn is_occupied(&self, cell: &Cell) -> bool {
        !self.occupants(cell).is_empty()
    }

    /// Look up a session by id.
    #[must_use]
    pub fn session(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.get(id)
    }

    /// The cell a session currently occupies.
    #[must_use]
    pub fn cell_of(&self, id: &SessionId) -> Option<Cell> {
        self.sessions.get(id).map(Session::cell)
    }

    /// All sessions, in no particular order.
    pub fn sessions(&self) -> impl Iterator<Item = &Session> {
        self.sessions.values()
    }

    /// Number of indexed sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if the index holds no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn detach(&mut self, id: SessionId, cell: Cell) {
        let Some(ids) = self.cells.get_mut(&cell) else {
            return;
        };
        ids.retain(|other| *other != id);
        if ids.is_empty() {
            self.cells.remove(&cell);
        }
    }
}
