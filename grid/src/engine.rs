//! Board engine: the drag gesture API over topology, index, and selection.
//!
//! DESIGN
//! ======
//! `Board` owns one immutable topology snapshot, the space table, the grid
//! index, the selection, and the gesture state. Every gesture call is a pure
//! synchronous computation over already-indexed data, cheap enough to run on
//! each pointer move. Nothing here persists: a successful drop yields a
//! [`MoveBatch`] for the host's commit layer.
//!
//! The host applies a batch optimistically with [`Board::apply_batch`] and
//! undoes it with [`Board::rollback`] if the commit fails. Reloading sessions
//! or topology cancels any gesture in flight, and a reload also makes any
//! outstanding rollback obsolete: the fresh snapshot is authoritative.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::capacity::{self, CapacityWarning};
use crate::gesture::{GestureState, Selection};
use crate::index::GridIndex;
use crate::model::{Cell, Session, SessionId, SlotId, Space, SpaceId};
use crate::topology::Topology;
use crate::translate::{CandidateMove, TranslateError, Wrap, translate};
use crate::validate::{Move, PreviewCell, ValidationError, preview, validate};

// =============================================================================
// TYPES
// =============================================================================

/// One slot reassignment inside a [`MoveBatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotUpdate {
    pub session_id: SessionId,
    pub slot_id: SlotId,
}

/// The reassignments computed for one drop, applied all-or-nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveBatch {
    /// Destination space shared by every update.
    pub space_id: SpaceId,
    pub updates: Vec<SlotUpdate>,
    /// The moved sessions as they will look after commit.
    pub preview: Vec<Session>,
    /// Set when the user accepted a capacity deficit.
    pub force: bool,
}

/// Why a drop produced no batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("invalid selection: {0}")]
    Selection(#[from] TranslateError),
    #[error(transparent)]
    Conflict(#[from] ValidationError),
}

impl Rejection {
    /// Stable code for presentation layers.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Selection(TranslateError::CrossSpaceOrCrossDay(_)) => "E_CROSS_SPACE_OR_DAY",
            Self::Selection(TranslateError::UnknownSession(_)) => "E_UNKNOWN_SESSION",
            Self::Selection(TranslateError::UnknownSlot(_)) => "E_UNKNOWN_SLOT",
            Self::Conflict(e) if e.has_unresolvable() => "E_UNRESOLVABLE_DESTINATION",
            Self::Conflict(_) => "E_OCCUPANCY_CONFLICT",
        }
    }
}

/// Result of a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Nothing changes; the reason says why.
    Rejected(Rejection),
    /// Valid and within capacity: hand to the commit layer.
    Ready(MoveBatch),
    /// Valid, but some sessions would not fit. Call [`Board::confirm`] or
    /// [`Board::cancel_confirmation`].
    NeedsConfirmation { batch: MoveBatch, warning: CapacityWarning },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GestureError {
    #[error("session not found: {0}")]
    UnknownSession(SessionId),
    #[error("no drag in progress")]
    NotDragging,
    #[error("no batch awaiting confirmation")]
    NotAwaitingConfirmation,
    #[error("a capacity confirmation is pending")]
    ConfirmationPending,
    #[error(transparent)]
    Translate(#[from] TranslateError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    #[error("batch no longer fits the board: {0}")]
    Conflict(#[from] ValidationError),
    #[error("session not found: {0}")]
    UnknownSession(SessionId),
    #[error("slot not in topology: {0}")]
    UnknownSlot(SlotId),
}

/// Receipt for an optimistic [`Board::apply_batch`], consumed by [`Board::rollback`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct AppliedBatch {
    moves: Vec<Move>,
    sessions_rev: u64,
}

impl AppliedBatch {
    /// The moves that were applied.
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }
}

// =============================================================================
// BOARD
// =============================================================================

/// Engine state for one scheduling board.
#[derive(Debug, Default)]
pub struct Board {
    topology: Topology,
    spaces: HashMap<SpaceId, Space>,
    index: GridIndex,
    selection: Selection,
    gesture: GestureState,
    sessions_rev: u64,
    topology_rev: u64,
}

impl Board {
    #[must_use]
    pub fn new(topology: Topology, spaces: Vec<Space>, sessions: Vec<Session>) -> Self {
        let mut board = Self { topology, ..Self::default() };
        board.load_spaces(spaces);
        board.load_sessions(sessions);
        board
    }

    // --- Data inputs ---

    /// Replace the session snapshot and rebuild the index.
    ///
    /// Cancels any gesture in flight and clears the selection.
    pub fn load_sessions(&mut self, sessions: Vec<Session>) {
        self.cancel_stale("sessions reloaded");
        self.selection.clear();
        self.index = GridIndex::index_for(sessions);
        self.sessions_rev += 1;
        debug!(sessions = self.index.len(), rev = self.sessions_rev, "session snapshot loaded");
    }

    /// Replace the topology snapshot. Cancels any gesture in flight.
    pub fn load_topology(&mut self, topology: Topology) {
        self.cancel_stale("topology reloaded");
        self.topology = topology;
        self.topology_rev += 1;
        debug!(slots = self.topology.len(), rev = self.topology_rev, "topology snapshot loaded");
    }

    /// Replace the space table.
    pub fn load_spaces(&mut self, spaces: Vec<Space>) {
        self.spaces = spaces.into_iter().map(|s| (s.id, s)).collect();
    }

    // --- Selection ---

    /// Toggle a session in the selection.
    ///
    /// # Errors
    ///
    /// Returns `UnknownSession` if the session or its slot is not on the board.
    pub fn toggle_select(&mut self, id: SessionId) -> Result<(), GestureError> {
        let session = self.index.session(&id).ok_or(GestureError::UnknownSession(id))?;
        let slot = self
            .topology
            .slot(session.slot_id)
            .ok_or(GestureError::UnknownSession(id))?;
        self.selection.toggle(id, session.space_id, slot.day_id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // --- Gesture ---

    /// Begin dragging `id`. The selection moves along if it contains `id`.
    ///
    /// # Errors
    ///
    /// Returns `ConfirmationPending` while a capacity decision is outstanding,
    /// and `UnknownSession` if `id` is not on the board.
    pub fn on_drag_start(&mut self, id: SessionId) -> Result<(), GestureError> {
        if matches!(self.gesture, GestureState::AwaitingConfirmation { .. }) {
            return Err(GestureError::ConfirmationPending);
        }
        if self.index.session(&id).is_none() {
            return Err(GestureError::UnknownSession(id));
        }
        let moving = if self.selection.contains(&id) { self.selection.members().to_vec() } else { vec![id] };
        self.gesture = GestureState::Dragging { anchor: id, moving, preview: Vec::new() };
        Ok(())
    }

    /// Recompute the occupancy preview for the cell under the pointer.
    ///
    /// # Errors
    ///
    /// Returns `NotDragging` outside a drag and `Translate` when the moving
    /// set cannot be translated at all.
    pub fn on_drag_over(&mut self, target: Cell) -> Result<&[PreviewCell], GestureError> {
        let GestureState::Dragging { anchor, moving, preview: cached } = &mut self.gesture else {
            return Err(GestureError::NotDragging);
        };
        let candidates = translate(&self.topology, &self.index, *anchor, moving, target)?;
        *cached = preview(&candidates, &self.index);
        Ok(cached.as_slice())
    }

    /// Finish the drag on `target`.
    ///
    /// # Errors
    ///
    /// Returns `NotDragging` outside a drag. Invalid placements are not
    /// errors; they come back as [`DropOutcome::Rejected`].
    pub fn on_drop(&mut self, target: Cell) -> Result<DropOutcome, GestureError> {
        let GestureState::Dragging { anchor, moving, .. } = &self.gesture else {
            return Err(GestureError::NotDragging);
        };
        let (anchor, moving) = (*anchor, moving.clone());
        self.gesture = GestureState::Idle;

        let candidates = match translate(&self.topology, &self.index, anchor, &moving, target) {
            Ok(candidates) => candidates,
            Err(e) => {
                info!(%anchor, error = %e, "drop rejected");
                return Ok(DropOutcome::Rejected(e.into()));
            }
        };
        let moves = match validate(&candidates, &self.index) {
            Ok(moves) => moves,
            Err(e) => {
                info!(%anchor, conflicts = e.conflicts().len(), "drop rejected");
                return Ok(DropOutcome::Rejected(e.into()));
            }
        };

        let batch = self.batch_for(target.space_id, &moves);
        let report = capacity::evaluate(&moves, &self.index, &self.spaces);
        if let Some(warning) = report.warning(&self.spaces) {
            info!(
                %anchor,
                affected = warning.affected.len(),
                space = %warning.space_name,
                "drop needs capacity confirmation"
            );
            self.gesture = GestureState::AwaitingConfirmation { batch: batch.clone(), warning: warning.clone() };
            return Ok(DropOutcome::NeedsConfirmation { batch, warning });
        }

        self.selection.clear();
        debug!(%anchor, updates = batch.updates.len(), "drop accepted");
        Ok(DropOutcome::Ready(batch))
    }

    /// Accept the pending capacity deficit and release the batch with `force` set.
    ///
    /// # Errors
    ///
    /// Returns `NotAwaitingConfirmation` when nothing is pending.
    pub fn confirm(&mut self) -> Result<MoveBatch, GestureError> {
        match std::mem::take(&mut self.gesture) {
            GestureState::AwaitingConfirmation { mut batch, warning } => {
                info!(space = %warning.space_name, affected = warning.affected.len(), "capacity deficit confirmed");
                batch.force = true;
                self.selection.clear();
                Ok(batch)
            }
            other => {
                self.gesture = other;
                Err(GestureError::NotAwaitingConfirmation)
            }
        }
    }

    /// Discard the pending batch.
    ///
    /// # Errors
    ///
    /// Returns `NotAwaitingConfirmation` when nothing is pending.
    pub fn cancel_confirmation(&mut self) -> Result<(), GestureError> {
        if !matches!(self.gesture, GestureState::AwaitingConfirmation { .. }) {
            return Err(GestureError::NotAwaitingConfirmation);
        }
        self.gesture = GestureState::Idle;
        Ok(())
    }

    /// Abandon whatever gesture is in progress and clear the selection.
    pub fn on_drag_cancel(&mut self) {
        self.gesture = GestureState::Idle;
        self.selection.clear();
    }

    // --- Commit support ---

    /// Apply `batch` to the index ahead of the remote commit.
    ///
    /// The batch is re-validated against the current index first, so a batch
    /// computed against older data is refused rather than half-applied.
    ///
    /// # Errors
    ///
    /// Returns `UnknownSession`/`UnknownSlot` for ids no longer on the board
    /// and `Conflict` when a destination is now taken.
    pub fn apply_batch(&mut self, batch: &MoveBatch) -> Result<AppliedBatch, ApplyError> {
        let mut candidates = Vec::with_capacity(batch.updates.len());
        for update in &batch.updates {
            let from = self
                .index
                .cell_of(&update.session_id)
                .ok_or(ApplyError::UnknownSession(update.session_id))?;
            if self.topology.slot(update.slot_id).is_none() {
                return Err(ApplyError::UnknownSlot(update.slot_id));
            }
            candidates.push(CandidateMove {
                session_id: update.session_id,
                from,
                to: Some(Cell::new(batch.space_id, update.slot_id)),
                wrap: Wrap::None,
            });
        }
        let moves = validate(&candidates, &self.index)?;
        for m in &moves {
            self.index.relocate(&m.session_id, m.to);
        }
        debug!(moves = moves.len(), force = batch.force, "batch applied");
        Ok(AppliedBatch { moves, sessions_rev: self.sessions_rev })
    }

    /// Undo an optimistic [`Board::apply_batch`].
    ///
    /// Returns `false` without touching the index when the session snapshot
    /// has been reloaded since the batch was applied, or when a later batch
    /// has moved one of its sessions or reused one of its vacated cells.
    pub fn rollback(&mut self, applied: AppliedBatch) -> bool {
        if applied.sessions_rev != self.sessions_rev {
            warn!(
                applied_rev = applied.sessions_rev,
                current_rev = self.sessions_rev,
                "skipping rollback; sessions were reloaded"
            );
            return false;
        }
        let moved: HashSet<SessionId> = applied.moves.iter().map(|m| m.session_id).collect();
        for m in &applied.moves {
            if self.index.cell_of(&m.session_id) != Some(m.to) {
                warn!(session_id = %m.session_id, "skipping rollback; session moved again");
                return false;
            }
            if !self.index.occupants(&m.from).iter().all(|id| moved.contains(id)) {
                warn!(
                    space_id = %m.from.space_id,
                    slot_id = m.from.slot_id,
                    "skipping rollback; vacated cell was reused"
                );
                return false;
            }
        }
        for m in applied.moves.iter().rev() {
            self.index.relocate(&m.session_id, m.from);
        }
        info!(moves = applied.moves.len(), "batch rolled back");
        true
    }

    // --- Queries ---

    /// Sessions in `(space_id, slot_id)`.
    #[must_use]
    pub fn cell_sessions(&self, space_id: SpaceId, slot_id: SlotId) -> Vec<&Session> {
        self.index.cell_sessions(space_id, slot_id)
    }

    #[must_use]
    pub fn session(&self, id: &SessionId) -> Option<&Session> {
        self.index.session(id)
    }

    #[must_use]
    pub fn index(&self) -> &GridIndex {
        &self.index
    }

    #[must_use]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    #[must_use]
    pub fn spaces(&self) -> &HashMap<SpaceId, Space> {
        &self.spaces
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    /// Number of session snapshots loaded so far.
    #[must_use]
    pub fn sessions_rev(&self) -> u64 {
        self.sessions_rev
    }

    // --- Internals ---

    fn cancel_stale(&mut self, reason: &str) {
        if !self.gesture.is_idle() {
            warn!(reason, "cancelling gesture in flight");
            self.gesture = GestureState::Idle;
        }
    }

    fn batch_for(&self, space_id: SpaceId, moves: &[Move]) -> MoveBatch {
        let updates = moves
            .iter()
            .map(|m| SlotUpdate { session_id: m.session_id, slot_id: m.to.slot_id })
            .collect();
        let preview = moves
            .iter()
            .filter_map(|m| {
                let mut session = self.index.session(&m.session_id)?.clone();
                session.space_id = m.to.space_id;
                session.slot_id = m.to.slot_id;
                Some(session)
            })
            .collect();
        MoveBatch { space_id, updates, preview, force: false }
    }
}
