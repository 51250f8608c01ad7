//! Selection and the drag gesture state machine.
//!
//! `Selection` is the set of sessions the user intends to move together. It
//! only ever holds sessions from one space and one day: selecting a session
//! outside that row segment starts a fresh selection.
//!
//! `GestureState` is the active gesture tracked between drag start and
//! commit. The full lifecycle is
//!
//! ```text
//! Idle -> Dragging -> drop -> Rejected -> Idle
//!                          -> Ready (capacity clear) -> Idle
//!                          -> AwaitingConfirmation -> confirm (forced) -> Idle
//!                                                  -> cancel -> Idle
//!         Dragging -> cancel -> Idle
//! ```
//!
//! Validation and capacity checks run synchronously inside `on_drop`, so
//! only the states that outlive a single call are represented here.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use crate::capacity::CapacityWarning;
use crate::engine::MoveBatch;
use crate::model::{DayId, SessionId, SpaceId};
use crate::validate::PreviewCell;

/// Sessions selected to move together, all in one space and one day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    members: Vec<SessionId>,
    row: Option<(SpaceId, DayId)>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present.
    ///
    /// A session from a different space or day replaces the whole selection.
    pub fn toggle(&mut self, id: SessionId, space_id: SpaceId, day_id: DayId) {
        if self.row != Some((space_id, day_id)) {
            self.members.clear();
            self.row = Some((space_id, day_id));
        }
        if let Some(pos) = self.members.iter().position(|m| *m == id) {
            self.members.remove(pos);
            if self.members.is_empty() {
                self.row = None;
            }
        } else {
            self.members.push(id);
        }
    }

    /// Drop `id` from the selection if present.
    pub fn remove(&mut self, id: &SessionId) {
        self.members.retain(|m| m != id);
        if self.members.is_empty() {
            self.row = None;
        }
    }

    pub fn clear(&mut self) {
        self.members.clear();
        self.row = None;
    }

    /// Members in selection order.
    #[must_use]
    pub fn members(&self) -> &[SessionId] {
        &self.members
    }

    #[must_use]
    pub fn contains(&self, id: &SessionId) -> bool {
        self.members.contains(id)
    }

    /// The shared `(space, day)` of the members, if any are selected.
    #[must_use]
    pub fn row(&self) -> Option<(SpaceId, DayId)> {
        self.row
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Internal state for the drag gesture state machine.
#[derive(Debug, Clone, Default)]
pub enum GestureState {
    /// No gesture in progress; waiting for the next drag start.
    #[default]
    Idle,
    /// A session is being dragged.
    Dragging {
        /// The session under the pointer at drag start.
        anchor: SessionId,
        /// Sessions moving with the anchor, anchor included.
        moving: Vec<SessionId>,
        /// Occupancy preview from the most recent hover, if any.
        preview: Vec<PreviewCell>,
    },
    /// A validated batch is waiting for the user to accept a capacity deficit.
    AwaitingConfirmation {
        /// The batch to commit if confirmed.
        batch: MoveBatch,
        /// What to show the user.
        warning: CapacityWarning,
    },
}

impl GestureState {
    /// Whether no gesture is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
