//! Shape-preserving translation of a dragged selection across a ragged grid.
//!
//! ALGORITHM
//! =========
//! Every moving session keeps its `(order, day)` offset from the anchor (the
//! session under the pointer at drag start). The offset is re-applied at the
//! drop target to get a provisional `(day, order)`:
//!
//! - inside the day's range: that slot is the destination;
//! - past the end of the day: wrap forward once onto `day + 1`, continuing
//!   the count from order 1;
//! - before the start of the day: wrap backward once onto `day - 1`,
//!   counting back from its last slot.
//!
//! Only one wrap is attempted. A position that still misses the topology,
//! or a provisional day the topology does not have, is unresolvable and the
//! caller must reject the whole batch.
//!
//! Destination space is always the target's space: a selection never spans
//! more than one space.

#[cfg(test)]
#[path = "translate_test.rs"]
mod translate_test;

use tracing::debug;

use crate::consts::FIRST_ORDER;
use crate::index::GridIndex;
use crate::model::{Cell, DayId, SessionId, Slot, SlotId};
use crate::topology::Topology;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("session not found: {0}")]
    UnknownSession(SessionId),
    #[error("slot not in topology: {0}")]
    UnknownSlot(SlotId),
    #[error("session {0} is not in the same space and day as the rest of the selection")]
    CrossSpaceOrCrossDay(SessionId),
}

/// Which day boundary, if any, a destination was wrapped across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Wrap {
    /// Landed inside the provisional day.
    #[default]
    None,
    /// Overflowed the provisional day and continued on the next day.
    Forward,
    /// Underflowed the provisional day and continued on the previous day.
    Backward,
}

/// Computed destination for one moving session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateMove {
    /// The session being moved.
    pub session_id: SessionId,
    /// Where it is now.
    pub from: Cell,
    /// Where it would land; `None` when unresolvable.
    pub to: Option<Cell>,
    /// Day boundary crossed while resolving `to`.
    pub wrap: Wrap,
}

impl CandidateMove {
    /// Whether the destination equals the source.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.to == Some(self.from)
    }
}

/// Translate `moving` so that `anchor` lands on `target`.
///
/// If `anchor` is not a member of `moving` (or `moving` is empty), only the
/// anchor itself is moved.
///
/// # Errors
///
/// Returns `UnknownSession`/`UnknownSlot` when an id is missing from the
/// index or topology, and `CrossSpaceOrCrossDay` when a selection member
/// does not share space and day with the first member.
pub fn translate(
    topology: &Topology,
    index: &GridIndex,
    anchor: SessionId,
    moving: &[SessionId],
    target: Cell,
) -> Result<Vec<CandidateMove>, TranslateError> {
    let movers: &[SessionId] = if moving.contains(&anchor) { moving } else { std::slice::from_ref(&anchor) };

    let anchor_slot = slot_of(topology, index, anchor)?;
    let target_slot = topology
        .slot(target.slot_id)
        .ok_or(TranslateError::UnknownSlot(target.slot_id))?;

    check_selection(topology, index, movers)?;

    let mut out = Vec::with_capacity(movers.len());
    for &session_id in movers {
        let origin = slot_of(topology, index, session_id)?;
        let from = index
            .cell_of(&session_id)
            .ok_or(TranslateError::UnknownSession(session_id))?;

        let order_offset = i64::from(origin.order) - i64::from(anchor_slot.order);
        let day_id = origin
            .day_id
            .checked_sub(anchor_slot.day_id)
            .and_then(|offset| target_slot.day_id.checked_add(offset));
        let order = i64::from(target_slot.order) + order_offset;

        let (to, wrap) = match day_id.and_then(|day_id| resolve(topology, day_id, order)) {
            Some((slot, wrap)) => (Some(Cell::new(target.space_id, slot.id)), wrap),
            None => {
                debug!(%session_id, ?day_id, order, "translated position is outside the topology");
                (None, Wrap::None)
            }
        };
        out.push(CandidateMove { session_id, from, to, wrap });
    }
    Ok(out)
}

/// Resolve a provisional `(day, order)` to a slot, wrapping at most once.
fn resolve(topology: &Topology, day_id: DayId, order: i64) -> Option<(&Slot, Wrap)> {
    if !topology.contains_day(day_id) {
        return None;
    }
    if let Some(slot) = topology.slot_at(day_id, order) {
        return Some((slot, Wrap::None));
    }

    let count = i64::try_from(topology.slot_count(day_id)).ok()?;
    if order > count {
        let slot = topology.slot_at(day_id.checked_add(1)?, order - count)?;
        return Some((slot, Wrap::Forward));
    }
    if order < i64::from(FIRST_ORDER) {
        let prev_day = day_id.checked_sub(1)?;
        let prev_count = i64::try_from(topology.slot_count(prev_day)).ok()?;
        let slot = topology.slot_at(prev_day, prev_count + order)?;
        return Some((slot, Wrap::Backward));
    }
    None
}

fn slot_of<'t>(topology: &'t Topology, index: &GridIndex, id: SessionId) -> Result<&'t Slot, TranslateError> {
    let session = index.session(&id).ok_or(TranslateError::UnknownSession(id))?;
    topology
        .slot(session.slot_id)
        .ok_or(TranslateError::UnknownSlot(session.slot_id))
}

/// Every member must share the first member's space and day.
fn check_selection(topology: &Topology, index: &GridIndex, movers: &[SessionId]) -> Result<(), TranslateError> {
    let Some((&first, rest)) = movers.split_first() else {
        return Ok(());
    };
    let first_space = index
        .session(&first)
        .ok_or(TranslateError::UnknownSession(first))?
        .space_id;
    let first_day = slot_of(topology, index, first)?.day_id;

    for &id in rest {
        let session = index.session(&id).ok_or(TranslateError::UnknownSession(id))?;
        let day = slot_of(topology, index, id)?.day_id;
        if session.space_id != first_space || day != first_day {
            return Err(TranslateError::CrossSpaceOrCrossDay(id));
        }
    }
    Ok(())
}
