//! Capacity gate: report sessions that would not fit their destination room.
//!
//! The gate never blocks anything by itself. It compares each cross-space
//! move's demand (`registered`, else `quota`) with the destination
//! capacity and returns the numbers; the caller decides whether a negative
//! deficit needs confirmation. Same-space moves are skipped since they cannot
//! change the fit.

#[cfg(test)]
#[path = "capacity_test.rs"]
mod capacity_test;

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use crate::index::GridIndex;
use crate::model::{SectionRef, SessionId, Space, SpaceId};
use crate::validate::Move;

/// Fit of one moving session in its destination space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapacityEntry {
    pub session_id: SessionId,
    pub section: SectionRef,
    pub space_id: SpaceId,
    pub demand: u32,
    pub capacity: u32,
    /// `capacity - demand`; negative means the room is too small.
    pub deficit: i64,
}

/// Capacity fit of every cross-space move in a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CapacityReport {
    pub entries: Vec<CapacityEntry>,
}

/// A session listed in a [`CapacityWarning`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AffectedSession {
    pub session_id: SessionId,
    pub section: SectionRef,
    pub demand: u32,
    pub deficit: i64,
}

/// What the confirmation UI shows before a forced commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapacityWarning {
    pub space_id: SpaceId,
    pub space_name: String,
    pub space_capacity: u32,
    pub affected: Vec<AffectedSession>,
}

impl CapacityReport {
    /// Entries whose destination is too small.
    pub fn flagged(&self) -> impl Iterator<Item = &CapacityEntry> {
        self.entries.iter().filter(|e| e.deficit < 0)
    }

    /// Whether any entry is capacity-negative.
    #[must_use]
    pub fn has_deficit(&self) -> bool {
        self.flagged().next().is_some()
    }

    /// Build the confirmation payload, or `None` when everything fits.
    #[must_use]
    pub fn warning(&self, spaces: &HashMap<SpaceId, Space>) -> Option<CapacityWarning> {
        let first = self.flagged().next()?;
        let (space_name, space_capacity) = spaces
            .get(&first.space_id)
            .map_or_else(|| (first.space_id.to_string(), first.capacity), |s| (s.name.clone(), s.capacity));
        let affected = self
            .flagged()
            .filter(|e| e.space_id == first.space_id)
            .map(|e| AffectedSession {
                session_id: e.session_id,
                section: e.section.clone(),
                demand: e.demand,
                deficit: e.deficit,
            })
            .collect();
        Some(CapacityWarning { space_id: first.space_id, space_name, space_capacity, affected })
    }
}

/// Evaluate the capacity fit of every move that changes space.
///
/// A destination space missing from `spaces` is treated as capacity 0.
#[must_use]
pub fn evaluate(moves: &[Move], index: &GridIndex, spaces: &HashMap<SpaceId, Space>) -> CapacityReport {
    let entries = moves
        .iter()
        .filter(|m| m.from.space_id != m.to.space_id)
        .filter_map(|m| {
            let session = index.session(&m.session_id)?;
            let capacity = if let Some(space) = spaces.get(&m.to.space_id) {
                space.capacity
            } else {
                warn!(space_id = %m.to.space_id, "destination space unknown; assuming zero capacity");
                0
            };
            let demand = session.demand();
            Some(CapacityEntry {
                session_id: session.id,
                section: session.section.clone(),
                space_id: m.to.space_id,
                demand,
                capacity,
                deficit: i64::from(capacity) - i64::from(demand),
            })
        })
        .collect();
    CapacityReport { entries }
}
