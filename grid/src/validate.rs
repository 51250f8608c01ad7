//! All-or-nothing destination occupancy check.
//!
//! A batch of candidate moves is accepted only if every destination resolved
//! and every destination cell is either free or held by a session that is
//! itself leaving as part of the same batch. One conflict anywhere rejects
//! the whole batch; nothing is partially applied.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::index::GridIndex;
use crate::model::{Cell, SessionId};
use crate::translate::CandidateMove;

/// A fully resolved move: one session from one cell to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Move {
    pub session_id: SessionId,
    pub from: Cell,
    pub to: Cell,
}

/// One reason a batch was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Conflict {
    /// Translation found no slot for this session.
    Unresolvable { session_id: SessionId },
    /// The destination holds sessions that are not moving out.
    Occupied { cell: Cell, occupants: Vec<SessionId> },
    /// Two members of the batch resolved to the same cell.
    Duplicate { cell: Cell },
}

/// Every conflict found in a rejected batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("move batch rejected: {}", Summary(.0))]
pub struct ValidationError(pub Vec<Conflict>);

impl ValidationError {
    /// The conflicts that blocked the batch.
    #[must_use]
    pub fn conflicts(&self) -> &[Conflict] {
        &self.0
    }

    /// Cells that blocked the batch, for highlighting.
    #[must_use]
    pub fn blocked_cells(&self) -> Vec<Cell> {
        self.0
            .iter()
            .filter_map(|c| match c {
                Conflict::Occupied { cell, .. } | Conflict::Duplicate { cell } => Some(*cell),
                Conflict::Unresolvable { .. } => None,
            })
            .collect()
    }

    /// Whether any session had no destination at all.
    #[must_use]
    pub fn has_unresolvable(&self) -> bool {
        self.0.iter().any(|c| matches!(c, Conflict::Unresolvable { .. }))
    }
}

struct Summary<'a>(&'a [Conflict]);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unresolvable = self.0.iter().filter(|c| matches!(c, Conflict::Unresolvable { .. })).count();
        let blocked = self.0.len() - unresolvable;
        write!(f, "{blocked} blocked cell(s), {unresolvable} unresolvable destination(s)")
    }
}

/// Check `candidates` against the current occupancy in `index`.
///
/// # Errors
///
/// Returns every conflict found when any destination is unresolvable,
/// occupied by a session outside the batch, or claimed twice.
pub fn validate(candidates: &[CandidateMove], index: &GridIndex) -> Result<Vec<Move>, ValidationError> {
    let leaving: HashSet<SessionId> = candidates.iter().map(|c| c.session_id).collect();
    let mut claimed: HashMap<Cell, SessionId> = HashMap::with_capacity(candidates.len());
    let mut conflicts = Vec::new();
    let mut moves = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let Some(to) = candidate.to else {
            conflicts.push(Conflict::Unresolvable { session_id: candidate.session_id });
            continue;
        };

        if claimed.insert(to, candidate.session_id).is_some() {
            conflicts.push(Conflict::Duplicate { cell: to });
            continue;
        }

        let foreign: Vec<SessionId> = index
            .occupants(&to)
            .iter()
            .filter(|id| !leaving.contains(*id))
            .copied()
            .collect();
        if !foreign.is_empty() {
            conflicts.push(Conflict::Occupied { cell: to, occupants: foreign });
            continue;
        }

        moves.push(Move { session_id: candidate.session_id, from: candidate.from, to });
    }

    if conflicts.is_empty() { Ok(moves) } else { Err(ValidationError(conflicts)) }
}

/// Hover state of one candidate destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStatus {
    /// Nobody is there.
    Free,
    /// Occupied only by sessions that move out in this same batch.
    Vacating,
    /// Held by a session outside the batch, or claimed twice by the batch.
    Occupied,
    /// Translation found no slot.
    Unresolvable,
}

/// Occupancy preview for one moving session, recomputed on every hover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreviewCell {
    pub session_id: SessionId,
    pub cell: Option<Cell>,
    pub status: CellStatus,
}

/// Classify every candidate destination without rejecting anything.
#[must_use]
pub fn preview(candidates: &[CandidateMove], index: &GridIndex) -> Vec<PreviewCell> {
    let leaving: HashSet<SessionId> = candidates.iter().map(|c| c.session_id).collect();
    let mut claimed: HashSet<Cell> = HashSet::with_capacity(candidates.len());

    candidates
        .iter()
        .map(|candidate| {
            let status = match candidate.to {
                None => CellStatus::Unresolvable,
                Some(to) if !claimed.insert(to) => CellStatus::Occupied,
                Some(to) => {
                    let occupants = index.occupants(&to);
                    if occupants.is_empty() {
                        CellStatus::Free
                    } else if occupants.iter().all(|id| leaving.contains(id)) {
                        CellStatus::Vacating
                    } else {
                        CellStatus::Occupied
                    }
                }
            };
            PreviewCell { session_id: candidate.session_id, cell: candidate.to, status }
        })
        .collect()
}
