//! Board model: spaces, slots, sessions, and the cells they occupy.
//!
//! These are the records the engine reads. `Space` and `Slot` are
//! configuration data owned by the surrounding application; `Session` is the
//! only record the engine ever relocates, and only through a committed
//! [`crate::engine::MoveBatch`]. `Cell` is derived: it exists only as an
//! index key and is never persisted.
//!
//! Data flows into this layer from the host snapshot (JSON deserialization)
//! and out again as move previews.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a scheduled session.
pub type SessionId = Uuid;

/// Unique identifier for a physical space (room).
pub type SpaceId = Uuid;

/// Global identifier of a slot (one module within one day).
pub type SlotId = i64;

/// Ordinal day identifier. Adjacent days differ by one.
pub type DayId = i64;

/// A physical room that sessions are scheduled into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    /// Unique identifier for this space.
    pub id: SpaceId,
    /// Display name, shown in capacity warnings.
    pub name: String,
    /// Number of seats.
    pub capacity: u32,
    /// Size class label (opaque to the engine).
    #[serde(default)]
    pub size: String,
    /// Building label (opaque to the engine).
    #[serde(default)]
    pub building: String,
    /// Room type label (opaque to the engine).
    #[serde(default)]
    pub kind: String,
}

/// One module within one day: a single grid column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Global identifier for this slot.
    pub id: SlotId,
    /// The day this slot belongs to.
    pub day_id: DayId,
    /// 1-based position within the day. Dense, no gaps.
    pub order: u32,
    /// Start time label (opaque to the engine).
    #[serde(default)]
    pub start_time: String,
    /// End time label (opaque to the engine).
    #[serde(default)]
    pub end_time: String,
}

/// Display reference to the section a session belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRef {
    /// Subject name.
    #[serde(default)]
    pub subject: String,
    /// Academic period label.
    #[serde(default)]
    pub period: String,
    /// Course/section code.
    #[serde(default)]
    pub code: String,
}

/// One scheduled occurrence of a class, occupying exactly one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session.
    pub id: SessionId,
    /// Owning section, for display.
    #[serde(default)]
    pub section: SectionRef,
    /// The space (row) this session is scheduled in.
    pub space_id: SpaceId,
    /// The slot (column) this session is scheduled in.
    pub slot_id: SlotId,
    /// Enrolled student count, when known.
    pub registered: Option<u32>,
    /// Planned seat quota.
    pub quota: u32,
}

impl Session {
    /// The cell this session currently occupies.
    #[must_use]
    pub fn cell(&self) -> Cell {
        Cell { space_id: self.space_id, slot_id: self.slot_id }
    }

    /// Seats this session needs: `registered` when known, otherwise `quota`.
    #[must_use]
    pub fn demand(&self) -> u32 {
        self.registered.unwrap_or(self.quota)
    }
}

/// The intersection of a space (row) and a slot (column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// Row.
    pub space_id: SpaceId,
    /// Column.
    pub slot_id: SlotId,
}

impl Cell {
    #[must_use]
    pub fn new(space_id: SpaceId, slot_id: SlotId) -> Self {
        Self { space_id, slot_id }
    }
}
