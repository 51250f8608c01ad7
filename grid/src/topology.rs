//! Module topology: the ragged day/slot layout of the board.
//!
//! Each day owns an ordered run of slots numbered `1..=n`, and `n` may differ
//! from day to day. A `Topology` is an immutable snapshot; the engine re-reads
//! it at the start of the next gesture rather than reacting to edits live.

#[cfg(test)]
#[path = "topology_test.rs"]
mod topology_test;

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::consts::FIRST_ORDER;
use crate::model::{DayId, Slot, SlotId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    #[error("duplicate slot id: {0}")]
    DuplicateSlot(SlotId),
    #[error("day {day_id} has two slots with order {order}")]
    DuplicateOrder { day_id: DayId, order: u32 },
    #[error("day {day_id} is missing order {expected}")]
    OrderGap { day_id: DayId, expected: u32 },
}

/// Read-only description of the ragged grid.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    /// Slots per day, sorted by `order` ascending.
    days: BTreeMap<DayId, Vec<Slot>>,
    /// Slot id -> (day, position in that day's vec).
    by_id: HashMap<SlotId, (DayId, usize)>,
}

impl Topology {
    /// Build a topology from an unordered list of slots.
    ///
    /// # Errors
    ///
    /// Returns an error if slot ids repeat, or if any day's orders are not
    /// exactly `1..=n`.
    pub fn new(slots: Vec<Slot>) -> Result<Self, TopologyError> {
        let mut days: BTreeMap<DayId, Vec<Slot>> = BTreeMap::new();
        let mut seen = HashSet::with_capacity(slots.len());
        for slot in slots {
            if !seen.insert(slot.id) {
                return Err(TopologyError::DuplicateSlot(slot.id));
            }
            days.entry(slot.day_id).or_default().push(slot);
        }

        let mut by_id = HashMap::with_capacity(seen.len());
        for (day_id, day_slots) in &mut days {
            day_slots.sort_by_key(|s| s.order);
            let mut expected = FIRST_ORDER;
            for (pos, slot) in day_slots.iter().enumerate() {
                if slot.order < expected {
                    return Err(TopologyError::DuplicateOrder { day_id: *day_id, order: slot.order });
                }
                if slot.order > expected {
                    return Err(TopologyError::OrderGap { day_id: *day_id, expected });
                }
                by_id.insert(slot.id, (*day_id, pos));
                expected += 1;
            }
        }

        Ok(Self { days, by_id })
    }

    /// Slots of `day_id` ordered by `order`. Empty when the day is unknown.
    #[must_use]
    pub fn slots_for_day(&self, day_id: DayId) -> &[Slot] {
        self.days.get(&day_id).map_or(&[], Vec::as_slice)
    }

    /// The slot at `order` within `day_id`, if any.
    #[must_use]
    pub fn slot_at(&self, day_id: DayId, order: i64) -> Option<&Slot> {
        if order < i64::from(FIRST_ORDER) {
            return None;
        }
        let pos = usize::try_from(order - i64::from(FIRST_ORDER)).ok()?;
        self.days.get(&day_id)?.get(pos)
    }

    /// Look up a slot by its global id.
    #[must_use]
    pub fn slot(&self, slot_id: SlotId) -> Option<&Slot> {
        let (day_id, pos) = self.by_id.get(&slot_id)?;
        self.days.get(day_id)?.get(*pos)
    }

    /// Number of slots in `day_id`; zero when the day is unknown.
    #[must_use]
    pub fn slot_count(&self, day_id: DayId) -> usize {
        self.slots_for_day(day_id).len()
    }

    /// Whether `day_id` has at least one slot.
    #[must_use]
    pub fn contains_day(&self, day_id: DayId) -> bool {
        self.days.contains_key(&day_id)
    }

    /// All day ids in ascending order.
    pub fn days(&self) -> impl Iterator<Item = DayId> + '_ {
        self.days.keys().copied()
    }

    /// Total number of slots across all days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
