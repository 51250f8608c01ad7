#![allow(clippy::cast_possible_wrap)]

use super::*;

fn slot(id: SlotId, day_id: DayId, order: u32) -> Slot {
    Slot { id, day_id, order, start_time: String::new(), end_time: String::new() }
}

/// Day `d` gets `counts[d - 1]` slots with ids `d * 100 + order`.
fn ragged(counts: &[u32]) -> Topology {
    let mut slots = Vec::new();
    for (i, count) in counts.iter().enumerate() {
        let day_id = i as DayId + 1;
        for order in 1..=*count {
            slots.push(slot(day_id * 100 + i64::from(order), day_id, order));
        }
    }
    Topology::new(slots).unwrap()
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_sorts_slots_by_order() {
    let topo = Topology::new(vec![slot(3, 1, 3), slot(1, 1, 1), slot(2, 1, 2)]).unwrap();
    let orders: Vec<u32> = topo.slots_for_day(1).iter().map(|s| s.order).collect();
    assert_eq!(orders, vec![1, 2, 3]);
}

#[test]
fn new_rejects_duplicate_slot_id() {
    let err = Topology::new(vec![slot(1, 1, 1), slot(1, 2, 1)]).unwrap_err();
    assert_eq!(err, TopologyError::DuplicateSlot(1));
}

#[test]
fn new_rejects_duplicate_order() {
    let err = Topology::new(vec![slot(1, 1, 1), slot(2, 1, 1)]).unwrap_err();
    assert_eq!(err, TopologyError::DuplicateOrder { day_id: 1, order: 1 });
}

#[test]
fn new_rejects_gap() {
    let err = Topology::new(vec![slot(1, 1, 1), slot(3, 1, 3)]).unwrap_err();
    assert_eq!(err, TopologyError::OrderGap { day_id: 1, expected: 2 });
}

#[test]
fn new_rejects_day_not_starting_at_one() {
    let err = Topology::new(vec![slot(1, 4, 2)]).unwrap_err();
    assert_eq!(err, TopologyError::OrderGap { day_id: 4, expected: 1 });
}

#[test]
fn empty_topology() {
    let topo = Topology::new(Vec::new()).unwrap();
    assert!(topo.is_empty());
    assert_eq!(topo.len(), 0);
    assert_eq!(topo.days().count(), 0);
}

// =============================================================
// Queries
// =============================================================

#[test]
fn ragged_days_have_their_own_lengths() {
    let topo = ragged(&[6, 4, 5]);
    assert_eq!(topo.slot_count(1), 6);
    assert_eq!(topo.slot_count(2), 4);
    assert_eq!(topo.slot_count(3), 5);
    assert_eq!(topo.len(), 15);
    assert_eq!(topo.days().collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn slot_at_finds_by_day_and_order() {
    let topo = ragged(&[6, 4]);
    let s = topo.slot_at(2, 4).unwrap();
    assert_eq!(s.id, 204);
    assert_eq!(s.day_id, 2);
    assert_eq!(s.order, 4);
}

#[test]
fn slot_at_out_of_range_is_none() {
    let topo = ragged(&[6, 4]);
    assert!(topo.slot_at(2, 5).is_none());
    assert!(topo.slot_at(2, 0).is_none());
    assert!(topo.slot_at(2, -3).is_none());
    assert!(topo.slot_at(9, 1).is_none());
}

#[test]
fn slot_by_id_round_trips_through_day_lookup() {
    let topo = ragged(&[3, 2]);
    let s = topo.slot(202).unwrap();
    assert_eq!(s.day_id, 2);
    assert_eq!(s.order, 2);
    assert!(topo.slot(999).is_none());
}

#[test]
fn unknown_day_is_empty() {
    let topo = ragged(&[3]);
    assert!(topo.slots_for_day(7).is_empty());
    assert_eq!(topo.slot_count(7), 0);
    assert!(!topo.contains_day(7));
    assert!(topo.contains_day(1));
}
