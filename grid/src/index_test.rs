use uuid::Uuid;

use super::*;
use crate::model::SectionRef;

fn make_session(space_id: SpaceId, slot_id: SlotId) -> Session {
    Session {
        id: Uuid::new_v4(),
        section: SectionRef::default(),
        space_id,
        slot_id,
        registered: None,
        quota: 30,
    }
}

// =============================================================
// Rebuild
// =============================================================

#[test]
fn index_for_empty() {
    let index = GridIndex::index_for(Vec::new());
    assert!(index.is_empty());
    assert_eq!(index.len(), 0);
}

#[test]
fn index_for_maps_each_cell() {
    let room = Uuid::new_v4();
    let a = make_session(room, 1);
    let b = make_session(room, 2);
    let index = GridIndex::index_for(vec![a.clone(), b.clone()]);

    assert_eq!(index.len(), 2);
    assert_eq!(index.occupants(&a.cell()), &[a.id]);
    assert_eq!(index.occupants(&b.cell()), &[b.id]);
    assert!(index.occupants(&Cell::new(room, 3)).is_empty());
}

#[test]
fn cell_sessions_empty_for_free_cell() {
    let index = GridIndex::index_for(vec![make_session(Uuid::new_v4(), 1)]);
    assert!(index.cell_sessions(Uuid::new_v4(), 1).is_empty());
}

#[test]
fn co_occupied_cell_exposes_all_occupants() {
    let room = Uuid::new_v4();
    let a = make_session(room, 4);
    let b = make_session(room, 4);
    let index = GridIndex::index_for(vec![a.clone(), b.clone()]);

    let here = index.cell_sessions(room, 4);
    assert_eq!(here.len(), 2);
    assert!(here.iter().any(|s| s.id == a.id));
    assert!(here.iter().any(|s| s.id == b.id));
    assert!(index.is_occupied(&Cell::new(room, 4)));
}

#[test]
fn index_for_many_sessions() {
    let room = Uuid::new_v4();
    let sessions: Vec<Session> = (0..250).map(|slot| make_session(room, slot)).collect();
    let index = GridIndex::index_for(sessions);
    assert_eq!(index.len(), 250);
    assert!(index.is_occupied(&Cell::new(room, 249)));
}

// =============================================================
// Incremental updates
// =============================================================

#[test]
fn insert_replaces_same_id_and_moves_cell() {
    let room = Uuid::new_v4();
    let mut s = make_session(room, 1);
    let mut index = GridIndex::index_for(vec![s.clone()]);

    s.slot_id = 2;
    index.insert(s.clone());

    assert_eq!(index.len(), 1);
    assert!(!index.is_occupied(&Cell::new(room, 1)));
    assert_eq!(index.occupants(&Cell::new(room, 2)), &[s.id]);
}

#[test]
fn remove_clears_cell() {
    let room = Uuid::new_v4();
    let s = make_session(room, 1);
    let mut index = GridIndex::index_for(vec![s.clone()]);

    let removed = index.remove(&s.id).unwrap();
    assert_eq!(removed.id, s.id);
    assert!(index.is_empty());
    assert!(!index.is_occupied(&s.cell()));
    assert!(index.remove(&s.id).is_none());
}

#[test]
fn relocate_returns_previous_cell() {
    let room_a = Uuid::new_v4();
    let room_b = Uuid::new_v4();
    let s = make_session(room_a, 1);
    let mut index = GridIndex::index_for(vec![s.clone()]);

    let from = index.relocate(&s.id, Cell::new(room_b, 5)).unwrap();
    assert_eq!(from, Cell::new(room_a, 1));
    assert_eq!(index.cell_of(&s.id), Some(Cell::new(room_b, 5)));
    assert!(!index.is_occupied(&from));
    let moved = index.session(&s.id).unwrap();
    assert_eq!(moved.space_id, room_b);
    assert_eq!(moved.slot_id, 5);
}

#[test]
fn relocate_to_same_cell_is_noop() {
    let room = Uuid::new_v4();
    let s = make_session(room, 1);
    let mut index = GridIndex::index_for(vec![s.clone()]);

    let from = index.relocate(&s.id, s.cell()).unwrap();
    assert_eq!(from, s.cell());
    assert_eq!(index.occupants(&s.cell()), &[s.id]);
}

#[test]
fn relocate_unknown_session_is_none() {
    let mut index = GridIndex::new();
    assert!(index.relocate(&Uuid::new_v4(), Cell::new(Uuid::nil(), 1)).is_none());
}

#[test]
fn relocate_out_of_shared_cell_keeps_other_occupant() {
    let room = Uuid::new_v4();
    let a = make_session(room, 4);
    let b = make_session(room, 4);
    let mut index = GridIndex::index_for(vec![a.clone(), b.clone()]);

    index.relocate(&a.id, Cell::new(room, 5));
    assert_eq!(index.occupants(&Cell::new(room, 4)), &[b.id]);
    assert_eq!(index.occupants(&Cell::new(room, 5)), &[a.id]);
}
