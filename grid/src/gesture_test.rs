use uuid::Uuid;

use super::*;

// =============================================================
// Selection
// =============================================================

#[test]
fn selection_starts_empty() {
    let sel = Selection::new();
    assert!(sel.is_empty());
    assert_eq!(sel.len(), 0);
    assert_eq!(sel.row(), None);
}

#[test]
fn toggle_adds_in_order() {
    let room = Uuid::new_v4();
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let mut sel = Selection::new();
    sel.toggle(a, room, 1);
    sel.toggle(b, room, 1);
    assert_eq!(sel.members(), &[a, b]);
    assert_eq!(sel.row(), Some((room, 1)));
    assert!(sel.contains(&a));
}

#[test]
fn toggle_twice_removes() {
    let room = Uuid::new_v4();
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let mut sel = Selection::new();
    sel.toggle(a, room, 1);
    sel.toggle(b, room, 1);
    sel.toggle(a, room, 1);
    assert_eq!(sel.members(), &[b]);
}

#[test]
fn toggle_last_member_clears_row() {
    let room = Uuid::new_v4();
    let a = Uuid::new_v4();
    let mut sel = Selection::new();
    sel.toggle(a, room, 1);
    sel.toggle(a, room, 1);
    assert!(sel.is_empty());
    assert_eq!(sel.row(), None);
}

#[test]
fn toggle_other_space_restarts_selection() {
    let (room1, room2) = (Uuid::new_v4(), Uuid::new_v4());
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let mut sel = Selection::new();
    sel.toggle(a, room1, 1);
    sel.toggle(b, room2, 1);
    assert_eq!(sel.members(), &[b]);
    assert_eq!(sel.row(), Some((room2, 1)));
}

#[test]
fn toggle_other_day_restarts_selection() {
    let room = Uuid::new_v4();
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let mut sel = Selection::new();
    sel.toggle(a, room, 1);
    sel.toggle(b, room, 2);
    assert_eq!(sel.members(), &[b]);
    assert_eq!(sel.row(), Some((room, 2)));
}

#[test]
fn remove_and_clear() {
    let room = Uuid::new_v4();
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let mut sel = Selection::new();
    sel.toggle(a, room, 3);
    sel.toggle(b, room, 3);
    sel.remove(&a);
    assert_eq!(sel.members(), &[b]);
    sel.clear();
    assert!(sel.is_empty());
    assert_eq!(sel.row(), None);
}

// =============================================================
// GestureState
// =============================================================

#[test]
fn gesture_default_is_idle() {
    assert!(GestureState::default().is_idle());
}

#[test]
fn dragging_is_not_idle() {
    let anchor = Uuid::new_v4();
    let state = GestureState::Dragging { anchor, moving: vec![anchor], preview: Vec::new() };
    assert!(!state.is_idle());
}
