//! Grid translation and occupancy engine for the section-scheduling board.
//!
//! The board is a ragged 2-D grid: rows are spaces (rooms), columns are
//! slots (a module within a day), and each cell holds at most one class
//! session. This crate owns everything between "the user grabbed a session"
//! and "here is the batch of moves to persist": indexing sessions by cell,
//! translating a dragged selection onto a new anchor while keeping its shape,
//! checking destination occupancy all-or-nothing, and flagging capacity
//! deficits that need explicit confirmation. Persistence is left to the host,
//! which hands [`engine::MoveBatch`]es to its own commit layer.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::Board`] facade and drop outcomes |
//! | [`model`] | Spaces, slots, sessions, and cells |
//! | [`topology`] | Read-only ragged day/slot layout |
//! | [`index`] | Cell-to-session occupancy index |
//! | [`translate`] | Shape-preserving translation with one-hop day wrap |
//! | [`validate`] | All-or-nothing destination occupancy check |
//! | [`capacity`] | Capacity deficit report for cross-space moves |
//! | [`gesture`] | Selection and the drag gesture state machine |
//! | [`consts`] | Shared numeric constants |

pub mod capacity;
pub mod consts;
pub mod engine;
pub mod gesture;
pub mod index;
pub mod model;
pub mod topology;
pub mod translate;
pub mod validate;
