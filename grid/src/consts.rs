//! Shared numeric constants for the grid crate.

// ── Index ───────────────────────────────────────────────────────

/// Session count above which an index rebuild is reported as large.
///
/// Interactive hosts may choose to defer rebuilds past this size; the engine
/// itself always rebuilds synchronously.
pub const LARGE_INDEX_THRESHOLD: usize = 100;

// ── Topology ────────────────────────────────────────────────────

/// First order value within a day. Orders are dense and 1-based.
pub const FIRST_ORDER: u32 = 1;
