//! Domain model for memos and their priority classification.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep one record shape shared by service and persistence layers.
//!
//! # Invariants
//! - Persisted memos always carry a positive storage-assigned `MemoId`.
//! - Priority is a closed, totally ordered set; no other values exist.

pub mod memo;
pub mod priority;
