//! Domain model for persisted notes.
//!
//! # Responsibility
//! - Define the canonical note record used by every core layer.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Deletion removes the record; there are no tombstones.

pub mod note;
