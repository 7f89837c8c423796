//! Persistence adapter for the note collection.
//!
//! # Responsibility
//! - Define the load/save contract the service layer depends on.
//! - Isolate blob encoding and SQLite details from business orchestration.
//!
//! # Invariants
//! - The whole collection lives under one storage key.
//! - Malformed persisted data degrades to an empty collection, never an error.

pub mod note_store;
