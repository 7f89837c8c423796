//! Rendering of note lists.
//!
//! # Responsibility
//! - Build a display-agnostic view model from queried notes (`list`).
//! - Present that view model as plain text for terminal surfaces (`text`).
//!
//! # Invariants
//! - View model construction never touches storage or the terminal.

pub mod list;
pub mod text;
