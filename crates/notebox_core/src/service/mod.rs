//! Note use-case services.
//!
//! # Responsibility
//! - Orchestrate load-mutate-save cycles into create/update/remove APIs.
//! - Keep UI and controller layers decoupled from storage details.

pub mod clock;
pub mod note_service;
