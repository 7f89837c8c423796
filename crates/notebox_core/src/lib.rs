//! Core logic for notebox, a small local note keeper.
//! Owns persistence, querying, list rendering and the interaction state machine.

pub mod controller;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod view;

pub use controller::{
    ControllerError, EditDraft, Event, Mode, NotesController, Update, EMPTY_SUBMIT_ALERT,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use query::engine::{apply, SortOrder};
pub use repo::note_store::{
    MemoryNoteStore, NoteStore, RepoError, RepoResult, SqliteNoteStore, STORAGE_KEY,
};
pub use service::clock::{Clock, ManualClock, SystemClock};
pub use service::note_service::{NoteService, NoteServiceError};
pub use view::list::{render_list, ListView, NoteAction, NoteItemView};
pub use view::text::render_text;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
