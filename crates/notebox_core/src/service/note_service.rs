//! Note use-case service.
//!
//! # Responsibility
//! - Provide create/update/remove over the persisted note collection.
//! - Resolve user-supplied id references (full UUID or unique prefix).
//!
//! # Invariants
//! - Every mutation reloads the collection before changing it; nothing is
//!   cached between calls.
//! - New notes are prepended, so persisted order is newest-created first.
//! - Update/remove on an unknown id change nothing and write nothing.
//! - Concurrent writers race; the last `save` wins.

use crate::model::note::{Note, NoteId};
use crate::repo::note_store::{NoteStore, RepoError};
use crate::service::clock::{Clock, SystemClock};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// No note matches the given id reference.
    NoteNotFound(String),
    /// Id prefix matches more than one note.
    AmbiguousId { reference: String, matches: usize },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(reference) => write!(f, "note not found: {reference}"),
            Self::AmbiguousId { reference, matches } => write!(
                f,
                "id prefix `{reference}` matches {matches} notes; use a longer prefix"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Note service facade over a persistence adapter.
pub struct NoteService<S: NoteStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
}

impl<S: NoteStore> NoteService<S> {
    /// Creates a service stamping notes with wall-clock time.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: NoteStore, C: Clock> NoteService<S, C> {
    /// Creates a service using a custom time source.
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Returns the underlying persistence adapter.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current instant according to the service clock.
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    /// Creates a note and prepends it to the stored collection.
    ///
    /// Does not check for blank input; callers enforce that.
    pub fn create(
        &self,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Note, NoteServiceError> {
        let note = Note::new(title, body, self.clock.now());
        let mut notes = self.store.load();
        notes.insert(0, note.clone());
        self.store.save(&notes)?;

        info!(
            "event=note_create module=service status=ok note_id={} count={}",
            note.id,
            notes.len()
        );
        Ok(note)
    }

    /// Replaces title and body of one note and refreshes `updated`.
    ///
    /// Returns `Ok(None)` without writing when `id` is unknown.
    pub fn update(
        &self,
        id: NoteId,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Option<Note>, NoteServiceError> {
        let mut notes = self.store.load();
        let Some(slot) = notes.iter_mut().find(|note| note.id == id) else {
            info!("event=note_update module=service status=skipped note_id={id} reason=not_found");
            return Ok(None);
        };

        let edited = slot.edited(title, body, self.clock.now());
        *slot = edited.clone();
        self.store.save(&notes)?;

        info!("event=note_update module=service status=ok note_id={id}");
        Ok(Some(edited))
    }

    /// Removes one note.
    ///
    /// Returns `Ok(None)` without writing when `id` is unknown.
    pub fn remove(&self, id: NoteId) -> Result<Option<Note>, NoteServiceError> {
        let mut notes = self.store.load();
        let Some(position) = notes.iter().position(|note| note.id == id) else {
            info!("event=note_remove module=service status=skipped note_id={id} reason=not_found");
            return Ok(None);
        };

        let removed = notes.remove(position);
        self.store.save(&notes)?;

        info!(
            "event=note_remove module=service status=ok note_id={id} count={}",
            notes.len()
        );
        Ok(Some(removed))
    }

    /// Loads the collection in persisted order.
    pub fn list(&self) -> Vec<Note> {
        self.store.load()
    }

    /// Gets one note by id.
    pub fn get(&self, id: NoteId) -> Option<Note> {
        self.store.load().into_iter().find(|note| note.id == id)
    }

    /// Resolves a full UUID or a unique, case-insensitive UUID prefix.
    pub fn resolve(&self, reference: &str) -> Result<NoteId, NoteServiceError> {
        let reference = reference.trim();
        let notes = self.store.load();

        if let Ok(id) = Uuid::parse_str(reference) {
            return notes
                .iter()
                .find(|note| note.id == id)
                .map(|note| note.id)
                .ok_or_else(|| NoteServiceError::NoteNotFound(reference.to_string()));
        }

        let prefix = reference.to_ascii_lowercase();
        if prefix.is_empty() {
            return Err(NoteServiceError::NoteNotFound(reference.to_string()));
        }

        let matches: Vec<NoteId> = notes
            .iter()
            .filter(|note| note.id.to_string().starts_with(prefix.as_str()))
            .map(|note| note.id)
            .collect();
        match matches.as_slice() {
            [] => Err(NoteServiceError::NoteNotFound(reference.to_string())),
            [id] => Ok(*id),
            _ => Err(NoteServiceError::AmbiguousId {
                reference: reference.to_string(),
                matches: matches.len(),
            }),
        }
    }
}
