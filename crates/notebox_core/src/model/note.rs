//! Note domain model.
//!
//! # Responsibility
//! - Define the single persisted record (`Note`) and its identity type.
//! - Provide lifecycle helpers for creation and in-place edits.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `created` never changes after construction.
//! - `updated >= created` for every valid note.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// Validation failures for note invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// `updated` is earlier than `created`.
    UpdatedBeforeCreated {
        id: NoteId,
        created: DateTime<Utc>,
        updated: DateTime<Utc>,
    },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UpdatedBeforeCreated {
                id,
                created,
                updated,
            } => write!(
                f,
                "note {id} has updated ({updated}) earlier than created ({created})"
            ),
        }
    }
}

impl Error for NoteValidationError {}

/// A single user-authored note.
///
/// Field names match the persisted JSON record: `id, title, body, created,
/// updated`. Timestamps serialize as RFC 3339 UTC strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// May be empty.
    pub title: String,
    /// May be empty.
    pub body: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Note {
    /// Creates a note with a freshly generated id and `created == updated == now`.
    pub fn new(title: impl Into<String>, body: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4(), title, body, now)
    }

    /// Creates a note with a caller-provided id.
    ///
    /// Used by tests and import paths where identity already exists.
    pub fn with_id(
        id: NoteId,
        title: impl Into<String>,
        body: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            created: now,
            updated: now,
        }
    }

    /// Returns an edited copy carrying the same `id` and `created`.
    ///
    /// `updated` is clamped to `created` when the clock reads earlier than
    /// creation time, so the edited value always validates.
    pub fn edited(
        &self,
        title: impl Into<String>,
        body: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: self.id,
            title: title.into(),
            body: body.into(),
            created: self.created,
            updated: now.max(self.created),
        }
    }

    /// Checks timestamp ordering.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.updated < self.created {
            return Err(NoteValidationError::UpdatedBeforeCreated {
                id: self.id,
                created: self.created,
                updated: self.updated,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteValidationError};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn new_note_has_equal_timestamps() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let note = Note::new("title", "", now);
        assert_eq!(note.created, now);
        assert_eq!(note.updated, now);
        assert!(note.validate().is_ok());
    }

    #[test]
    fn edited_keeps_identity_and_created() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let note = Note::new("a", "b", now);
        let later = now + Duration::minutes(5);
        let edited = note.edited("c", "d", later);
        assert_eq!(edited.id, note.id);
        assert_eq!(edited.created, now);
        assert_eq!(edited.updated, later);
        assert_eq!(edited.title, "c");
    }

    #[test]
    fn edited_clamps_backwards_clock() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let note = Note::new("a", "b", now);
        let edited = note.edited("a", "b", now - Duration::hours(1));
        assert_eq!(edited.updated, now);
        assert!(edited.validate().is_ok());
    }

    #[test]
    fn validate_rejects_updated_before_created() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let mut note = Note::new("a", "b", now);
        note.updated = now - Duration::seconds(1);
        assert!(matches!(
            note.validate(),
            Err(NoteValidationError::UpdatedBeforeCreated { .. })
        ));
    }

    #[test]
    fn serializes_with_flat_field_names() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let note = Note::new("t", "b", now);
        let value = serde_json::to_value(&note).unwrap();
        for field in ["id", "title", "body", "created", "updated"] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(value["created"], "2024-03-01T09:30:00Z");
    }
}
