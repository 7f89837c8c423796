//! Note list view model.
//!
//! # Responsibility
//! - Turn a display-ordered note list into presentation-ready items.
//! - Produce relative timestamps and empty-state messages.
//!
//! # Invariants
//! - Rendering is a pure function of `(notes, query, now)`.
//! - Every item carries exactly the `Edit` and `Delete` actions.

use crate::model::note::{Note, NoteId};
use crate::query::engine::normalize_query;
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::fmt::Display;

pub const UNTITLED_LABEL: &str = "Untitled Note";
pub const EMPTY_BODY_LABEL: &str = "No content";
pub const NO_NOTES_MESSAGE: &str = "No notes yet. Create your first note above!";

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;
const TIME_FORMAT: &str = "%H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Per-item action trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteAction {
    Edit,
    Delete,
}

/// One rendered note row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteItemView {
    pub id: NoteId,
    /// Title, or [`UNTITLED_LABEL`] when empty.
    pub title: String,
    /// Relative label derived from `updated`.
    pub timestamp: String,
    /// Body, or [`EMPTY_BODY_LABEL`] when empty.
    pub body: String,
    pub actions: [NoteAction; 2],
}

/// Rendered list: either an empty-state message or note rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListView {
    Empty { message: String },
    Items { items: Vec<NoteItemView> },
}

impl ListView {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }

    /// Rendered rows; empty for the empty state.
    pub fn items(&self) -> &[NoteItemView] {
        match self {
            Self::Empty { .. } => &[],
            Self::Items { items } => items,
        }
    }
}

/// Builds the list view for already filtered and sorted notes.
///
/// `query` only selects the empty-state message; filtering happens in the
/// query engine.
pub fn render_list<Tz>(notes: &[Note], query: &str, now: &DateTime<Tz>) -> ListView
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if notes.is_empty() {
        return ListView::Empty {
            message: empty_message(query),
        };
    }

    let items = notes
        .iter()
        .map(|note| NoteItemView {
            id: note.id,
            title: fallback(&note.title, UNTITLED_LABEL),
            timestamp: relative_timestamp(note.updated, now),
            body: fallback(&note.body, EMPTY_BODY_LABEL),
            actions: [NoteAction::Edit, NoteAction::Delete],
        })
        .collect();
    ListView::Items { items }
}

/// Empty-state text; echoes the normalized query when one is active.
pub fn empty_message(query: &str) -> String {
    let needle = normalize_query(query);
    if needle.is_empty() {
        NO_NOTES_MESSAGE.to_string()
    } else {
        format!("No notes found for \"{needle}\"")
    }
}

/// Number of started days between two instants, in either direction.
///
/// Zero only for identical instants; one for anything up to 24h apart.
pub fn day_buckets(updated: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let diff_ms = (now - updated).num_milliseconds().abs();
    (diff_ms + DAY_MILLIS - 1) / DAY_MILLIS
}

/// Relative label for `updated`, formatted in `now`'s timezone.
///
/// Buckets are elapsed-time based, not calendar based, so a note from late
/// yesterday can still read "Today".
pub fn relative_timestamp<Tz>(updated: DateTime<Utc>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = updated.with_timezone(&now.timezone());
    let time = local.format(TIME_FORMAT);
    let date = local.format(DATE_FORMAT);

    match day_buckets(updated, now.with_timezone(&Utc)) {
        0 | 1 => format!("Today, {time}"),
        2 => format!("Yesterday, {time}"),
        3..=7 => format!("{date}, {time}"),
        _ => date.to_string(),
    }
}

fn fallback(value: &str, label: &str) -> String {
    if value.is_empty() {
        label.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{day_buckets, empty_message, relative_timestamp, render_list, ListView};
    use crate::model::note::Note;
    use chrono::{Duration, FixedOffset, TimeZone, Utc};

    #[test]
    fn day_buckets_round_up() {
        let now = Utc.with_ymd_and_hms(2024, 4, 10, 12, 0, 0).unwrap();
        assert_eq!(day_buckets(now, now), 0);
        assert_eq!(day_buckets(now - Duration::milliseconds(1), now), 1);
        assert_eq!(day_buckets(now - Duration::hours(24), now), 1);
        assert_eq!(day_buckets(now - Duration::hours(25), now), 2);
        assert_eq!(day_buckets(now + Duration::hours(30), now), 2);
    }

    #[test]
    fn relative_timestamp_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 4, 10, 12, 0, 0).unwrap();
        assert_eq!(relative_timestamp(now, &now), "Today, 12:00:00");
        assert_eq!(
            relative_timestamp(now - Duration::hours(23), &now),
            "Today, 13:00:00"
        );
        assert_eq!(
            relative_timestamp(now - Duration::hours(30), &now),
            "Yesterday, 06:00:00"
        );
        assert_eq!(
            relative_timestamp(now - Duration::days(5), &now),
            "2024-04-05, 12:00:00"
        );
        assert_eq!(
            relative_timestamp(now - Duration::days(7), &now),
            "2024-04-03, 12:00:00"
        );
        assert_eq!(relative_timestamp(now - Duration::days(8), &now), "2024-04-02");
    }

    #[test]
    fn relative_timestamp_uses_viewer_timezone() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = offset.with_ymd_and_hms(2024, 4, 10, 1, 0, 0).unwrap();
        let updated = Utc.with_ymd_and_hms(2024, 4, 9, 22, 30, 0).unwrap();
        assert_eq!(relative_timestamp(updated, &now), "Today, 00:30:00");
    }

    #[test]
    fn empty_messages_depend_on_query() {
        assert_eq!(
            empty_message(""),
            "No notes yet. Create your first note above!"
        );
        assert_eq!(empty_message("  Milk "), "No notes found for \"milk\"");
    }

    #[test]
    fn items_use_fallback_labels() {
        let now = Utc.with_ymd_and_hms(2024, 4, 10, 12, 0, 0).unwrap();
        let notes = vec![Note::new("", "", now)];
        let view = render_list(&notes, "", &now);
        let item = &view.items()[0];
        assert_eq!(item.title, "Untitled Note");
        assert_eq!(item.body, "No content");
        assert!(matches!(view, ListView::Items { .. }));
    }
}
