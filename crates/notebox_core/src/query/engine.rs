//! Substring filter and sort orders for note lists.

use crate::model::note::Note;
use icu_collator::{Collator, CollatorOptions};
use log::warn;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

thread_local! {
    static TITLE_COLLATOR: Option<Collator> = build_title_collator();
}

/// Display ordering for note lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Most recently updated first.
    #[default]
    Newest,
    /// Least recently updated first.
    Oldest,
    /// Title A to Z.
    TitleAsc,
    /// Title Z to A.
    TitleDesc,
    /// Keep persisted order. Chosen for unrecognized sort values.
    Unsorted,
}

impl SortOrder {
    /// Parses a sort value; anything unrecognized maps to `Unsorted`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "new" | "newest" => Self::Newest,
            "old" | "oldest" => Self::Oldest,
            "az" | "title_asc" => Self::TitleAsc,
            "za" | "title_desc" => Self::TitleDesc,
            _ => Self::Unsorted,
        }
    }

    fn compare(self, a: &Note, b: &Note) -> Ordering {
        match self {
            Self::Newest => b.updated.cmp(&a.updated),
            Self::Oldest => a.updated.cmp(&b.updated),
            Self::TitleAsc => locale_compare(&a.title, &b.title),
            Self::TitleDesc => locale_compare(&b.title, &a.title),
            Self::Unsorted => Ordering::Equal,
        }
    }
}

impl FromStr for SortOrder {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(value))
    }
}

/// Normalizes raw search input into the needle used for matching.
///
/// Trimmed and lowercased; an empty result matches every note.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Returns whether a note matches an already normalized needle.
pub fn matches_query(note: &Note, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    format!("{} {}", note.title, note.body)
        .to_lowercase()
        .contains(needle)
}

/// Filters and sorts notes into a new display-ordered list.
///
/// Sorting is stable, so ties (and `Unsorted`) keep persisted order.
pub fn apply(notes: &[Note], query: &str, sort: SortOrder) -> Vec<Note> {
    let needle = normalize_query(query);
    let mut selected: Vec<Note> = notes
        .iter()
        .filter(|note| matches_query(note, needle.as_str()))
        .cloned()
        .collect();
    selected.sort_by(|a, b| sort.compare(a, b));
    selected
}

/// Locale-aware title comparison using the root Unicode collation.
///
/// Accents and case are secondary and tertiary differences, so `Éclair`
/// sorts between `Apple` and `Zebra` and `a` sorts before `A`.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    TITLE_COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    })
}

fn build_title_collator() -> Option<Collator> {
    match Collator::try_new(&Default::default(), CollatorOptions::new()) {
        Ok(collator) => Some(collator),
        Err(err) => {
            warn!(
                "event=collator_init module=query status=degraded error_code=collator_unavailable error={err}"
            );
            None
        }
    }
}
