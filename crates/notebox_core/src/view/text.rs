//! Plain-text presenter for [`ListView`].

use crate::view::list::{ListView, NoteAction, NoteItemView};
use std::fmt::Write;

const SHORT_ID_LEN: usize = 8;

/// Renders the whole list, one block per note separated by blank lines.
pub fn render_text(view: &ListView) -> String {
    match view {
        ListView::Empty { message } => format!("{message}\n"),
        ListView::Items { items } => items
            .iter()
            .map(render_item)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn render_item(item: &NoteItemView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  {}", item.title, item.timestamp);
    for line in item.body.lines() {
        let _ = writeln!(out, "  {line}");
    }
    let id = item.id.to_string();
    let short_id = &id[..SHORT_ID_LEN];
    let actions = item
        .actions
        .iter()
        .map(|action| match action {
            NoteAction::Edit => format!("edit {short_id}"),
            NoteAction::Delete => format!("delete {short_id}"),
        })
        .collect::<Vec<_>>()
        .join(" | ");
    let _ = writeln!(out, "  [{actions}]");
    out
}

#[cfg(test)]
mod tests {
    use super::render_text;
    use crate::model::note::Note;
    use crate::view::list::render_list;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn empty_view_prints_message_only() {
        let now = Utc.with_ymd_and_hms(2024, 4, 10, 12, 0, 0).unwrap();
        let text = render_text(&render_list(&[], "", &now));
        assert_eq!(text, "No notes yet. Create your first note above!\n");
    }

    #[test]
    fn item_block_has_title_body_and_actions() {
        let now = Utc.with_ymd_and_hms(2024, 4, 10, 12, 0, 0).unwrap();
        let id = Uuid::parse_str("1234abcd-0000-4000-8000-000000000000").unwrap();
        let notes = vec![Note::with_id(id, "Groceries", "milk\neggs", now)];
        let text = render_text(&render_list(&notes, "", &now));
        assert_eq!(
            text,
            "Groceries  Today, 12:00:00\n  milk\n  eggs\n  [edit 1234abcd | delete 1234abcd]\n"
        );
    }
}
