use chrono::{Duration, TimeZone, Utc};
use notebox_core::{
    apply, render_list, ListView, ManualClock, MemoryNoteStore, Note, NoteAction, NoteService,
    SortOrder,
};

fn alpha_beta() -> (Note, Note, Vec<Note>) {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 9, 1, 9, 0, 0).unwrap());
    let service = NoteService::with_clock(MemoryNoteStore::new(), clock.clone());
    let alpha = service.create("Alpha", "x").unwrap();
    clock.advance(Duration::minutes(1));
    let beta = service.create("Beta", "y").unwrap();
    (alpha, beta, service.list())
}

fn titles(notes: &[Note]) -> Vec<&str> {
    notes.iter().map(|note| note.title.as_str()).collect()
}

#[test]
fn alpha_beta_scenario() {
    let (alpha, beta, loaded) = alpha_beta();

    assert_eq!(
        apply(&loaded, "", SortOrder::TitleAsc),
        vec![alpha.clone(), beta.clone()]
    );
    assert_eq!(
        apply(&loaded, "", SortOrder::TitleDesc),
        vec![beta.clone(), alpha.clone()]
    );
    assert_eq!(apply(&loaded, "alp", SortOrder::Newest), vec![alpha]);
}

#[test]
fn newest_and_oldest_are_exact_reverses_without_ties() {
    let base = Utc.with_ymd_and_hms(2024, 9, 1, 9, 0, 0).unwrap();
    let notes: Vec<Note> = [3, 1, 4, 0, 2]
        .iter()
        .map(|offset| Note::new(format!("n{offset}"), "", base + Duration::hours(*offset)))
        .collect();

    let newest = apply(&notes, "", SortOrder::Newest);
    let mut oldest = apply(&notes, "", SortOrder::Oldest);
    assert_eq!(titles(&newest), ["n4", "n3", "n2", "n1", "n0"]);

    oldest.reverse();
    assert_eq!(newest, oldest);
}

#[test]
fn filter_is_case_insensitive_substring() {
    let now = Utc.with_ymd_and_hms(2024, 9, 1, 9, 0, 0).unwrap();
    let notes = vec![
        Note::new("Grocery List", "", now),
        Note::new("Work", "standup notes", now),
    ];

    for query in ["gro", "GRO", "list"] {
        let hits = apply(&notes, query, SortOrder::Newest);
        assert_eq!(titles(&hits), ["Grocery List"], "query `{query}`");
    }
    assert_eq!(titles(&apply(&notes, "STANDUP", SortOrder::Newest)), ["Work"]);
    assert!(apply(&notes, "absent", SortOrder::Newest).is_empty());
    assert_eq!(apply(&notes, "", SortOrder::Newest).len(), 2);
}

#[test]
fn unrecognized_sort_keeps_persisted_order() {
    let (alpha, beta, loaded) = alpha_beta();
    let sort = SortOrder::parse_lenient("random");
    assert_eq!(apply(&loaded, "", sort), vec![beta, alpha]);
}

#[test]
fn empty_collection_states() {
    let now = Utc.with_ymd_and_hms(2024, 9, 1, 9, 0, 0).unwrap();

    assert_eq!(
        render_list(&[], "", &now),
        ListView::Empty {
            message: "No notes yet. Create your first note above!".to_string()
        }
    );
    assert_eq!(
        render_list(&[], "Beta", &now),
        ListView::Empty {
            message: "No notes found for \"beta\"".to_string()
        }
    );
}

#[test]
fn rendered_items_follow_query_order_and_carry_actions() {
    let (_, _, loaded) = alpha_beta();
    let now = Utc.with_ymd_and_hms(2024, 9, 1, 10, 0, 0).unwrap();
    let ordered = apply(&loaded, "", SortOrder::TitleAsc);

    let view = render_list(&ordered, "", &now);
    let items = view.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "Alpha");
    assert_eq!(items[0].body, "x");
    assert_eq!(items[0].timestamp, "Today, 09:00:00");
    assert_eq!(items[1].timestamp, "Today, 09:01:00");
    assert_eq!(items[0].actions, [NoteAction::Edit, NoteAction::Delete]);
}
