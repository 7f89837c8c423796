use chrono::{Duration, TimeZone, Utc};
use notebox_core::db::open_db_in_memory;
use notebox_core::{Clock, ManualClock, MemoryNoteStore, NoteService, NoteStore, SqliteNoteStore};
use std::collections::HashSet;
use uuid::Uuid;

fn memory_service() -> (NoteService<MemoryNoteStore, ManualClock>, ManualClock) {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 8, 1, 10, 0, 0).unwrap());
    (
        NoteService::with_clock(MemoryNoteStore::new(), clock.clone()),
        clock,
    )
}

#[test]
fn create_persists_note_with_fresh_id() {
    let (service, clock) = memory_service();

    let created = service.create("Title", "Body").unwrap();

    let loaded = service.store().load();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0], created);
    assert_eq!(created.title, "Title");
    assert_eq!(created.body, "Body");
    assert_eq!(created.created, clock.now());
    assert_eq!(created.updated, created.created);
}

#[test]
fn create_prepends_and_ids_are_unique() {
    let (service, clock) = memory_service();
    let mut ids = HashSet::new();
    for idx in 0..20 {
        clock.advance(Duration::seconds(1));
        let note = service.create(format!("note {idx}"), "").unwrap();
        assert!(ids.insert(note.id), "duplicate id generated");
    }

    let loaded = service.list();
    assert_eq!(loaded.len(), 20);
    assert_eq!(loaded[0].title, "note 19");
    assert_eq!(loaded[19].title, "note 0");
}

#[test]
fn update_changes_only_target_text_and_updated() {
    let (service, clock) = memory_service();
    let first = service.create("first", "one").unwrap();
    let second = service.create("second", "two").unwrap();

    clock.advance(Duration::minutes(10));
    let edited = service
        .update(first.id, "first edited", "one edited")
        .unwrap()
        .unwrap();

    assert_eq!(edited.id, first.id);
    assert_eq!(edited.created, first.created);
    assert_eq!(edited.updated, first.created + Duration::minutes(10));

    let loaded = service.list();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0], second);
    assert_eq!(loaded[1], edited);
    assert_eq!(loaded[1].title, "first edited");
    assert_eq!(loaded[1].body, "one edited");
}

#[test]
fn update_unknown_id_is_noop() {
    let (service, _) = memory_service();
    service.create("only", "").unwrap();
    let before = service.store().blob();

    let result = service.update(Uuid::new_v4(), "x", "y").unwrap();

    assert!(result.is_none());
    assert_eq!(service.store().blob(), before);
}

#[test]
fn remove_drops_exactly_matching_record() {
    let (service, _) = memory_service();
    let keep = service.create("keep", "").unwrap();
    let drop_me = service.create("drop", "").unwrap();

    let removed = service.remove(drop_me.id).unwrap().unwrap();

    assert_eq!(removed, drop_me);
    let loaded = service.list();
    assert_eq!(loaded, vec![keep]);
}

#[test]
fn remove_unknown_id_keeps_size() {
    let (service, _) = memory_service();
    service.create("a", "").unwrap();
    service.create("b", "").unwrap();

    assert!(service.remove(Uuid::new_v4()).unwrap().is_none());
    assert_eq!(service.list().len(), 2);
}

#[test]
fn every_operation_reloads_from_storage() {
    let conn = open_db_in_memory().unwrap();
    let first_tab = NoteService::new(SqliteNoteStore::try_new(&conn).unwrap());
    let second_tab = NoteService::new(SqliteNoteStore::try_new(&conn).unwrap());

    let from_first = first_tab.create("from first", "").unwrap();
    let from_second = second_tab.create("from second", "").unwrap();

    let ids: Vec<_> = first_tab.list().into_iter().map(|note| note.id).collect();
    assert_eq!(ids, vec![from_second.id, from_first.id]);

    second_tab.remove(from_first.id).unwrap();
    assert!(first_tab.get(from_first.id).is_none());
}

#[test]
fn service_works_over_recovered_malformed_store() {
    let store = MemoryNoteStore::with_blob("[{\"broken\":");
    let service = NoteService::new(store);

    assert!(service.list().is_empty());
    service.create("after recovery", "").unwrap();
    assert_eq!(service.list().len(), 1);
}

#[test]
fn writes_keep_stored_note_with_skewed_timestamps() {
    let blob = r#"[{"id":"8e4a2d3f-5b6c-4d7e-9f0a-1b2c3d4e5f60","title":"keep me","body":"",
        "created":"2024-01-02T00:00:00Z","updated":"2024-01-01T00:00:00Z"}]"#;
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 8, 1, 10, 0, 0).unwrap());
    let service = NoteService::with_clock(MemoryNoteStore::with_blob(blob), clock);

    service.create("new", "").unwrap();

    let titles: Vec<_> = service
        .store()
        .load()
        .into_iter()
        .map(|note| note.title)
        .collect();
    assert_eq!(titles, ["new", "keep me"]);
}
