use std::fs;
use timetable_tool::{
    Day, JsonFileStore, NewEntry, NewSubject, NewTimeSlot, TimetableStore, load_state_from_json,
    save_state_to_json,
};

#[test]
fn json_file_round_trip_reproduces_the_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timetables.json");

    let mut store = TimetableStore::with_backend(Box::new(JsonFileStore::new(&path)));
    let t = store.create_timetable("Semester 1");
    let ts = store
        .add_time_slot(&t, NewTimeSlot {
            start_time: "08:00".into(),
            end_time: "08:45".into(),
        })
        .expect("add slot");
    let s = store
        .add_subject(&t, NewSubject {
            name: "Math".into(),
            teacher: Some("Gauss".into()),
            ..NewSubject::default()
        })
        .expect("add subject");
    store
        .add_entry(&t, NewEntry {
            day: Day::Monday,
            time_slot_id: ts,
            subject_id: s,
            notes: Some("bring compass".into()),
        })
        .expect("add entry");

    let reloaded = TimetableStore::with_backend(Box::new(JsonFileStore::new(&path)));
    assert_eq!(*reloaded.state(), *store.state());
}

#[test]
fn explicit_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");

    let mut store = TimetableStore::new();
    store.create_timetable("A");
    let state = store.state();

    save_state_to_json(&state, &path).expect("save");
    let loaded = load_state_from_json(&path)
        .expect("load")
        .expect("state exists");
    assert_eq!(loaded, *state);
}

#[test]
fn missing_file_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_state_from_json(dir.path().join("absent.json")).expect("load");
    assert!(loaded.is_none());
}

#[test]
fn documents_without_break_collections_load_with_empty_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.json");
    // Document written by an older client: no breaks/freeBlocks arrays.
    fs::write(
        &path,
        r#"{
          "state": {
            "timetables": [
              {
                "id": "t1",
                "name": "Old",
                "timeSlots": [{"id": "ts1", "startTime": "08:00", "endTime": "08:45"}],
                "subjects": [{"id": "s1", "name": "Math"}],
                "entries": [
                  {"id": "e1", "day": "monday", "timeSlotId": "ts1", "subjectId": "s1"}
                ]
              }
            ],
            "activeTimetableId": "t1"
          },
          "version": 0
        }"#,
    )
    .unwrap();

    let state = load_state_from_json(&path).expect("load").expect("state");
    assert_eq!(state.active_timetable_id.as_deref(), Some("t1"));
    let timetable = &state.timetables[0];
    assert_eq!(timetable.time_slots[0].start_time, "08:00");
    assert_eq!(timetable.entries[0].day, Day::Monday);
    assert!(timetable.breaks.is_empty());
    assert!(timetable.free_blocks.is_empty());
}

#[test]
fn malformed_document_degrades_to_the_empty_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{not json").unwrap();

    let store = TimetableStore::with_backend(Box::new(JsonFileStore::new(&path)));
    assert!(store.state().timetables.is_empty());
    assert_eq!(store.state().active_timetable_id, None);
}

#[test]
fn absent_optional_fields_are_omitted_from_the_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sparse.json");

    let mut store = TimetableStore::new();
    let t = store.create_timetable("A");
    store.add_subject(&t, NewSubject {
        name: "Art".into(),
        ..NewSubject::default()
    });
    save_state_to_json(&store.state(), &path).expect("save");

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"activeTimetableId\""));
    assert!(raw.contains("\"timeSlots\""));
    assert!(!raw.contains("\"color\""));
    assert!(!raw.contains("\"teacher\""));
    assert!(!raw.contains("\"room\""));
}
