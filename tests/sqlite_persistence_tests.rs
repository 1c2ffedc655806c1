#![cfg(feature = "sqlite")]

use tempfile::NamedTempFile;
use timetable_tool::{
    NewSubject, NewTimeSlot, SnapshotStore, SqliteSnapshotStore, TimetableStore,
};

#[test]
fn sqlite_slot_round_trip() {
    let file = NamedTempFile::new().unwrap();
    let backend = SqliteSnapshotStore::new(file.path()).unwrap();

    let mut store = TimetableStore::new();
    let t = store.create_timetable("Semester 1");
    store.add_time_slot(&t, NewTimeSlot {
        start_time: "08:00".into(),
        end_time: "08:45".into(),
    });
    store.add_subject(&t, NewSubject {
        name: "History".into(),
        room: Some("204".into()),
        ..NewSubject::default()
    });

    backend.save_state(&store.state()).expect("save state");
    let loaded = backend
        .load_state()
        .expect("load state")
        .expect("state exists");
    assert_eq!(loaded, *store.state());
}

#[test]
fn empty_database_loads_none() {
    let file = NamedTempFile::new().unwrap();
    let backend = SqliteSnapshotStore::new(file.path()).unwrap();
    assert!(backend.load_state().expect("load").is_none());
}

#[test]
fn second_save_overwrites_the_slot() {
    let file = NamedTempFile::new().unwrap();
    let backend = SqliteSnapshotStore::new(file.path()).unwrap();

    let mut store = TimetableStore::new();
    store.create_timetable("First");
    backend.save_state(&store.state()).expect("first save");

    store.create_timetable("Second");
    backend.save_state(&store.state()).expect("second save");

    let loaded = backend.load_state().expect("load").expect("state exists");
    assert_eq!(loaded.timetables.len(), 2);
}

#[test]
fn store_writes_through_to_sqlite_on_every_mutation() {
    let file = NamedTempFile::new().unwrap();

    {
        let backend = SqliteSnapshotStore::new(file.path()).unwrap();
        let mut store = TimetableStore::with_backend(Box::new(backend));
        let t = store.create_timetable("Persisted");
        store.add_subject(&t, NewSubject {
            name: "Biology".into(),
            ..NewSubject::default()
        });
    }

    let backend = SqliteSnapshotStore::new(file.path()).unwrap();
    let reloaded = TimetableStore::with_backend(Box::new(backend));
    let state = reloaded.state();
    assert_eq!(state.timetables.len(), 1);
    assert_eq!(state.timetables[0].name, "Persisted");
    assert_eq!(state.timetables[0].subjects[0].name, "Biology");
}

#[test]
fn distinct_slots_do_not_collide() {
    let file = NamedTempFile::new().unwrap();
    let a = SqliteSnapshotStore::with_slot(file.path(), "slot-a").unwrap();
    let b = SqliteSnapshotStore::with_slot(file.path(), "slot-b").unwrap();

    let mut store = TimetableStore::new();
    store.create_timetable("Only in A");
    a.save_state(&store.state()).expect("save into slot a");

    assert!(b.load_state().expect("load slot b").is_none());
    assert!(a.load_state().expect("load slot a").is_some());
}
