pub mod day;
pub mod grid;
pub mod model;
pub mod persistence;
pub mod store;
pub mod validation;

pub use day::Day;
pub use grid::{
    CellOccupant, GridCell, GridRow, cell_key, find_entry, find_subject, resolve_cell,
    sorted_time_slots, week_grid,
};
pub use model::{
    Break, BreakPatch, EntryPatch, FreeBlock, FreeBlockPatch, NewBreak, NewEntry, NewFreeBlock,
    NewSubject, NewTimeSlot, Subject, SubjectPatch, TimeSlot, TimeSlotPatch, Timetable,
    TimetableEntry, TimetablePatch,
};
#[cfg(feature = "sqlite")]
pub use persistence::SqliteSnapshotStore;
pub use persistence::{
    JsonFileStore, PersistenceError, SnapshotStore, load_state_from_json, save_state_to_json,
};
pub use store::{StoreState, SubscriptionId, TimetableStore};
pub use validation::ValidationError;
