use super::{PersistenceResult, SnapshotStore, StateDocument};
use crate::store::StoreState;
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::Mutex;

/// Default slot name, carried over from the original client's local-storage
/// key so an imported document lands where the UI expects it.
pub const DEFAULT_SLOT: &str = "timetable-storage";

/// SQLite-backed snapshot store: a single named key-value slot holding the
/// JSON state document.
pub struct SqliteSnapshotStore {
    connection: Mutex<Connection>,
    slot: String,
}

impl SqliteSnapshotStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        Self::with_slot(path, DEFAULT_SLOT)
    }

    pub fn with_slot<P: AsRef<std::path::Path>>(
        path: P,
        slot: impl Into<String>,
    ) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
            slot: slot.into(),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS storage_slots (
                name TEXT PRIMARY KEY,
                document TEXT NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    fn save_state(&self, state: &StoreState) -> PersistenceResult<()> {
        let json = serde_json::to_string(&StateDocument::new(state.clone()))?;
        let mut conn = self.connection.lock().expect("sqlite mutex poisoned");
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO storage_slots (name, document) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET document = excluded.document",
            params![self.slot, json],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn load_state(&self) -> PersistenceResult<Option<StoreState>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        let mut stmt = conn.prepare("SELECT document FROM storage_slots WHERE name = ?1")?;
        let json_opt: Option<String> = stmt
            .query_row(params![self.slot], |row| row.get(0))
            .optional()?;

        let Some(json) = json_opt else {
            return Ok(None);
        };

        let document: StateDocument = serde_json::from_str(&json)?;
        Ok(Some(document.state))
    }
}
