use crate::store::StoreState;
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    #[cfg(feature = "sqlite")]
    Sqlite(rusqlite::Error),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            #[cfg(feature = "sqlite")]
            PersistenceError::Sqlite(err) => write!(f, "sqlite error: {err}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Durable home for the store's public state. Written through on every
/// mutation, read once at startup.
pub trait SnapshotStore {
    fn save_state(&self, state: &StoreState) -> PersistenceResult<()>;
    fn load_state(&self) -> PersistenceResult<Option<StoreState>>;
}

/// Version of the persisted document layout. There is no migration logic
/// beyond defaulting absent fields, so loading accepts any stored value.
pub const STORAGE_VERSION: u32 = 0;

/// The serialized envelope: the public state plus a layout version, matching
/// the document shape the original web client left behind in local storage.
#[derive(Serialize, Deserialize)]
pub(crate) struct StateDocument {
    pub state: StoreState,
    #[serde(default)]
    pub version: u32,
}

impl StateDocument {
    pub(crate) fn new(state: StoreState) -> Self {
        Self {
            state,
            version: STORAGE_VERSION,
        }
    }
}

pub mod file;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::{JsonFileStore, load_state_from_json, save_state_to_json};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteSnapshotStore;
