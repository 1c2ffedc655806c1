use super::{PersistenceResult, SnapshotStore, StateDocument};
use crate::store::StoreState;
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub fn save_state_to_json<P: AsRef<Path>>(state: &StoreState, path: P) -> PersistenceResult<()> {
    let document = StateDocument::new(state.clone());
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &document)?;
    Ok(())
}

/// Load the stored document, or `None` when no file exists yet.
pub fn load_state_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Option<StoreState>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    let document: StateDocument = serde_json::from_reader(file)?;
    Ok(Some(document.state))
}

/// File-backed snapshot store: one JSON document at a fixed path.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn save_state(&self, state: &StoreState) -> PersistenceResult<()> {
        save_state_to_json(state, &self.path)
    }

    fn load_state(&self) -> PersistenceResult<Option<StoreState>> {
        load_state_from_json(&self.path)
    }
}
