//! # Persistence Seam
//!
//! The `load`/`save` contract between the store and whatever holds the
//! serialized snapshot, plus the two implementations that ship: a JSON file
//! for production and an in-memory cell for tests.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load() -> Ok(None)        first launch, nothing persisted yet         │
//! │  load() -> Ok(Some(state)) snapshot restored, tolerant of old fields   │
//! │  save(&state)              replaces the WHOLE blob - there is no       │
//! │                            field-level or per-entity persistence       │
//! │                                                                         │
//! │  No versioning/migration protocol exists; schema drift is absorbed     │
//! │  by optional-field reading on the types themselves.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use techfab_core::AppState;

use crate::error::StoreResult;

/// The persistence collaborator: somewhere a serialized [`AppState`] lives.
pub trait StatePersister {
    /// Restores the snapshot, or `None` when nothing has been persisted yet.
    fn load(&self) -> StoreResult<Option<AppState>>;

    /// Persists the whole aggregate.
    fn save(&self, state: &AppState) -> StoreResult<()>;
}

// =============================================================================
// JSON File Persister
// =============================================================================

/// Stores the snapshot as a single pretty-printed JSON file.
pub struct JsonFilePersister {
    path: PathBuf,
}

impl JsonFilePersister {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFilePersister { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatePersister for JsonFilePersister {
    fn load(&self) -> StoreResult<Option<AppState>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no snapshot file, starting fresh");
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let state = serde_json::from_str(&raw)?;
        debug!(path = %self.path.display(), "snapshot loaded");
        Ok(Some(state))
    }

    fn save(&self, state: &AppState) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, raw)?;
        debug!(path = %self.path.display(), documents = state.documents.len(), "snapshot saved");
        Ok(())
    }
}

// =============================================================================
// In-Memory Persister
// =============================================================================

/// Keeps the snapshot in memory. Used by tests and by callers that manage
/// durability themselves.
#[derive(Default)]
pub struct MemoryPersister {
    slot: Mutex<Option<AppState>>,
}

impl MemoryPersister {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently saved snapshot - handy for asserting persistence
    /// actually happened.
    pub fn saved(&self) -> Option<AppState> {
        self.slot.lock().expect("persister mutex poisoned").clone()
    }
}

impl StatePersister for MemoryPersister {
    fn load(&self) -> StoreResult<Option<AppState>> {
        Ok(self.slot.lock().expect("persister mutex poisoned").clone())
    }

    fn save(&self, state: &AppState) -> StoreResult<()> {
        *self.slot.lock().expect("persister mutex poisoned") = Some(state.clone());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_persister_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let persister = JsonFilePersister::new(dir.path().join("state.json"));

        assert!(persister.load().unwrap().is_none());

        let mut state = AppState::default();
        state.settings.name = "Techfab Engineering".to_string();
        persister.save(&state).unwrap();

        let restored = persister.load().unwrap().unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_file_persister_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let persister = JsonFilePersister::new(dir.path().join("nested/deeper/state.json"));
        persister.save(&AppState::default()).unwrap();
        assert!(persister.load().unwrap().is_some());
    }

    #[test]
    fn test_memory_persister_round_trip() {
        let persister = MemoryPersister::new();
        assert!(persister.load().unwrap().is_none());

        let state = AppState::default();
        persister.save(&state).unwrap();
        assert_eq!(persister.load().unwrap().unwrap(), state);
        assert_eq!(persister.saved().unwrap(), state);
    }
}
