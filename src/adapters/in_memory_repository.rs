//! In-memory table repository for testing.
//!
//! Stores encoded snapshots in a shared map keyed by base path, so learner
//! persistence can be exercised without touching the file system.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{
    Result,
    error::Error,
    ports::TableRepository,
    q_learning::{ActionValueTable, SavedQTable},
};

/// In-memory repository for testing.
///
/// All clones share the same underlying storage.
///
/// # Examples
///
/// ```
/// use qlearn::adapters::InMemoryRepository;
/// use qlearn::identifiers::action_set;
/// use qlearn::ports::TableRepository;
/// use qlearn::q_learning::{ActionValueTable, Hyperparameters};
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// let table = ActionValueTable::new(action_set(["L", "R"]), Hyperparameters::default())?;
///
/// repo.save(&table, Path::new("q_table"))?;
/// let snapshot = repo.load(Path::new("q_table"))?;
/// assert_eq!(snapshot.actions.len(), 2);
/// # Ok::<(), qlearn::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<PathBuf, Vec<u8>>> {
        // a panicking test thread must not hide stored snapshots from the rest
        self.storage
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get the number of snapshots currently stored.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    pub fn contains(&self, base: &Path) -> bool {
        self.storage().contains_key(base)
    }

    /// Store raw bytes under `base`, e.g. to simulate a damaged snapshot.
    pub fn insert_raw(&self, base: &Path, bytes: Vec<u8>) {
        self.storage().insert(base.to_path_buf(), bytes);
    }

    pub fn clear(&self) {
        self.storage().clear();
    }
}

impl TableRepository for InMemoryRepository {
    fn save(&self, table: &ActionValueTable, base: &Path) -> Result<()> {
        let bytes = table.to_snapshot().to_bytes()?;
        self.storage().insert(base.to_path_buf(), bytes);
        Ok(())
    }

    fn load(&self, base: &Path) -> Result<SavedQTable> {
        let storage = self.storage();
        let bytes = storage.get(base).ok_or_else(|| Error::SnapshotNotFound {
            path: base.to_path_buf(),
        })?;

        let snapshot = SavedQTable::from_bytes(bytes).map_err(|e| Error::CorruptSnapshot {
            path: base.to_path_buf(),
            message: e.to_string(),
        })?;
        snapshot
            .check()
            .map_err(|message| Error::CorruptSnapshot {
                path: base.to_path_buf(),
                message,
            })?;
        Ok(snapshot)
    }
}
