//! MessagePack implementation of the table repository.
//!
//! The snapshot goes to `<base>.msgpack` via rmp_serde. A CSV view of the
//! same table is written next to it as `<base>.csv` unless disabled.
//!
//! Snapshots are written to a temporary file in the same directory and
//! renamed into place, so a failed write leaves the previous one intact.

use std::{
    ffi::OsString,
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::{
    Result,
    error::Error,
    export::QTableCsvExporter,
    ports::TableRepository,
    q_learning::{ActionValueTable, SavedQTable},
};

/// Extension of the primary snapshot file
pub const SNAPSHOT_EXTENSION: &str = "msgpack";
/// Extension of the human-readable export
pub const CSV_EXTENSION: &str = "csv";

/// Append `.ext` to `base` without replacing an existing extension.
fn append_extension(base: &Path, extension: &str) -> PathBuf {
    let mut raw: OsString = base.as_os_str().to_owned();
    raw.push(".");
    raw.push(extension);
    PathBuf::from(raw)
}

/// Location of the snapshot for a base path.
pub fn snapshot_path(base: &Path) -> PathBuf {
    append_extension(base, SNAPSHOT_EXTENSION)
}

/// Location of the CSV export for a base path.
pub fn csv_path(base: &Path) -> PathBuf {
    append_extension(base, CSV_EXTENSION)
}

/// Replace `path` with `bytes` via a sibling temp file and a rename.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_failure = |source| Error::WriteFailure {
        operation: format!("write snapshot {path:?}"),
        source,
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_failure)?;
    file.write_all(bytes).map_err(write_failure)?;
    file.as_file().sync_all().map_err(write_failure)?;
    file.persist(path).map_err(|e| write_failure(e.error))?;
    Ok(())
}

/// MessagePack-based table repository.
///
/// # Examples
///
/// ```no_run
/// use qlearn::adapters::MsgPackRepository;
/// use qlearn::identifiers::action_set;
/// use qlearn::ports::TableRepository;
/// use qlearn::q_learning::{ActionValueTable, Hyperparameters};
/// use std::path::Path;
///
/// let repo = MsgPackRepository::new();
/// let table = ActionValueTable::new(action_set(["L", "R"]), Hyperparameters::default())?;
///
/// // Writes q_table.msgpack and q_table.csv
/// repo.save(&table, Path::new("q_table"))?;
///
/// let snapshot = repo.load(Path::new("q_table"))?;
/// let restored = snapshot.into_table(*table.hyperparameters())?;
/// # Ok::<(), qlearn::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MsgPackRepository {
    write_csv: bool,
}

impl MsgPackRepository {
    /// Create a repository that writes both snapshot and CSV export.
    pub fn new() -> Self {
        Self { write_csv: true }
    }

    /// Toggle the CSV export written alongside each snapshot.
    pub fn with_csv_export(mut self, enabled: bool) -> Self {
        self.write_csv = enabled;
        self
    }
}

impl Default for MsgPackRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRepository for MsgPackRepository {
    fn save(&self, table: &ActionValueTable, base: &Path) -> Result<()> {
        let path = snapshot_path(base);
        let bytes = table.to_snapshot().to_bytes()?;
        write_atomically(&path, &bytes)?;
        log::info!("Wrote Q-table snapshot: {}", path.display());

        // CSV failures do not fail the save once the snapshot is written
        if self.write_csv {
            let path = csv_path(base);
            match QTableCsvExporter::export(table, &path) {
                Ok(rows) => log::info!("Wrote CSV export ({rows} states): {}", path.display()),
                Err(e) => log::warn!("Could not write CSV export {}: {e}", path.display()),
            }
        }

        Ok(())
    }

    fn load(&self, base: &Path) -> Result<SavedQTable> {
        let path = snapshot_path(base);
        let bytes = fs::read(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => Error::SnapshotNotFound { path: path.clone() },
            _ => Error::CorruptSnapshot {
                path: path.clone(),
                message: source.to_string(),
            },
        })?;

        let snapshot = SavedQTable::from_bytes(&bytes).map_err(|e| Error::CorruptSnapshot {
            path: path.clone(),
            message: e.to_string(),
        })?;
        snapshot
            .check()
            .map_err(|message| Error::CorruptSnapshot {
                path: path.clone(),
                message,
            })?;

        log::info!(
            "Loaded Q-table snapshot with {} entries: {}",
            snapshot.entries.len(),
            path.display()
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tempfile::TempDir;

    use super::*;
    use crate::{
        identifiers::{ActionId, StateId, action_set},
        q_learning::Hyperparameters,
    };

    fn sample_table() -> ActionValueTable {
        let mut table = ActionValueTable::new(
            action_set(["L", "R"]),
            Hyperparameters::new(0.0, 0.5, 0.9),
        )
        .expect("valid table");
        table
            .learn(&"s1".into(), &"L".into(), 10.0, &"s2".into())
            .expect("known action");
        table
    }

    #[test]
    fn test_msgpack_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path().join("q_table");

        let repo = MsgPackRepository::new();
        let table = sample_table();
        repo.save(&table, &base).expect("Failed to save");

        assert!(snapshot_path(&base).exists());
        assert!(csv_path(&base).exists());

        let loaded = repo.load(&base).expect("Failed to load");
        assert_eq!(loaded, table.to_snapshot());
    }

    #[test]
    fn test_csv_export_can_be_disabled() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path().join("q_table");

        let repo = MsgPackRepository::new().with_csv_export(false);
        repo.save(&sample_table(), &base).expect("Failed to save");

        assert!(snapshot_path(&base).exists());
        assert!(!csv_path(&base).exists());
    }

    #[test]
    fn test_extension_is_appended() {
        assert_eq!(
            snapshot_path(Path::new("runs/q.v2")),
            PathBuf::from("runs/q.v2.msgpack")
        );
    }

    #[test]
    fn test_load_nonexistent_returns_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let result = MsgPackRepository::new().load(&temp_dir.path().join("missing"));
        assert!(matches!(result, Err(Error::SnapshotNotFound { .. })));
    }

    #[test]
    fn test_load_garbage_returns_corrupt() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path().join("broken");
        fs::write(snapshot_path(&base), b"\xc1\xc1\xc1").expect("write garbage");

        let result = MsgPackRepository::new().load(&base);
        assert!(matches!(result, Err(Error::CorruptSnapshot { .. })));
    }

    #[test]
    fn test_csv_failure_does_not_fail_save() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path().join("q_table");
        fs::create_dir(csv_path(&base)).expect("occupy CSV path");

        let repo = MsgPackRepository::new();
        let table = sample_table();
        repo.save(&table, &base).expect("snapshot save should succeed");

        assert!(csv_path(&base).is_dir());
        let loaded = repo.load(&base).expect("Failed to load");
        assert_eq!(loaded, table.to_snapshot());
    }

    #[test]
    fn test_resave_replaces_snapshot_without_leftovers() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path().join("q_table");
        let repo = MsgPackRepository::new().with_csv_export(false);

        let mut table = sample_table();
        repo.save(&table, &base).expect("first save");
        table
            .learn(&"s2".into(), &"R".into(), 4.0, &"s1".into())
            .expect("known action");
        repo.save(&table, &base).expect("second save");

        assert_eq!(repo.load(&base).expect("Failed to load"), table.to_snapshot());
        let names: Vec<_> = fs::read_dir(temp_dir.path())
            .expect("list dir")
            .map(|entry| entry.expect("dir entry").file_name())
            .collect();
        assert_eq!(names, vec![OsString::from("q_table.msgpack")]);
    }

    #[test]
    fn test_non_finite_table_is_not_written() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path().join("q_table");
        let q_values: HashMap<(StateId, ActionId), f64> =
            [(("s1".into(), "L".into()), f64::INFINITY)].into_iter().collect();
        let table = ActionValueTable::from_parts(
            action_set(["L", "R"]),
            Hyperparameters::default(),
            q_values,
        )
        .expect("valid parts");

        let result = MsgPackRepository::new().save(&table, &base);
        assert!(matches!(result, Err(Error::SerializationContext { .. })));
        assert!(!snapshot_path(&base).exists());
        assert!(!csv_path(&base).exists());
    }

    #[test]
    fn test_save_to_invalid_path_returns_write_failure() {
        let repo = MsgPackRepository::new();
        let result = repo.save(&sample_table(), Path::new("/invalid_dir_12345/q_table"));
        assert!(matches!(result, Err(Error::WriteFailure { .. })));
    }
}
