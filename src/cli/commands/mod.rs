//! Subcommands of the `qlearn` binary

pub mod best;
pub mod export;
pub mod inspect;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::{
    adapters::{MsgPackRepository, msgpack_repository::SNAPSHOT_EXTENSION},
    ports::TableRepository,
    q_learning::{ActionValueTable, Hyperparameters},
};

/// Accept either a base path or the snapshot file itself.
pub(crate) fn snapshot_base(path: &Path) -> PathBuf {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case(SNAPSHOT_EXTENSION) => path.with_extension(""),
        _ => path.to_path_buf(),
    }
}

/// Load a saved table for read-only use.
///
/// Hyperparameters are not part of a snapshot, so the defaults stand in;
/// none of the inspection commands depend on them.
pub(crate) fn load_table(path: &Path) -> Result<ActionValueTable> {
    let base = snapshot_base(path);
    log::debug!("Resolved snapshot base {}", base.display());
    let snapshot = MsgPackRepository::new()
        .load(&base)
        .with_context(|| format!("Failed to load Q-table from {}", path.display()))?;
    Ok(snapshot.into_table(Hyperparameters::default())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_base_strips_extension() {
        assert_eq!(
            snapshot_base(Path::new("runs/q_table.msgpack")),
            PathBuf::from("runs/q_table")
        );
        assert_eq!(
            snapshot_base(Path::new("runs/q_table")),
            PathBuf::from("runs/q_table")
        );
    }
}
