//! Repository port for action-value table persistence.
//!
//! This module defines the trait boundary between the learning core and the
//! storage layer for table snapshots.

use std::path::Path;

use crate::{
    Result,
    q_learning::{ActionValueTable, SavedQTable},
};

/// Port for persisting and loading action-value tables.
///
/// `base` is a path without extension; implementations derive their own
/// file names from it (the MessagePack adapter writes `<base>.msgpack` and
/// `<base>.csv`). Loading yields a [`SavedQTable`] because the caller owns
/// the hyperparameters needed to rebuild a table.
///
/// # Examples
///
/// ```no_run
/// use qlearn::ports::TableRepository;
/// use qlearn::q_learning::ActionValueTable;
/// use std::path::Path;
///
/// fn checkpoint<R: TableRepository>(
///     repo: &R,
///     table: &ActionValueTable,
///     base: &Path,
/// ) -> qlearn::Result<()> {
///     repo.save(table, base)
/// }
/// ```
pub trait TableRepository {
    /// Save a table snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::WriteFailure`] if the destination cannot be
    /// created or written, or a serialization error if encoding fails.
    fn save(&self, table: &ActionValueTable, base: &Path) -> Result<()>;

    /// Load a table snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SnapshotNotFound`] if nothing is stored at
    /// `base` and [`crate::Error::CorruptSnapshot`] if the stored bytes do
    /// not decode to a structurally valid snapshot.
    fn load(&self, base: &Path) -> Result<SavedQTable>;
}
