//! Serialization support for action-value tables.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::Error,
    identifiers::{ActionId, StateId},
    q_learning::{config::Hyperparameters, q_table::ActionValueTable},
};

/// One stored (state, action) -> value pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QEntry {
    pub state: StateId,
    pub action: ActionId,
    pub value: f64,
}

/// Versioned snapshot of a table's contents.
///
/// Holds the action set and every stored entry; hyperparameters belong to
/// whoever restores the table. Entries are sorted by state, then by action
/// order, so identical tables encode to identical bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedQTable {
    pub version: u32,
    pub actions: Vec<ActionId>,
    pub entries: Vec<QEntry>,
}

impl SavedQTable {
    pub const VERSION: u32 = 1;

    pub fn from_table(table: &ActionValueTable) -> Self {
        let order: HashMap<&ActionId, usize> = table
            .actions()
            .iter()
            .enumerate()
            .map(|(index, action)| (action, index))
            .collect();

        let mut entries: Vec<QEntry> = table
            .entries()
            .map(|(state, action, value)| QEntry {
                state: state.clone(),
                action: action.clone(),
                value,
            })
            .collect();
        entries.sort_by(|a, b| {
            a.state
                .cmp(&b.state)
                .then_with(|| order.get(&a.action).cmp(&order.get(&b.action)))
        });

        Self {
            version: Self::VERSION,
            actions: table.actions().to_vec(),
            entries,
        }
    }

    /// Structural checks a decoded snapshot must pass before use.
    pub(crate) fn check(&self) -> std::result::Result<(), String> {
        if self.version != Self::VERSION {
            return Err(format!(
                "unsupported snapshot version {}, expected {}",
                self.version,
                Self::VERSION
            ));
        }
        if self.actions.is_empty() {
            return Err("snapshot has an empty action set".to_string());
        }
        let known: HashSet<&ActionId> = self.actions.iter().collect();
        for entry in &self.entries {
            if !known.contains(&entry.action) {
                return Err(format!(
                    "entry for state '{}' references unknown action '{}'",
                    entry.state, entry.action
                ));
            }
            if !entry.value.is_finite() {
                return Err(format!(
                    "entry ({}, {}) holds non-finite value {}",
                    entry.state, entry.action, entry.value
                ));
            }
        }
        Ok(())
    }

    /// Rebuild a table with the given hyperparameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationContext`] if the snapshot fails its
    /// structural checks, or [`Error::InvalidConfiguration`] for bad
    /// hyperparameters or a malformed action set.
    pub fn into_table(self, params: Hyperparameters) -> Result<ActionValueTable> {
        self.check()
            .map_err(|message| Error::SerializationContext {
                operation: "rebuild table from snapshot".to_string(),
                message,
            })?;

        let q_values = self
            .entries
            .into_iter()
            .map(|entry| ((entry.state, entry.action), entry.value))
            .collect();
        ActionValueTable::from_parts(self.actions, params, q_values)
    }

    /// Encode as MessagePack.
    ///
    /// Runs the same structural checks as loading, so nothing is written
    /// that could not be read back.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.check()
            .map_err(|message| Error::SerializationContext {
                operation: "serialize table snapshot".to_string(),
                message,
            })?;
        rmp_serde::to_vec(self).map_err(|e| Error::SerializationContext {
            operation: "serialize table snapshot to MessagePack".to_string(),
            message: e.to_string(),
        })
    }

    /// Decode from MessagePack. Does not run structural checks.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize table snapshot from MessagePack".to_string(),
            message: e.to_string(),
        })
    }
}

impl ActionValueTable {
    /// Snapshot of every stored entry.
    pub fn to_snapshot(&self) -> SavedQTable {
        SavedQTable::from_table(self)
    }

    /// Restore a table from a snapshot, see [`SavedQTable::into_table`].
    pub fn from_snapshot(snapshot: SavedQTable, params: Hyperparameters) -> Result<Self> {
        snapshot.into_table(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::action_set;

    fn trained_table() -> ActionValueTable {
        let mut table = ActionValueTable::new(
            action_set(["left", "forward", "right"]),
            Hyperparameters::new(0.0, 0.5, 0.9),
        )
        .unwrap();
        table
            .learn(&"b2".into(), &"right".into(), 1.0, &"b1".into())
            .unwrap();
        table
            .learn(&"b1".into(), &"forward".into(), 4.0, &"b1".into())
            .unwrap();
        table
    }

    #[test]
    fn test_snapshot_roundtrip() -> Result<()> {
        let table = trained_table();
        let bytes = table.to_snapshot().to_bytes()?;
        let restored =
            SavedQTable::from_bytes(&bytes)?.into_table(*table.hyperparameters())?;

        assert_eq!(restored.len(), table.len());
        for (state, action, value) in table.entries() {
            assert_eq!(restored.value(state, action), value);
        }
        assert_eq!(restored.value(&"unseen".into(), &"left".into()), 0.0);
        Ok(())
    }

    #[test]
    fn test_snapshot_entries_are_ordered() {
        let snapshot = trained_table().to_snapshot();
        let keys: Vec<(&str, &str)> = snapshot
            .entries
            .iter()
            .map(|e| (e.state.as_str(), e.action.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("b1", "left"),
                ("b1", "forward"),
                ("b1", "right"),
                ("b2", "left"),
                ("b2", "forward"),
                ("b2", "right"),
            ]
        );
    }

    #[test]
    fn test_rejects_wrong_version() {
        let mut snapshot = trained_table().to_snapshot();
        snapshot.version = 99;
        let err = snapshot
            .into_table(Hyperparameters::default())
            .unwrap_err();
        assert!(err.to_string().contains("unsupported snapshot version"));
    }

    #[test]
    fn test_rejects_foreign_action() {
        let mut snapshot = trained_table().to_snapshot();
        snapshot.entries.push(QEntry {
            state: "b3".into(),
            action: "reverse".into(),
            value: 1.0,
        });
        assert!(snapshot.check().is_err());
    }

    #[test]
    fn test_refuses_to_encode_non_finite_values() {
        let mut snapshot = trained_table().to_snapshot();
        snapshot.entries[0].value = f64::INFINITY;
        let err = snapshot.to_bytes().unwrap_err();
        assert!(err.to_string().contains("non-finite"));
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let result = SavedQTable::from_bytes(b"definitely not msgpack");
        assert!(matches!(result, Err(Error::SerializationContext { .. })));
    }
}
