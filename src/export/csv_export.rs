//! CSV export of action-value tables
//!
//! One row per observed state and one column per action in the table's fixed
//! action order. The export is meant for eyeballing learned values; nothing
//! reads it back.

use std::{fs::File, io::Write, path::Path};

use crate::{Result, q_learning::ActionValueTable};

/// Header cell of the state column
pub const STATE_COLUMN: &str = "State";

/// Exporter for Q-table CSV files
pub struct QTableCsvExporter;

impl QTableCsvExporter {
    /// Export the table to `path`, replacing any existing file.
    ///
    /// # Returns
    /// Number of state rows written
    pub fn export(table: &ActionValueTable, path: &Path) -> Result<usize> {
        let file = File::create(path).map_err(|source| crate::Error::WriteFailure {
            operation: format!("create CSV export {path:?}"),
            source,
        })?;
        Self::write_to(table, file)
    }

    /// Write the CSV to any writer. States are emitted in sorted order and
    /// values use `{:?}` formatting so whole numbers keep their `.0`.
    pub fn write_to<W: Write>(table: &ActionValueTable, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = Vec::with_capacity(table.actions().len() + 1);
        header.push(STATE_COLUMN);
        header.extend(table.actions().iter().map(|action| action.as_str()));
        csv_writer.write_record(&header)?;

        let states = table.states();
        for state in &states {
            let mut record = Vec::with_capacity(header.len());
            record.push(state.to_string());
            record.extend(table.row(state).into_iter().map(|value| format!("{value:?}")));
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush().map_err(|source| crate::Error::WriteFailure {
            operation: "flush CSV export".to_string(),
            source,
        })?;
        Ok(states.len())
    }
}
