//! Export functionality for inspection and debugging
//!
//! Currently supports a CSV view of an action-value table.

mod csv_export;

pub use csv_export::{QTableCsvExporter, STATE_COLUMN};
