//! Export command - Write a saved Q-table as CSV

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{cli::commands::load_table, export::QTableCsvExporter};

#[derive(Parser, Debug)]
#[command(about = "Export a saved Q-table as CSV")]
pub struct ExportArgs {
    /// Snapshot base path (with or without the .msgpack extension)
    pub snapshot: PathBuf,

    /// Output file path
    #[arg(long, short = 'o')]
    pub output: PathBuf,
}

pub fn execute(args: ExportArgs) -> Result<()> {
    let table = load_table(&args.snapshot)?;
    let rows = QTableCsvExporter::export(&table, &args.output)?;
    println!("✓ Exported {rows} states to: {}", args.output.display());
    Ok(())
}
