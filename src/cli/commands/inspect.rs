//! Inspect command - Summarise a saved Q-table

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::cli::{
    commands::load_table,
    output::{format_number, format_value, print_kv, print_section},
};

#[derive(Parser, Debug)]
#[command(about = "Summarise a saved Q-table")]
pub struct InspectArgs {
    /// Snapshot base path (with or without the .msgpack extension)
    pub snapshot: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let table = load_table(&args.snapshot)?;
    let summary = table.summary();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print_section(&format!("Q-table: {}", args.snapshot.display()));
    print_kv("Actions", &summary.actions.join(", "));
    print_kv("States", &format_number(summary.states));
    print_kv("Entries", &format_number(summary.entries));
    print_kv("Min value", &format_value(summary.min_value));
    print_kv("Max value", &format_value(summary.max_value));
    print_kv("Mean value", &format_value(summary.mean_value));
    Ok(())
}
