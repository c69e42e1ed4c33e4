//! Best command - Show the learned values and greedy action for one state

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use crate::{
    cli::{
        commands::load_table,
        output::{print_kv, print_section},
    },
    identifiers::StateId,
};

#[derive(Parser, Debug)]
#[command(about = "Show values and greedy action for a state")]
pub struct BestArgs {
    /// Snapshot base path (with or without the .msgpack extension)
    pub snapshot: PathBuf,

    /// State identifier exactly as the training loop spelled it
    pub state: String,
}

pub fn execute(args: BestArgs) -> Result<()> {
    let table = load_table(&args.snapshot)?;
    let state = StateId::new(args.state);

    let Some(best) = table.best_action(&state) else {
        bail!("State '{state}' has no entries in {}", args.snapshot.display());
    };

    print_section(&format!("State {state}"));
    for (action, value) in table.actions().iter().zip(table.row(&state)) {
        print_kv(action.as_str(), &format!("{value:.4}"));
    }
    print_kv("Greedy action", best.as_str());
    Ok(())
}
