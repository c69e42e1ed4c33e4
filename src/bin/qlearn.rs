//! qlearn CLI - Inspect Q-tables saved by a training loop

use anyhow::Result;
use clap::{Parser, Subcommand};
use qlearn::cli::commands::{best, export, inspect};

#[derive(Parser)]
#[command(name = "qlearn")]
#[command(version, about = "Inspect tabular Q-learning snapshots", long_about = None)]
struct Cli {
    /// Enable debug and trace logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a saved Q-table
    Inspect(inspect::InspectArgs),

    /// Export a saved Q-table as CSV
    Export(export::ExportArgs),

    /// Show values and greedy action for one state
    Best(best::BestArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        qlearn::logging::init_logging_with_level(log::LevelFilter::Trace);
    } else {
        qlearn::logging::init_logging();
    }

    match cli.command {
        Commands::Inspect(args) => inspect::execute(args),
        Commands::Export(args) => export::execute(args),
        Commands::Best(args) => best::execute(args),
    }
}
