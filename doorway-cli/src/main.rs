//! Batch console front end for the doorway routing engine

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod bundles;
mod inspect;
mod report;
mod run;

/// Door-to-door routing over plan-coordinate road networks
#[derive(Parser)]
#[command(name = "doorway", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve one query file against one map and write the result records
    Run(run::RunArgs),
    /// Run every case of a named bundle from a TOML bundle file
    Bundle(bundles::BundleArgs),
    /// Print statistics about a map file
    Inspect(inspect::InspectArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Command::Run(args) => run::run(&args),
        Command::Bundle(args) => bundles::run_bundle(&args),
        Command::Inspect(args) => inspect::inspect(&args),
    }
}
