//! Firesheet — wildfire incident → spreadsheet sync CLI.
//!
//! # Usage
//!
//! ```text
//! firesheet sync [--config <path>] [--dry-run]
//! firesheet handle [--config <path>]
//! ```
//!
//! `sync` runs one reconciliation pass and prints a summary; `handle` runs
//! the same pass but prints the status-coded response used by hosted
//! invocations. `RUST_LOG` controls verbosity (default `info`).

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{handle::HandleArgs, sync::SyncArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "firesheet",
    version,
    about = "Sync wildfire incident records into a spreadsheet",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch the incident feed and reconcile it into the sheet.
    Sync(SyncArgs),

    /// Run one sync and print the status-coded response as JSON.
    Handle(HandleArgs),
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Handle(args) => args.run(),
    }
}
