//! `firesheet sync` — run one reconciliation pass.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use firesheet_sync::{pipeline, SyncOutcome};

/// Arguments for `firesheet sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to the config file (default: ~/.firesheet/config.yaml).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Compute and report the write plan without writing anything.
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let config = super::load_config(self.config.as_ref())?;
        let (store, source) = super::build_collaborators(&config)?;

        let outcome = pipeline::run(&store, &source, &config, self.dry_run)
            .with_context(|| format!("sync failed for sheet '{}'", config.sheet_name))?;

        print_outcome(&config.sheet_name, &outcome);
        Ok(())
    }
}

fn print_outcome(sheet: &str, outcome: &SyncOutcome) {
    let prefix = if outcome.dry_run { "[dry-run] " } else { "" };

    if outcome.initial_load && outcome.appended == 0 {
        println!("{prefix}✓ '{sheet}' — remote feed empty, nothing to write");
        return;
    }
    if outcome.initial_load {
        println!(
            "{prefix}✓ '{sheet}' first-time load ({} rows written)",
            outcome.appended
        );
        return;
    }
    if outcome.appended == 0 && outcome.updated == 0 {
        println!("{prefix}✓ '{sheet}' — already up to date");
    } else {
        println!(
            "{prefix}✓ '{sheet}' synced ({} appended, {} updated)",
            outcome.appended, outcome.updated
        );
    }
    if outcome.dropped_blank_ids > 0 {
        println!("  ⚠ {} blank-id rows dropped", outcome.dropped_blank_ids);
    }
}
