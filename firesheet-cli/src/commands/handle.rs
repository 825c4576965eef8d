//! `firesheet handle` — the request/response invocation path.
//!
//! Prints a status-coded JSON response and always exits 0; the outcome is
//! carried in the `statusCode` field, as a hosted invoker expects.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use firesheet_sync::{handler, SyncResponse};

/// Arguments for `firesheet handle`.
#[derive(Args, Debug)]
pub struct HandleArgs {
    /// Path to the config file (default: ~/.firesheet/config.yaml).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl HandleArgs {
    pub fn run(self) -> Result<()> {
        let response = match self.execute() {
            Ok(response) => response,
            // Setup failures (config, token) get the same 500 shape as
            // pipeline failures.
            Err(err) => SyncResponse {
                status: 500,
                body: format!("Error: {err:#}"),
            },
        };
        println!("{}", serde_json::to_string(&response)?);
        Ok(())
    }

    fn execute(&self) -> Result<SyncResponse> {
        let config = super::load_config(self.config.as_ref())?;
        let (store, source) = super::build_collaborators(&config)?;
        Ok(handler::handle(&store, &source, &config))
    }
}
