//! Subcommand implementations.

pub mod handle;
pub mod sync;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use firesheet_core::{config, SyncConfig};
use firesheet_store::RestSheetStore;
use firesheet_sync::HttpIncidentSource;

/// Load the config from `--config` or `~/.firesheet/config.yaml`.
pub(crate) fn load_config(path: Option<&PathBuf>) -> Result<SyncConfig> {
    let config = match path {
        Some(path) => config::load_at(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => config::load().context("failed to load ~/.firesheet/config.yaml")?,
    };
    tracing::debug!(
        "config loaded: sheet '{}' in spreadsheet '{}'",
        config.sheet_name,
        config.spreadsheet_id
    );
    Ok(config)
}

/// Build the store and source for one sync invocation.
///
/// One HTTP agent per collaborator, both scoped to this run — there is no
/// shared long-lived session.
pub(crate) fn build_collaborators(
    config: &SyncConfig,
) -> Result<(RestSheetStore, HttpIncidentSource)> {
    let token = config
        .require_token()
        .context("spreadsheet access token missing")?;
    let agent = ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build();
    let store = RestSheetStore::new(agent, &config.spreadsheet_id, token);
    let source = HttpIncidentSource::from_config(config);
    Ok((store, source))
}
