//! Request/response entry point.
//!
//! Wraps the pipeline for callers that want a status-coded outcome instead
//! of a `Result` — the hosted-invocation shape: 200 with a summary body on
//! success, 500 with the error text on any fatal error.

use serde::Serialize;

use firesheet_core::SyncConfig;
use firesheet_store::SheetStore;

use crate::pipeline;
use crate::source::IncidentSource;

/// Status-coded sync outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncResponse {
    #[serde(rename = "statusCode")]
    pub status: u16,
    pub body: String,
}

/// Run one sync and fold the result into a [`SyncResponse`].
///
/// This is the only place a fatal error becomes a user-visible outcome on
/// the request/response path.
pub fn handle(
    store: &dyn SheetStore,
    source: &dyn IncidentSource,
    config: &SyncConfig,
) -> SyncResponse {
    match pipeline::run(store, source, config, false) {
        Ok(outcome) => SyncResponse {
            status: 200,
            body: format!("Sync completed: {}", outcome.summary()),
        },
        Err(err) => SyncResponse {
            status: 500,
            body: format!("Error: {err}"),
        },
    }
}
