//! Error types for firesheet-sync.

use thiserror::Error;

use firesheet_core::ConfigError;
use firesheet_store::StoreError;

/// All errors that can arise from a sync run.
///
/// Everything here is fatal and bubbles to the entry point; the non-fatal
/// conditions (empty results, sort failures, unparseable timestamps) never
/// become errors in the first place.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the spreadsheet backend.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Config loading/validation failure.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The incident API request failed — network error or non-2xx status.
    #[error("incident API request failed for year {year}: {source}")]
    Fetch {
        year: i32,
        #[source]
        source: Box<ureq::Error>,
    },

    /// The incident API answered 2xx but the body was not valid JSON.
    #[error("malformed incident feed for year {year}: {source}")]
    Feed {
        year: i32,
        #[source]
        source: std::io::Error,
    },

    /// The persisted sheet header is missing a column reconciliation
    /// depends on. Raised before any remote call is made.
    #[error("required column '{column}' not found in the sheet header")]
    MissingColumn { column: &'static str },
}
