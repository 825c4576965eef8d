//! Error types for firesheet-store.

use thiserror::Error;

/// All errors that can arise from the spreadsheet backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP failure talking to the backend — network error or non-2xx
    /// status. Fatal for the sync; never retried here.
    #[error("transport failure calling {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// The backend answered 2xx but the body did not decode.
    #[error("malformed response from {endpoint}: {source}")]
    Payload {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    /// Metadata lookup found no sheet with the given display name.
    #[error("sheet '{title}' not found in spreadsheet metadata")]
    SheetNotFound { title: String },

    /// A sort request addressed an internal sheet id that does not exist.
    #[error("no sheet with id {id}")]
    UnknownSheetId { id: i64 },

    /// Backend-specific failure that is not a transport problem.
    #[error("sheet backend error: {0}")]
    Backend(String),
}

/// Convenience constructor for [`StoreError::Transport`].
pub(crate) fn http_err(endpoint: impl Into<String>, source: ureq::Error) -> StoreError {
    StoreError::Transport {
        endpoint: endpoint.into(),
        source: Box::new(source),
    }
}

/// Convenience constructor for [`StoreError::Payload`].
pub(crate) fn payload_err(endpoint: impl Into<String>, source: std::io::Error) -> StoreError {
    StoreError::Payload {
        endpoint: endpoint.into(),
        source,
    }
}
