//! # firesheet-sync
//!
//! The sync engine: fetch the incident feed, reconcile it against the
//! persisted sheet, and apply the minimal write set.
//!
//! Call [`pipeline::run`] for one full sync, or [`handler::handle`] for the
//! status-coded request/response form.

pub mod error;
pub mod handler;
pub mod pipeline;
pub mod reader;
pub mod reconcile;
pub mod sort;
pub mod source;
pub mod writer;

pub use error::SyncError;
pub use handler::{handle, SyncResponse};
pub use pipeline::{run, SyncOutcome};
pub use reconcile::{reconcile, ExistingIndex, RowWrite, WritePlan};
pub use source::{HttpIncidentSource, IncidentSource};
