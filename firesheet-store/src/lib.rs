//! # firesheet-store
//!
//! The persisted tabular store behind the sync: the [`SheetStore`] contract
//! (read-full-range, append-rows, batch-update, sheet-id lookup, sort-range)
//! plus a REST implementation for the real spreadsheet service and an
//! in-memory one for tests.

pub mod error;
pub mod memory;
pub mod rest;
pub mod store;

pub use error::StoreError;
pub use memory::MemorySheetStore;
pub use rest::RestSheetStore;
pub use store::{RangeWrite, SheetStore};
