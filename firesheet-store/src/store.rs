//! The persisted tabular store contract.
//!
//! The reconciler is independent of the storage choice: anything that can
//! read a full grid, append rows, patch row ranges, and sort can back a
//! sync. [`RestSheetStore`](crate::rest::RestSheetStore) talks to the real
//! spreadsheet service; [`MemorySheetStore`](crate::memory::MemorySheetStore)
//! backs the engine tests.

use crate::error::StoreError;

/// One row-addressed write: `rows` land starting at sheet row `start_row`
/// (1-based, header at row 1), overwriting in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeWrite {
    pub start_row: u32,
    pub rows: Vec<Vec<String>>,
}

/// Operations a spreadsheet backend must offer.
///
/// All side effects are additive or overwriting; nothing here deletes rows.
pub trait SheetStore {
    /// The full grid for `sheet` — possibly ragged, possibly empty.
    fn read_all(&self, sheet: &str) -> Result<Vec<Vec<String>>, StoreError>;

    /// Bulk-insert `rows` after the last existing row.
    fn append_rows(&self, sheet: &str, rows: &[Vec<String>]) -> Result<(), StoreError>;

    /// Apply every [`RangeWrite`] in one request.
    fn batch_update(&self, sheet: &str, writes: &[RangeWrite]) -> Result<(), StoreError>;

    /// Resolve a sheet's internal id by its display name.
    fn sheet_id(&self, title: &str) -> Result<i64, StoreError>;

    /// Reorder the data rows (never the header) of the sheet with internal
    /// id `sheet_id` by the column at `column_index`.
    fn sort_range(
        &self,
        sheet_id: i64,
        column_index: usize,
        descending: bool,
    ) -> Result<(), StoreError>;
}
