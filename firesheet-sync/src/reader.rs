//! Materialize the persisted sheet as a [`SheetTable`].

use firesheet_core::SheetTable;
use firesheet_store::SheetStore;

use crate::error::SyncError;

/// Read the full grid for `sheet` and shape it into a rectangular table.
///
/// Returns `Ok(None)` for a completely empty sheet (no header, no data) —
/// the caller treats that as "perform first-time load", not as a failure.
/// Ragged rows are padded to the header width on the way in.
pub fn read_table(store: &dyn SheetStore, sheet: &str) -> Result<Option<SheetTable>, SyncError> {
    let grid = store.read_all(sheet)?;
    let table = SheetTable::from_grid(grid);
    match &table {
        Some(table) => tracing::debug!(
            "read {} data rows x {} columns from '{sheet}'",
            table.len(),
            table.header().len()
        ),
        None => tracing::debug!("sheet '{sheet}' is empty"),
    }
    Ok(table)
}
