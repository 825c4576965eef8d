//! Post-sync sort stage.
//!
//! Runs after every sync attempt, even when nothing was written. Failures
//! here are logged and swallowed — a mis-sorted sheet is cosmetic, and must
//! never cause the sync itself to be reported as failed.

use firesheet_store::SheetStore;

/// Re-sort the data rows of `sheet` by `column`, descending.
///
/// The header row is never moved. If `column` is absent from `header` the
/// sort is skipped silently. Returns whether the sort actually happened.
pub fn sort_by_column(
    store: &dyn SheetStore,
    sheet: &str,
    header: &[String],
    column: &str,
) -> bool {
    let Some(index) = header.iter().position(|c| c == column) else {
        tracing::debug!("sort skipped: '{column}' not in header");
        return false;
    };

    let result = store
        .sheet_id(sheet)
        .and_then(|id| store.sort_range(id, index, true));
    match result {
        Ok(()) => {
            tracing::info!("sorted '{sheet}' by '{column}' descending");
            true
        }
        Err(err) => {
            tracing::warn!("sort failed (non-fatal): {err}");
            false
        }
    }
}
