//! Apply a [`WritePlan`] to the persisted store.
//!
//! Two independent batches: one bulk append for new rows, one bulk
//! row-addressed update for changed rows. Appends run first; they land
//! strictly after existing rows, so the update targets captured at
//! classification time stay valid.

use firesheet_store::{RangeWrite, SheetStore};

use crate::error::SyncError;
use crate::reconcile::WritePlan;

/// Counts of what `apply` wrote (or would write, under dry-run).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub appended: usize,
    pub updated: usize,
}

/// Apply the plan to `sheet`. With `dry_run` the store is never touched;
/// the would-be counts are logged and returned.
pub fn apply(
    store: &dyn SheetStore,
    sheet: &str,
    plan: &WritePlan,
    dry_run: bool,
) -> Result<ApplyOutcome, SyncError> {
    let outcome = ApplyOutcome {
        appended: plan.appends.len(),
        updated: plan.updates.len(),
    };

    if dry_run {
        tracing::info!(
            "[dry-run] would append {} and update {} rows",
            outcome.appended,
            outcome.updated
        );
        return Ok(outcome);
    }

    if !plan.appends.is_empty() {
        store.append_rows(sheet, &plan.appends)?;
        tracing::info!("appended {} new rows", outcome.appended);
    }

    if !plan.updates.is_empty() {
        let writes: Vec<RangeWrite> = plan
            .updates
            .iter()
            .map(|u| RangeWrite {
                start_row: u.row_number,
                rows: vec![u.values.clone()],
            })
            .collect();
        store.batch_update(sheet, &writes)?;
        tracing::info!("updated {} existing rows", outcome.updated);
    }

    Ok(outcome)
}
