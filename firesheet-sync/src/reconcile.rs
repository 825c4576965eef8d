//! Reconciliation — classify remote rows against the persisted sheet.
//!
//! ## Algorithm
//!
//! 1. Normalize the last-update column on both sides so the comparison is
//!    apples-to-apples regardless of native timestamp formats.
//! 2. Build the [`ExistingIndex`]: trimmed `incident_id` →
//!    (sheet row number, normalized last-update). Duplicate ids: the later
//!    row wins. Blank ids are never indexed.
//! 3. Align every remote record to exactly the persisted header's columns.
//! 4. Classify each remote row independently: **new** (id not indexed),
//!    **changed** (indexed, last-update differs), **unchanged** (excluded
//!    from all writes).
//! 5. Emit the minimal [`WritePlan`]: new rows as an append batch in remote
//!    order, changed rows addressed at their pre-append row numbers.

use std::collections::HashMap;

use firesheet_core::types::data_row_number;
use firesheet_core::{
    normalize_iso, BlankIdPolicy, IncidentRecord, SheetTable, ID_COLUMN, LAST_UPDATE_COLUMN,
};

use crate::error::SyncError;

// ---------------------------------------------------------------------------
// Write plan
// ---------------------------------------------------------------------------

/// One changed row, addressed at the sheet row it already occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowWrite {
    pub row_number: u32,
    pub values: Vec<String>,
}

/// The minimal write set for one sync: rows to append and rows to patch.
///
/// Row numbers in `updates` were captured before any append; appends land
/// strictly after existing rows, so applying `appends` first cannot shift
/// an update target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WritePlan {
    pub appends: Vec<Vec<String>>,
    pub updates: Vec<RowWrite>,
    /// Remote rows excluded because their id was blank (only under
    /// [`BlankIdPolicy::Drop`]).
    pub dropped_blank_ids: usize,
}

impl WritePlan {
    pub fn is_empty(&self) -> bool {
        self.appends.is_empty() && self.updates.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Existing index
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
struct IndexEntry {
    row_number: u32,
    last_update: String,
}

/// Index of the persisted table: trimmed id → (row number, normalized
/// last-update). Built once per sync.
#[derive(Debug, Clone, Default)]
pub struct ExistingIndex(HashMap<String, IndexEntry>);

impl ExistingIndex {
    /// Build the index from the persisted table.
    ///
    /// Fails fast with [`SyncError::MissingColumn`] if the header lacks the
    /// id or last-update column — reconciliation is impossible without them.
    pub fn build(table: &SheetTable) -> Result<Self, SyncError> {
        let (id_idx, upd_idx) = required_columns(table.header())?;
        let mut map = HashMap::new();
        for (position, row) in table.rows().iter().enumerate() {
            let id = row[id_idx].trim();
            if id.is_empty() {
                continue;
            }
            // Later rows overwrite earlier ones on duplicate ids.
            map.insert(
                id.to_string(),
                IndexEntry {
                    row_number: data_row_number(position),
                    last_update: normalize_iso(Some(&row[upd_idx])),
                },
            );
        }
        Ok(Self(map))
    }

    /// Row number and normalized last-update for `id`, if indexed.
    pub fn entry(&self, id: &str) -> Option<(u32, &str)> {
        self.0
            .get(id)
            .map(|e| (e.row_number, e.last_update.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Positions of the id and last-update columns, or the schema error that
/// makes reconciliation impossible.
pub fn required_columns(header: &[String]) -> Result<(usize, usize), SyncError> {
    let id_idx = header
        .iter()
        .position(|c| c == ID_COLUMN)
        .ok_or(SyncError::MissingColumn { column: ID_COLUMN })?;
    let upd_idx = header
        .iter()
        .position(|c| c == LAST_UPDATE_COLUMN)
        .ok_or(SyncError::MissingColumn {
            column: LAST_UPDATE_COLUMN,
        })?;
    Ok((id_idx, upd_idx))
}

// ---------------------------------------------------------------------------
// reconcile
// ---------------------------------------------------------------------------

/// Compute the minimal write set for `remote` against the persisted `table`.
pub fn reconcile(
    table: &SheetTable,
    remote: &[IncidentRecord],
    blank_id_policy: BlankIdPolicy,
) -> Result<WritePlan, SyncError> {
    let (id_idx, upd_idx) = required_columns(table.header())?;
    let index = ExistingIndex::build(table)?;

    let mut plan = WritePlan::default();
    for record in remote {
        let mut values = record.aligned_row(table.header());
        values[upd_idx] = normalize_iso(Some(&values[upd_idx]));

        let id = values[id_idx].trim().to_string();
        if id.is_empty() {
            // A blank id can never match the index; the policy decides
            // whether it still appends.
            match blank_id_policy {
                BlankIdPolicy::Append => plan.appends.push(values),
                BlankIdPolicy::Drop => plan.dropped_blank_ids += 1,
            }
            continue;
        }

        match index.entry(&id) {
            None => plan.appends.push(values),
            Some((row_number, stored_update)) if stored_update != values[upd_idx] => {
                plan.updates.push(RowWrite { row_number, values });
            }
            Some(_) => {}
        }
    }

    tracing::debug!(
        "reconciled {} remote rows against {} indexed: {} new, {} changed",
        remote.len(),
        index.len(),
        plan.appends.len(),
        plan.updates.len(),
    );
    Ok(plan)
}
