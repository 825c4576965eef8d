//! The full sync pipeline.
//!
//! Sequential and blocking: read persisted sheet → (schema check) → fetch
//! remote → reconcile → append → update → sort. An empty persisted sheet
//! skips reconciliation entirely — the whole remote result is written as
//! header plus rows in one operation, then sorted.

use std::collections::BTreeSet;

use firesheet_core::{fields, normalize_iso, IncidentRecord, SyncConfig, LAST_UPDATE_COLUMN};
use firesheet_store::{RangeWrite, SheetStore};

use crate::error::SyncError;
use crate::source::IncidentSource;
use crate::{reader, reconcile, sort, writer};

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Summary of one sync run. Counts are reported, never treated as partial
/// failure — a run either returns this or a fatal [`SyncError`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    pub appended: usize,
    pub updated: usize,
    pub dropped_blank_ids: usize,
    /// The sheet was empty and the remote result was written wholesale.
    pub initial_load: bool,
    pub sorted: bool,
    pub dry_run: bool,
}

impl SyncOutcome {
    pub fn summary(&self) -> String {
        let prefix = if self.dry_run { "[dry-run] " } else { "" };
        if self.initial_load {
            return format!("{prefix}initial load: {} rows written", self.appended);
        }
        let mut line = format!(
            "{prefix}{} appended, {} updated",
            self.appended, self.updated
        );
        if self.dropped_blank_ids > 0 {
            line.push_str(&format!(", {} blank-id rows dropped", self.dropped_blank_ids));
        }
        line
    }
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Run one sync against `store` using records from `source`.
///
/// This is the canonical entrypoint for both the CLI and the
/// request/response handler.
pub fn run(
    store: &dyn SheetStore,
    source: &dyn IncidentSource,
    config: &SyncConfig,
    dry_run: bool,
) -> Result<SyncOutcome, SyncError> {
    match reader::read_table(store, &config.sheet_name)? {
        None => {
            tracing::info!(
                "sheet '{}' is empty; performing first-time load",
                config.sheet_name
            );
            initial_load(store, source, config, dry_run)
        }
        Some(table) => incremental(store, source, config, &table, dry_run),
    }
}

fn incremental(
    store: &dyn SheetStore,
    source: &dyn IncidentSource,
    config: &SyncConfig,
    table: &firesheet_core::SheetTable,
    dry_run: bool,
) -> Result<SyncOutcome, SyncError> {
    // Schema check before the remote call: a misconfigured sheet should not
    // cost an API round trip.
    reconcile::required_columns(table.header())?;

    let records = source.fetch()?;
    let plan = reconcile::reconcile(table, &records, config.blank_id_policy)?;
    if plan.dropped_blank_ids > 0 {
        tracing::warn!("dropped {} remote rows with blank ids", plan.dropped_blank_ids);
    }

    let applied = writer::apply(store, &config.sheet_name, &plan, dry_run)?;

    // Sort after every attempt, even when nothing was written.
    let sorted = if dry_run {
        false
    } else {
        sort::sort_by_column(store, &config.sheet_name, table.header(), &config.sort_column)
    };

    Ok(SyncOutcome {
        appended: applied.appended,
        updated: applied.updated,
        dropped_blank_ids: plan.dropped_blank_ids,
        initial_load: false,
        sorted,
        dry_run,
    })
}

// ---------------------------------------------------------------------------
// First-time load
// ---------------------------------------------------------------------------

fn initial_load(
    store: &dyn SheetStore,
    source: &dyn IncidentSource,
    config: &SyncConfig,
    dry_run: bool,
) -> Result<SyncOutcome, SyncError> {
    let records = source.fetch()?;
    if records.is_empty() {
        tracing::info!("remote returned no incidents; nothing to write");
        return Ok(SyncOutcome {
            initial_load: true,
            dry_run,
            ..SyncOutcome::default()
        });
    }

    let header = initial_header(&records);
    let upd_idx = header.iter().position(|c| c == LAST_UPDATE_COLUMN);

    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(header.clone());
    for record in &records {
        let mut row = record.aligned_row(&header);
        if let Some(idx) = upd_idx {
            row[idx] = normalize_iso(Some(&row[idx]));
        }
        rows.push(row);
    }

    let appended = records.len();
    if dry_run {
        tracing::info!("[dry-run] would write header plus {appended} rows");
        return Ok(SyncOutcome {
            appended,
            initial_load: true,
            dry_run: true,
            ..SyncOutcome::default()
        });
    }

    // Header and data land in one write.
    store.batch_update(
        &config.sheet_name,
        &[RangeWrite { start_row: 1, rows }],
    )?;
    tracing::info!("initial load wrote {appended} rows");

    let sorted = sort::sort_by_column(store, &config.sheet_name, &header, &config.sort_column);
    Ok(SyncOutcome {
        appended,
        initial_load: true,
        sorted,
        ..SyncOutcome::default()
    })
}

/// Header for a first-time load: rename-table targets in table order,
/// filtered to columns the data actually carries, then any unmapped remote
/// fields in name order.
fn initial_header(records: &[IncidentRecord]) -> Vec<String> {
    let mut header: Vec<String> = Vec::new();
    for (_, column) in fields::FIELD_RENAMES {
        if records.iter().any(|r| r.get(column).is_some()) {
            header.push((*column).to_string());
        }
    }
    let mut extras: BTreeSet<&str> = BTreeSet::new();
    for record in records {
        for column in record.columns() {
            if !header.iter().any(|h| h == column) {
                extras.insert(column);
            }
        }
    }
    header.extend(extras.into_iter().map(str::to_string));
    header
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> IncidentRecord {
        let mut record = IncidentRecord::new();
        for (column, value) in pairs {
            record.insert(*column, *value);
        }
        record
    }

    #[test]
    fn initial_header_follows_rename_table_order() {
        let records = vec![record(&[
            ("incident_date_last_update", "2024-01-01"),
            ("incident_id", "A1"),
            ("incident_name", "Creek Fire"),
        ])];
        let header = initial_header(&records);
        assert_eq!(
            header,
            ["incident_name", "incident_date_last_update", "incident_id"]
        );
    }

    #[test]
    fn initial_header_unions_columns_across_records() {
        let records = vec![
            record(&[("incident_id", "A1")]),
            record(&[("incident_name", "Creek Fire")]),
        ];
        let header = initial_header(&records);
        assert_eq!(header, ["incident_name", "incident_id"]);
    }

    #[test]
    fn unmapped_fields_trail_the_mapped_ones() {
        let records = vec![record(&[("incident_id", "A1"), ("ZCustom", "x")])];
        let header = initial_header(&records);
        assert_eq!(header, ["incident_id", "ZCustom"]);
    }

    #[test]
    fn summary_mentions_dropped_rows_only_when_present() {
        let outcome = SyncOutcome {
            appended: 2,
            updated: 1,
            ..SyncOutcome::default()
        };
        assert_eq!(outcome.summary(), "2 appended, 1 updated");

        let dropped = SyncOutcome {
            dropped_blank_ids: 3,
            ..outcome
        };
        assert_eq!(dropped.summary(), "2 appended, 1 updated, 3 blank-id rows dropped");
    }

    #[test]
    fn summary_flags_dry_run_and_initial_load() {
        let outcome = SyncOutcome {
            appended: 4,
            initial_load: true,
            dry_run: true,
            ..SyncOutcome::default()
        };
        assert_eq!(outcome.summary(), "[dry-run] initial load: 4 rows written");
    }
}
