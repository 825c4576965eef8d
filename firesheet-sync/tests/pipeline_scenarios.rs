//! End-to-end pipeline scenarios against the in-memory store.

use std::cell::Cell;

use firesheet_core::{BlankIdPolicy, IncidentRecord, SyncConfig};
use firesheet_store::{MemorySheetStore, RangeWrite, SheetStore, StoreError};
use firesheet_sync::{pipeline, IncidentSource, SyncError};

const SHEET: &str = "Incidents";

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

struct StubSource {
    records: Vec<IncidentRecord>,
    calls: Cell<usize>,
}

impl StubSource {
    fn new(records: Vec<IncidentRecord>) -> Self {
        Self {
            records,
            calls: Cell::new(0),
        }
    }

    fn empty() -> Self {
        Self::new(Vec::new())
    }
}

impl IncidentSource for StubSource {
    fn fetch(&self) -> Result<Vec<IncidentRecord>, SyncError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.records.clone())
    }
}

/// Store whose sort endpoint always fails; everything else delegates.
struct SortFailStore(MemorySheetStore);

impl SheetStore for SortFailStore {
    fn read_all(&self, sheet: &str) -> Result<Vec<Vec<String>>, StoreError> {
        self.0.read_all(sheet)
    }

    fn append_rows(&self, sheet: &str, rows: &[Vec<String>]) -> Result<(), StoreError> {
        self.0.append_rows(sheet, rows)
    }

    fn batch_update(&self, sheet: &str, writes: &[RangeWrite]) -> Result<(), StoreError> {
        self.0.batch_update(sheet, writes)
    }

    fn sheet_id(&self, title: &str) -> Result<i64, StoreError> {
        self.0.sheet_id(title)
    }

    fn sort_range(&self, _: i64, _: usize, _: bool) -> Result<(), StoreError> {
        Err(StoreError::Backend("sort rejected".to_string()))
    }
}

fn config() -> SyncConfig {
    SyncConfig {
        spreadsheet_id: "doc-1".to_string(),
        sheet_name: SHEET.to_string(),
        api_base_url: "https://incidents.example/api/list".to_string(),
        access_token: None,
        request_timeout_secs: 30,
        blank_id_policy: BlankIdPolicy::Append,
        sort_column: "incident_date_last_update".to_string(),
    }
}

fn record(id: &str, name: &str, updated: &str) -> IncidentRecord {
    let mut record = IncidentRecord::new();
    record.insert("incident_id", id);
    record.insert("incident_name", name);
    record.insert("incident_date_last_update", updated);
    record
}

fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect()
}

fn seeded_store() -> MemorySheetStore {
    let store = MemorySheetStore::with_sheet(SHEET);
    store.seed(
        SHEET,
        grid(&[
            &["incident_id", "incident_name", "incident_date_last_update"],
            &["A1", "Creek Fire", "2024-01-01T00:00:00"],
        ]),
    );
    store
}

// ---------------------------------------------------------------------------
// First-time load
// ---------------------------------------------------------------------------

#[test]
fn empty_sheet_gets_header_plus_rows_in_one_load() {
    let store = MemorySheetStore::with_sheet(SHEET);
    let source = StubSource::new(vec![
        record("A1", "Creek Fire", "2024-01-01T00:00:00"),
        record("B2", "Ridge Fire", "2024-06-01T00:00:00"),
    ]);

    let outcome = pipeline::run(&store, &source, &config(), false).expect("sync");
    assert!(outcome.initial_load);
    assert_eq!(outcome.appended, 2);
    assert!(outcome.sorted);

    let snapshot = store.snapshot(SHEET);
    assert_eq!(
        snapshot[0],
        vec!["incident_name", "incident_date_last_update", "incident_id"],
        "header follows rename-table order"
    );
    // Sorted descending by last update after the load.
    assert_eq!(snapshot[1][2], "B2");
    assert_eq!(snapshot[2][2], "A1");
}

#[test]
fn empty_sheet_and_empty_remote_write_nothing() {
    let store = MemorySheetStore::with_sheet(SHEET);
    let source = StubSource::empty();

    let outcome = pipeline::run(&store, &source, &config(), false).expect("sync");
    assert!(outcome.initial_load);
    assert_eq!(outcome.appended, 0);
    assert!(!outcome.sorted);
    assert!(store.snapshot(SHEET).is_empty());
}

// ---------------------------------------------------------------------------
// Incremental sync
// ---------------------------------------------------------------------------

#[test]
fn unchanged_row_is_skipped_and_new_row_appended() {
    let store = seeded_store();
    let source = StubSource::new(vec![
        record("A1", "Creek Fire", "2024-01-01T00:00:00"),
        record("B2", "Ridge Fire", "2023-06-01T00:00:00"),
    ]);

    let outcome = pipeline::run(&store, &source, &config(), false).expect("sync");
    assert_eq!(outcome.appended, 1);
    assert_eq!(outcome.updated, 0);

    let snapshot = store.snapshot(SHEET);
    assert_eq!(snapshot.len(), 3);
    // Sorted descending: A1 (2024) above B2 (2023).
    assert_eq!(snapshot[1][0], "A1");
    assert_eq!(snapshot[2][0], "B2");
}

#[test]
fn changed_timestamp_is_patched_in_place() {
    let store = seeded_store();
    let source = StubSource::new(vec![record("A1", "Creek Fire", "2024-06-01T00:00:00")]);

    let outcome = pipeline::run(&store, &source, &config(), false).expect("sync");
    assert_eq!(outcome.appended, 0);
    assert_eq!(outcome.updated, 1);

    let snapshot = store.snapshot(SHEET);
    assert_eq!(snapshot.len(), 2, "update must not add rows");
    assert_eq!(snapshot[1], vec!["A1", "Creek Fire", "2024-06-01T00:00:00"]);
}

#[test]
fn second_run_with_no_remote_changes_is_a_no_op() {
    let store = MemorySheetStore::with_sheet(SHEET);
    let records = vec![
        record("A1", "Creek Fire", "2024-01-01T00:00:00"),
        record("B2", "Ridge Fire", "2024-06-01T00:00:00"),
    ];

    let first = pipeline::run(&store, &StubSource::new(records.clone()), &config(), false)
        .expect("first sync");
    assert!(first.initial_load);

    let second = pipeline::run(&store, &StubSource::new(records), &config(), false)
        .expect("second sync");
    assert!(!second.initial_load);
    assert_eq!(second.appended, 0, "idempotent: nothing to append");
    assert_eq!(second.updated, 0, "idempotent: nothing to update");
}

#[test]
fn empty_remote_against_populated_sheet_is_success_with_zero_writes() {
    let store = seeded_store();
    let outcome = pipeline::run(&store, &StubSource::empty(), &config(), false).expect("sync");

    assert_eq!(outcome.appended, 0);
    assert_eq!(outcome.updated, 0);
    assert!(outcome.sorted, "sort still runs when nothing was written");
    assert_eq!(store.snapshot(SHEET).len(), 2);
}

#[test]
fn schema_error_is_raised_before_any_remote_call() {
    let store = MemorySheetStore::with_sheet(SHEET);
    store.seed(SHEET, grid(&[&["incident_name"], &["Creek Fire"]]));
    let source = StubSource::empty();

    let err = pipeline::run(&store, &source, &config(), false).expect_err("schema error");
    assert!(matches!(err, SyncError::MissingColumn { .. }));
    assert_eq!(source.calls.get(), 0, "no fetch before the schema check");
}

#[test]
fn blank_id_rows_append_by_default_and_drop_under_policy() {
    let blank = record("", "No Id Fire", "2024-03-01T00:00:00");

    let store = seeded_store();
    let outcome =
        pipeline::run(&store, &StubSource::new(vec![blank.clone()]), &config(), false)
            .expect("sync");
    assert_eq!(outcome.appended, 1);
    assert_eq!(store.snapshot(SHEET).len(), 3);

    let store = seeded_store();
    let mut dropping = config();
    dropping.blank_id_policy = BlankIdPolicy::Drop;
    let outcome =
        pipeline::run(&store, &StubSource::new(vec![blank]), &dropping, false).expect("sync");
    assert_eq!(outcome.appended, 0);
    assert_eq!(outcome.dropped_blank_ids, 1);
    assert_eq!(store.snapshot(SHEET).len(), 2);
}

#[test]
fn sort_failure_never_fails_the_sync() {
    let store = SortFailStore(seeded_store());
    let source = StubSource::new(vec![record("B2", "Ridge Fire", "2024-02-01T00:00:00")]);

    let outcome = pipeline::run(&store, &source, &config(), false).expect("sync succeeds");
    assert_eq!(outcome.appended, 1);
    assert!(!outcome.sorted);
    assert_eq!(store.0.snapshot(SHEET).len(), 3, "writes still applied");
}

#[test]
fn appends_and_updates_in_one_run_do_not_collide() {
    let store = MemorySheetStore::with_sheet(SHEET);
    store.seed(
        SHEET,
        grid(&[
            &["incident_id", "incident_name", "incident_date_last_update"],
            &["A1", "Creek Fire", "2024-01-01T00:00:00"],
            &["B2", "Ridge Fire", "2024-01-02T00:00:00"],
        ]),
    );
    let source = StubSource::new(vec![
        record("C3", "New Fire", "2023-01-01T00:00:00"),
        record("A1", "Creek Fire", "2024-07-01T00:00:00"),
    ]);

    let outcome = pipeline::run(&store, &source, &config(), false).expect("sync");
    assert_eq!(outcome.appended, 1);
    assert_eq!(outcome.updated, 1);

    // Post-sort order is by last update descending; the update must have
    // landed on A1's row, not on the appended C3.
    let snapshot = store.snapshot(SHEET);
    let ids: Vec<_> = snapshot[1..].iter().map(|r| r[0].as_str()).collect();
    assert_eq!(ids, ["A1", "B2", "C3"]);
    assert_eq!(snapshot[1][2], "2024-07-01T00:00:00");
}

// ---------------------------------------------------------------------------
// Dry run
// ---------------------------------------------------------------------------

#[test]
fn dry_run_reports_the_plan_without_writing() {
    let store = seeded_store();
    let source = StubSource::new(vec![
        record("A1", "Creek Fire", "2024-06-01T00:00:00"),
        record("B2", "Ridge Fire", "2024-02-01T00:00:00"),
    ]);

    let outcome = pipeline::run(&store, &source, &config(), true).expect("dry run");
    assert!(outcome.dry_run);
    assert_eq!(outcome.appended, 1);
    assert_eq!(outcome.updated, 1);
    assert!(!outcome.sorted);

    assert_eq!(
        store.snapshot(SHEET),
        grid(&[
            &["incident_id", "incident_name", "incident_date_last_update"],
            &["A1", "Creek Fire", "2024-01-01T00:00:00"],
        ]),
        "dry-run must not touch the store"
    );
}

#[test]
fn dry_run_initial_load_writes_nothing() {
    let store = MemorySheetStore::with_sheet(SHEET);
    let source = StubSource::new(vec![record("A1", "Creek Fire", "2024-01-01T00:00:00")]);

    let outcome = pipeline::run(&store, &source, &config(), true).expect("dry run");
    assert!(outcome.initial_load);
    assert_eq!(outcome.appended, 1);
    assert!(store.snapshot(SHEET).is_empty());
}
