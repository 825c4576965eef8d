//! Domain types for the incident sync.
//!
//! A [`SheetTable`] is the in-memory image of the persisted sheet: one header
//! row plus data rows, rectangular by construction. An [`IncidentRecord`] is
//! a single remote incident as a column-name → value mapping, before it has
//! been aligned to any header.

use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Column contract
// ---------------------------------------------------------------------------

/// Column holding the stable unique incident identifier.
pub const ID_COLUMN: &str = "incident_id";

/// Column holding the incident's last-update timestamp.
pub const LAST_UPDATE_COLUMN: &str = "incident_date_last_update";

/// Sheet row number (1-based) of a data row at `position` in a table.
///
/// The header occupies row 1, so the first data row is row 2.
pub fn data_row_number(position: usize) -> u32 {
    position as u32 + 2
}

// ---------------------------------------------------------------------------
// IncidentRecord
// ---------------------------------------------------------------------------

/// One remote incident: column name → string value.
///
/// Values are always strings; absent columns are simply absent from the map
/// (alignment fills them with the empty string, never a null marker).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncidentRecord(BTreeMap<String, String>);

impl IncidentRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    /// Iterate over the record's column names.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Project this record onto `header`, in header order.
    ///
    /// Columns absent from the record become the empty string; columns absent
    /// from the header are dropped. This is the column-alignment step that
    /// keeps the persisted schema from drifting.
    pub fn aligned_row(&self, header: &[String]) -> Vec<String> {
        header
            .iter()
            .map(|col| self.0.get(col).cloned().unwrap_or_default())
            .collect()
    }
}

impl FromIterator<(String, String)> for IncidentRecord {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// SheetTable
// ---------------------------------------------------------------------------

/// The persisted sheet materialized in memory: header + rectangular rows.
///
/// Invariant: every row has exactly `header.len()` cells. Row order is
/// significant — a row at position `i` lives at sheet row `i + 2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl SheetTable {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    /// Build a table from a raw grid as returned by the store.
    ///
    /// The first row is the header; the rest are data rows. Returns `None`
    /// for a zero-row grid — the "empty sheet" condition callers treat as
    /// first-time load. Ragged data rows are padded with empty strings to
    /// the header width; over-long rows are truncated to it.
    pub fn from_grid(grid: Vec<Vec<String>>) -> Option<Self> {
        let mut rows = grid.into_iter();
        let header = rows.next()?;
        let mut table = Self::new(header);
        for row in rows {
            table.push_row(row);
        }
        Some(table)
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `name` in the header, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|col| col == name)
    }

    /// Append a data row, padding or truncating it to the header width.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.header.len(), String::new());
        self.rows.push(row);
    }

    /// Cell value at `position` for the named column.
    pub fn value(&self, position: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(position).map(|row| row[idx].as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn empty_grid_is_the_empty_sheet_condition() {
        assert!(SheetTable::from_grid(vec![]).is_none());
    }

    #[test]
    fn header_only_grid_yields_empty_table() {
        let table = SheetTable::from_grid(grid(&[&["incident_id", "incident_name"]])).unwrap();
        assert_eq!(table.header(), ["incident_id", "incident_name"]);
        assert!(table.is_empty());
    }

    #[test]
    fn ragged_rows_are_padded_to_header_width() {
        let table =
            SheetTable::from_grid(grid(&[&["a", "b", "c"], &["1"], &["1", "2", "3"]])).unwrap();
        assert_eq!(table.rows()[0], vec!["1", "", ""]);
        assert_eq!(table.rows()[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn overlong_rows_are_truncated_to_header_width() {
        let table = SheetTable::from_grid(grid(&[&["a", "b"], &["1", "2", "3", "4"]])).unwrap();
        assert_eq!(table.rows()[0], vec!["1", "2"]);
    }

    #[test]
    fn column_index_follows_header_order() {
        let table = SheetTable::new(vec!["a".into(), "b".into()]);
        assert_eq!(table.column_index("b"), Some(1));
        assert_eq!(table.column_index("z"), None);
    }

    #[test]
    fn data_row_number_accounts_for_header_offset() {
        assert_eq!(data_row_number(0), 2);
        assert_eq!(data_row_number(41), 43);
    }

    #[test]
    fn aligned_row_projects_onto_header() {
        let mut record = IncidentRecord::new();
        record.insert("incident_id", "A1");
        record.insert("incident_extra", "dropped");
        let header = vec!["incident_id".to_string(), "incident_name".to_string()];
        assert_eq!(record.aligned_row(&header), vec!["A1", ""]);
    }

    #[test]
    fn value_looks_up_by_column_name() {
        let table = SheetTable::from_grid(grid(&[&["incident_id"], &["A1"]])).unwrap();
        assert_eq!(table.value(0, "incident_id"), Some("A1"));
        assert_eq!(table.value(0, "missing"), None);
        assert_eq!(table.value(9, "incident_id"), None);
    }
}
