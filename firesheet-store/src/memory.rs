//! In-memory [`SheetStore`] implementation.
//!
//! Honors the same contract as the REST backend — 1-based row addressing,
//! append-after-last-row, header-exempt sorting — so the sync engine can be
//! exercised without a network.

use std::cell::RefCell;

use crate::error::StoreError;
use crate::store::{RangeWrite, SheetStore};

#[derive(Debug, Clone)]
struct Sheet {
    title: String,
    grid: Vec<Vec<String>>,
}

/// A spreadsheet document held in memory. Sheet ids are assigned in
/// registration order. Single-threaded by design, like the sync itself.
#[derive(Debug, Default)]
pub struct MemorySheetStore {
    sheets: RefCell<Vec<Sheet>>,
}

impl MemorySheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A document with one empty sheet — the common test fixture.
    pub fn with_sheet(title: &str) -> Self {
        let store = Self::new();
        store.add_sheet(title);
        store
    }

    /// Register an empty sheet under `title`.
    pub fn add_sheet(&self, title: &str) {
        self.sheets.borrow_mut().push(Sheet {
            title: title.to_string(),
            grid: Vec::new(),
        });
    }

    /// Replace the grid of `title` wholesale (test setup).
    pub fn seed(&self, title: &str, grid: Vec<Vec<String>>) {
        let mut sheets = self.sheets.borrow_mut();
        match sheets.iter_mut().find(|s| s.title == title) {
            Some(sheet) => sheet.grid = grid,
            None => sheets.push(Sheet {
                title: title.to_string(),
                grid,
            }),
        }
    }

    /// A copy of the current grid of `title` (test assertions).
    pub fn snapshot(&self, title: &str) -> Vec<Vec<String>> {
        self.sheets
            .borrow()
            .iter()
            .find(|s| s.title == title)
            .map(|s| s.grid.clone())
            .unwrap_or_default()
    }

    fn with_sheet_mut<R>(
        &self,
        title: &str,
        f: impl FnOnce(&mut Sheet) -> R,
    ) -> Result<R, StoreError> {
        let mut sheets = self.sheets.borrow_mut();
        let sheet = sheets
            .iter_mut()
            .find(|s| s.title == title)
            .ok_or_else(|| StoreError::SheetNotFound {
                title: title.to_string(),
            })?;
        Ok(f(sheet))
    }
}

impl SheetStore for MemorySheetStore {
    fn read_all(&self, sheet: &str) -> Result<Vec<Vec<String>>, StoreError> {
        self.sheets
            .borrow()
            .iter()
            .find(|s| s.title == sheet)
            .map(|s| s.grid.clone())
            .ok_or_else(|| StoreError::SheetNotFound {
                title: sheet.to_string(),
            })
    }

    fn append_rows(&self, sheet: &str, rows: &[Vec<String>]) -> Result<(), StoreError> {
        self.with_sheet_mut(sheet, |s| s.grid.extend_from_slice(rows))
    }

    fn batch_update(&self, sheet: &str, writes: &[RangeWrite]) -> Result<(), StoreError> {
        self.with_sheet_mut(sheet, |s| {
            for write in writes {
                let start = write.start_row.saturating_sub(1) as usize;
                let needed = start + write.rows.len();
                if s.grid.len() < needed {
                    s.grid.resize(needed, Vec::new());
                }
                for (offset, row) in write.rows.iter().enumerate() {
                    s.grid[start + offset] = row.clone();
                }
            }
        })
    }

    fn sheet_id(&self, title: &str) -> Result<i64, StoreError> {
        self.sheets
            .borrow()
            .iter()
            .position(|s| s.title == title)
            .map(|pos| pos as i64)
            .ok_or_else(|| StoreError::SheetNotFound {
                title: title.to_string(),
            })
    }

    fn sort_range(
        &self,
        sheet_id: i64,
        column_index: usize,
        descending: bool,
    ) -> Result<(), StoreError> {
        let mut sheets = self.sheets.borrow_mut();
        let sheet = sheets
            .get_mut(sheet_id as usize)
            .ok_or(StoreError::UnknownSheetId { id: sheet_id })?;
        if sheet.grid.len() < 2 {
            return Ok(());
        }
        let data = &mut sheet.grid[1..];
        data.sort_by(|a, b| {
            let left = a.get(column_index).map(String::as_str).unwrap_or("");
            let right = b.get(column_index).map(String::as_str).unwrap_or("");
            if descending {
                right.cmp(left)
            } else {
                left.cmp(right)
            }
        });
        Ok(())
    }
}
