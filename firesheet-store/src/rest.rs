//! REST [`SheetStore`] backed by a Google-Sheets-shaped values API.
//!
//! Four endpoints: `values/{range}` (read), `values/{range}:append`,
//! `values:batchUpdate`, and the document-level `:batchUpdate` used for the
//! sort request, plus the metadata read that resolves sheet ids by title.
//! Token acquisition is the caller's problem — this client only attaches
//! the bearer header it is given.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{http_err, payload_err, StoreError};
use crate::store::{RangeWrite, SheetStore};

/// Production endpoint of the values API.
pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

pub struct RestSheetStore {
    agent: ureq::Agent,
    base_url: String,
    spreadsheet_id: String,
    token: String,
}

impl RestSheetStore {
    /// A store talking to [`DEFAULT_BASE_URL`].
    ///
    /// The `agent` carries the per-request timeout; it is constructed by the
    /// caller and scoped to one sync invocation.
    pub fn new(agent: ureq::Agent, spreadsheet_id: &str, token: &str) -> Self {
        Self::with_base_url(agent, DEFAULT_BASE_URL, spreadsheet_id, token)
    }

    /// Same, against an explicit base URL.
    pub fn with_base_url(
        agent: ureq::Agent,
        base_url: &str,
        spreadsheet_id: &str,
        token: &str,
    ) -> Self {
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            token: token.to_string(),
        }
    }

    fn values_url(&self, range: &str, suffix: &str) -> String {
        format!(
            "{}/{}/values/{}{}",
            self.base_url,
            self.spreadsheet_id,
            encode_component(range),
            suffix
        )
    }

    fn document_url(&self, suffix: &str) -> String {
        format!("{}/{}{}", self.base_url, self.spreadsheet_id, suffix)
    }

    fn authorized(&self, request: ureq::Request) -> ureq::Request {
        request.set("Authorization", &format!("Bearer {}", self.token))
    }

    fn post_json(&self, url: &str, body: Value) -> Result<(), StoreError> {
        self.authorized(self.agent.post(url))
            .send_json(body)
            .map_err(|e| http_err(url, e))?;
        Ok(())
    }
}

impl SheetStore for RestSheetStore {
    fn read_all(&self, sheet: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let url = self.values_url(&quote_sheet(sheet), "");
        tracing::debug!("GET {url}");
        let response = self
            .authorized(self.agent.get(&url))
            .call()
            .map_err(|e| http_err(&url, e))?;
        let body: ValueRange = response.into_json().map_err(|e| payload_err(&url, e))?;
        Ok(body.values)
    }

    fn append_rows(&self, sheet: &str, rows: &[Vec<String>]) -> Result<(), StoreError> {
        let url = self.values_url(&quote_sheet(sheet), ":append");
        tracing::debug!("POST {url} ({} rows)", rows.len());
        self.authorized(self.agent.post(&url))
            .query("valueInputOption", "RAW")
            .query("insertDataOption", "INSERT_ROWS")
            .send_json(json!({ "values": rows }))
            .map_err(|e| http_err(&url, e))?;
        Ok(())
    }

    fn batch_update(&self, sheet: &str, writes: &[RangeWrite]) -> Result<(), StoreError> {
        let url = self.document_url("/values:batchUpdate");
        tracing::debug!("POST {url} ({} ranges)", writes.len());
        self.post_json(&url, build_batch_update_request(sheet, writes))
    }

    fn sheet_id(&self, title: &str) -> Result<i64, StoreError> {
        let url = self.document_url("");
        tracing::debug!("GET {url}");
        let response = self
            .authorized(self.agent.get(&url))
            .query("fields", "sheets.properties")
            .call()
            .map_err(|e| http_err(&url, e))?;
        let meta: SpreadsheetMeta = response.into_json().map_err(|e| payload_err(&url, e))?;
        meta.sheets
            .into_iter()
            .find(|s| s.properties.title == title)
            .map(|s| s.properties.sheet_id)
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
        let url = self.document_url(":batchUpdate");
        tracing::debug!("POST {url} (sort sheet {sheet_id} col {column_index})");
        self.post_json(&url, build_sort_request(sheet_id, column_index, descending))
    }
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<MetaSheet>,
}

#[derive(Debug, Deserialize)]
struct MetaSheet {
    #[serde(default)]
    properties: SheetProperties,
}

#[derive(Debug, Default, Deserialize)]
struct SheetProperties {
    #[serde(default)]
    title: String,
    #[serde(default, rename = "sheetId")]
    sheet_id: i64,
}

fn build_batch_update_request(sheet: &str, writes: &[RangeWrite]) -> Value {
    let data: Vec<Value> = writes
        .iter()
        .map(|w| {
            json!({
                "range": a1_range(sheet, w.start_row),
                "values": w.rows,
            })
        })
        .collect();
    json!({ "valueInputOption": "RAW", "data": data })
}

fn build_sort_request(sheet_id: i64, column_index: usize, descending: bool) -> Value {
    json!({
        "requests": [{
            "sortRange": {
                "range": {
                    "sheetId": sheet_id,
                    // Row 1 is the header; end indices omitted => to the end.
                    "startRowIndex": 1,
                    "startColumnIndex": 0,
                },
                "sortSpecs": [{
                    "dimensionIndex": column_index,
                    "sortOrder": if descending { "DESCENDING" } else { "ASCENDING" },
                }],
            }
        }]
    })
}

// ---------------------------------------------------------------------------
// A1 ranges
// ---------------------------------------------------------------------------

/// `'Sheet Name'!A<row>` — rows start at column A and run to the row's end.
fn a1_range(sheet: &str, start_row: u32) -> String {
    format!("{}!A{start_row}", quote_sheet(sheet))
}

/// Sheet titles are always single-quoted in A1 notation; embedded quotes
/// are doubled.
fn quote_sheet(sheet: &str) -> String {
    format!("'{}'", sheet.replace('\'', "''"))
}

/// Minimal percent-encoding for a range embedded in a URL path segment.
fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '\'' => out.push_str("%27"),
            '!' => out.push_str("%21"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            '/' => out.push_str("%2F"),
            _ => out.push(ch),
        }
    }
    out
}
