//! Remote incident fetcher.
//!
//! Queries the incident API for the current calendar year (inactive
//! incidents included) and falls back to the prior year when the current
//! one has no records yet — useful in January, when the new season's feed
//! is still empty. Transport failures propagate; an empty feed for both
//! years is a valid, non-exceptional outcome.

use std::time::Duration;

use chrono::{Datelike, Utc};
use serde_json::Value;

use firesheet_core::{fields, IncidentRecord, SyncConfig};

use crate::error::SyncError;

/// Source of the current reporting cycle's incident records.
///
/// The engine only depends on this seam; tests substitute canned records.
pub trait IncidentSource {
    fn fetch(&self) -> Result<Vec<IncidentRecord>, SyncError>;
}

/// HTTP-backed [`IncidentSource`] for the real feed.
pub struct HttpIncidentSource {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpIncidentSource {
    /// Build from config: one agent per sync invocation, carrying the
    /// configured per-request timeout.
    pub fn from_config(config: &SyncConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build();
        Self::new(agent, &config.api_base_url)
    }

    pub fn new(agent: ureq::Agent, base_url: &str) -> Self {
        Self {
            agent,
            base_url: base_url.to_string(),
        }
    }

    /// Fetch and decode the feed for a single year.
    pub fn fetch_year(&self, year: i32) -> Result<Vec<IncidentRecord>, SyncError> {
        tracing::info!("fetching incidents from {} for year {year}", self.base_url);
        let response = self
            .agent
            .get(&self.base_url)
            .query("year", &year.to_string())
            .query("inactive", "true")
            .call()
            .map_err(|e| SyncError::Fetch {
                year,
                source: Box::new(e),
            })?;
        let payload: Value = response
            .into_json()
            .map_err(|e| SyncError::Feed { year, source: e })?;
        Ok(records_from_payload(&payload))
    }
}

impl IncidentSource for HttpIncidentSource {
    fn fetch(&self) -> Result<Vec<IncidentRecord>, SyncError> {
        let year = Utc::now().year();
        let records = self.fetch_year(year)?;
        if !records.is_empty() {
            return Ok(records);
        }

        tracing::info!("no incidents found for {year}, trying {}", year - 1);
        let records = self.fetch_year(year - 1)?;
        if records.is_empty() {
            tracing::info!("no incidents found for current or previous year");
        }
        Ok(records)
    }
}

// ---------------------------------------------------------------------------
// Feed decoding
// ---------------------------------------------------------------------------

/// Extract renamed incident records from a feed payload.
///
/// The feed is a feature collection: `{"features": [{"properties": {..}}]}`.
/// A payload of any other shape counts as zero features, not an error —
/// only unparseable JSON is a transport failure.
pub fn records_from_payload(payload: &Value) -> Vec<IncidentRecord> {
    let features = payload
        .get("features")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    features.iter().map(record_from_feature).collect()
}

fn record_from_feature(feature: &Value) -> IncidentRecord {
    let mut record = IncidentRecord::new();
    if let Some(properties) = feature.get("properties").and_then(Value::as_object) {
        for (field, value) in properties {
            record.insert(fields::rename_field(field), cell_value(value));
        }
    }
    record
}

/// Stringify a property value the way the sheet stores it.
fn cell_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
