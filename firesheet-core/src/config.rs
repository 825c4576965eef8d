//! YAML sync configuration.
//!
//! # Storage layout
//!
//! ```text
//! ~/.firesheet/
//!   config.yaml
//! ```
//!
//! # API pattern
//!
//! Loading has two forms:
//! - `load_at(path)` — explicit path; used in tests with `TempDir`
//! - `load()` — derives the path from `dirs::home_dir()`, delegates to `_at`
//!
//! Tests must NEVER call the no-arg wrapper; always use `_at`.
//!
//! The access token may come from the file or from `FIRESHEET_TOKEN`; the
//! environment wins so credentials can stay out of the YAML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::LAST_UPDATE_COLUMN;

/// Environment variable overriding `access_token`.
pub const TOKEN_ENV_VAR: &str = "FIRESHEET_TOKEN";

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// What to do with a remote row whose identifier is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BlankIdPolicy {
    /// Classify it as a new row and append it (upstream-compatible).
    #[default]
    Append,
    /// Exclude it from all writes; the dropped count is logged.
    Drop,
}

/// Everything a sync invocation needs, deserialized from `config.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Spreadsheet document identifier in the backing store.
    pub spreadsheet_id: String,

    /// Display name of the target sheet (tab).
    pub sheet_name: String,

    /// Base URL of the incident API (queried with `?year=&inactive=true`).
    pub api_base_url: String,

    /// Bearer token for the spreadsheet backend. Usually supplied via
    /// [`TOKEN_ENV_VAR`] instead of the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Per-request timeout applied to every remote call.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub blank_id_policy: BlankIdPolicy,

    /// Column the sheet is re-sorted by (descending) after every sync.
    #[serde(default = "default_sort_column")]
    pub sort_column: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_sort_column() -> String {
    LAST_UPDATE_COLUMN.to_string()
}

impl SyncConfig {
    /// The configured token, or [`ConfigError::MissingToken`].
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.access_token
            .as_deref()
            .ok_or(ConfigError::MissingToken { var: TOKEN_ENV_VAR })
    }
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// `<home>/.firesheet/config.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".firesheet").join("config.yaml")
}

/// Load the config from an explicit path and apply the environment token
/// override.
pub fn load_at(path: &Path) -> Result<SyncConfig, ConfigError> {
    let config = parse_file(path)?;
    Ok(apply_token_override(config, std::env::var(TOKEN_ENV_VAR).ok()))
}

/// `load_at` convenience wrapper — resolves `~/.firesheet/config.yaml`.
pub fn load() -> Result<SyncConfig, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
    load_at(&config_path_at(&home))
}

fn parse_file(path: &Path) -> Result<SyncConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// An environment-supplied token replaces whatever the file carried.
fn apply_token_override(mut config: SyncConfig, env_token: Option<String>) -> SyncConfig {
    if let Some(token) = env_token {
        config.access_token = Some(token);
    }
    config
}
