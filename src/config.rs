//! User-facing settings that a front end persists between sessions.
//!
//! Stored as JSON. Every key is optional; missing keys take their default.
//!
//! ```
//! use data_cleaner::config::CleanerConfig;
//! use data_cleaner::export::ExportFormat;
//!
//! let cfg = CleanerConfig::from_json_str(r#"{ "preview_rows": 25, "export_format": "xlsx" }"#).unwrap();
//! assert_eq!(cfg.preview_rows, 25);
//! assert_eq!(cfg.export_format, ExportFormat::Xlsx);
//! assert_eq!(cfg.replacement, " ");
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CleanerError, CleanerResult};
use crate::export::ExportFormat;
use crate::ingestion::{LoadOptions, DEFAULT_NA_VALUES};
use crate::preview::{DEFAULT_PREVIEW_ROWS, MAX_PREVIEW_ROWS, MIN_PREVIEW_ROWS};

/// Persisted settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    /// Rows shown by [`crate::preview::preview`]; clamped to `1..=500`.
    pub preview_rows: usize,
    /// Replacement text offered for the regex cleaning step.
    pub replacement: String,
    /// Default output format.
    pub export_format: ExportFormat,
    /// CSV cell texts that load as null.
    pub na_values: Vec<String>,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            preview_rows: DEFAULT_PREVIEW_ROWS,
            replacement: " ".to_string(),
            export_format: ExportFormat::default(),
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CleanerConfig {
    /// Parse settings from a JSON document.
    pub fn from_json_str(input: &str) -> CleanerResult<Self> {
        let mut cfg: Self = serde_json::from_str(input)?;
        cfg.preview_rows = cfg.preview_rows.clamp(MIN_PREVIEW_ROWS, MAX_PREVIEW_ROWS);
        Ok(cfg)
    }

    /// Read settings from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> CleanerResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| CleanerError::read(path, e))?;
        Self::from_json_str(&text)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_string(&self) -> CleanerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load options derived from these settings (no observer attached).
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            na_values: self.na_values.clone(),
            ..LoadOptions::default()
        }
    }
}
