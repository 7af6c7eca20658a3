//! Unified load entrypoint.
//!
//! Most callers should use [`load_from_path`], which detects the format from the extension and
//! reads the file into an in-memory [`crate::types::Table`]. Callers that already hold a
//! [`FileSpec`] use [`load`].

use std::path::Path;

use log::info;

use crate::error::CleanerResult;
use crate::observability::{ObserverConfig, Operation, OperationContext, TableStats};
use crate::types::Table;

use super::detect::{detect_file, FileFormat, FileSpec};
use super::infer::DEFAULT_NA_VALUES;
use super::{csv, excel};

/// Options controlling how files are loaded.
///
/// Use [`Default`] for common cases.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// CSV cell texts that load as null.
    pub na_values: Vec<String>,
    /// Optional observer for logging/alerts.
    pub observer: Option<ObserverConfig>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
            observer: None,
        }
    }
}

/// Read a detected file into a fresh [`Table`].
///
/// - `.csv`: comma-separated values, first row as header, column types inferred from content
/// - `.xlsx` / `.xls`: first worksheet, first non-empty row as header
///
/// Any failure (missing file, permission problem, malformed content) is a
/// [`crate::CleanerError::ReadError`] carrying the original cause.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= the configured threshold
pub fn load(spec: &FileSpec, options: &LoadOptions) -> CleanerResult<Table> {
    let result = match spec.format() {
        FileFormat::Csv => csv::read_csv_from_path(spec.path(), &options.na_values),
        FileFormat::Xlsx | FileFormat::Xls => {
            excel::read_excel_from_path(spec.path(), spec.format())
        }
    };

    if let Ok(table) = &result {
        info!(
            "loaded {} ({} row(s), {} column(s))",
            spec.path().display(),
            table.row_count(),
            table.column_count()
        );
    }

    if let Some(obs) = options.observer.as_ref() {
        let ctx = OperationContext {
            operation: Operation::Load,
            path: spec.path().to_path_buf(),
            format: Some(spec.format()),
        };
        obs.report(&ctx, &result, table_stats);
    }

    result
}

/// Detect the format of `path` and load it.
///
/// ```no_run
/// use data_cleaner::ingestion::{load_from_path, LoadOptions};
///
/// # fn main() -> Result<(), data_cleaner::CleanerError> {
/// let table = load_from_path("people.csv", &LoadOptions::default())?;
/// println!("rows={} columns={:?}", table.row_count(), table.column_names());
/// # Ok(())
/// # }
/// ```
pub fn load_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> CleanerResult<Table> {
    let path = path.as_ref();
    let spec = match detect_file(path) {
        Ok(spec) => spec,
        Err(e) => {
            let result: CleanerResult<Table> = Err(e);
            if let Some(obs) = options.observer.as_ref() {
                let ctx = OperationContext {
                    operation: Operation::Load,
                    path: path.to_path_buf(),
                    format: None,
                };
                obs.report(&ctx, &result, table_stats);
            }
            return result;
        }
    };
    load(&spec, options)
}

pub(crate) fn table_stats(table: &Table) -> TableStats {
    TableStats {
        rows: table.row_count(),
        columns: table.column_count(),
    }
}
