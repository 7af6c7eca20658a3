//! Writing tables back to disk.
//!
//! - [`ensure_extension`]: append `.csv` / `.xlsx` to a save path that lacks it
//! - [`export_table`]: write a [`Table`] as CSV or XLSX (header row, no index column)

pub mod csv;
pub mod excel;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{CleanerError, CleanerResult};
use crate::ingestion::unified::table_stats;
use crate::ingestion::FileFormat;
use crate::observability::{ObserverConfig, Operation, OperationContext};
use crate::types::Table;

/// Output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated values.
    #[default]
    Csv,
    /// Office Open XML workbook.
    Xlsx,
}

impl ExportFormat {
    /// Lower-case extension including the leading dot.
    pub fn extension(self) -> &'static str {
        FileFormat::from(self).extension()
    }

    /// Name accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

impl From<ExportFormat> for FileFormat {
    fn from(value: ExportFormat) -> Self {
        match value {
            ExportFormat::Csv => FileFormat::Csv,
            ExportFormat::Xlsx => FileFormat::Xlsx,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = CleanerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" => Ok(ExportFormat::Xlsx),
            _ => Err(CleanerError::UnknownExportFormat {
                format: s.to_string(),
            }),
        }
    }
}

/// Append the format's extension unless `path` already ends with it.
///
/// The comparison ignores case, so `out.CSV` is returned unchanged for [`ExportFormat::Csv`].
/// No I/O is performed.
///
/// ```
/// use data_cleaner::export::{ensure_extension, ExportFormat};
///
/// assert_eq!(ensure_extension("out", ExportFormat::Csv), "out.csv");
/// assert_eq!(ensure_extension("out.CSV", ExportFormat::Csv), "out.CSV");
/// assert_eq!(ensure_extension("out.csv", ExportFormat::Xlsx), "out.csv.xlsx");
/// ```
pub fn ensure_extension(path: &str, format: ExportFormat) -> String {
    let ext = format.extension();
    if path.to_lowercase().ends_with(ext) {
        path.to_string()
    } else {
        format!("{path}{ext}")
    }
}

/// Options controlling export behavior.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<ObserverConfig>,
}

/// Write `table` to `path` in `format`.
///
/// Both formats write a header row and no row-index column. Any I/O or encoding failure is a
/// [`CleanerError::WriteError`] carrying the original cause.
pub fn export_table(
    table: &Table,
    path: impl AsRef<Path>,
    format: ExportFormat,
    options: &ExportOptions,
) -> CleanerResult<()> {
    let path = path.as_ref();
    let result = match format {
        ExportFormat::Csv => csv::write_csv_to_path(table, path),
        ExportFormat::Xlsx => excel::write_xlsx_to_path(table, path),
    };

    if result.is_ok() {
        info!(
            "exported {} row(s) to {} as {format}",
            table.row_count(),
            path.display()
        );
    }

    if let Some(obs) = options.observer.as_ref() {
        let ctx = OperationContext {
            operation: Operation::Export,
            path: path.to_path_buf(),
            format: Some(format.into()),
        };
        obs.report(&ctx, &result, |_| table_stats(table));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::{ensure_extension, ExportFormat};
    use crate::error::CleanerError;

    #[test]
    fn appends_missing_extension() {
        assert_eq!(ensure_extension("out", ExportFormat::Csv), "out.csv");
        assert_eq!(ensure_extension("out", ExportFormat::Xlsx), "out.xlsx");
        assert_eq!(ensure_extension("dir.v2/out", ExportFormat::Csv), "dir.v2/out.csv");
    }

    #[test]
    fn matching_extension_is_kept_regardless_of_case() {
        assert_eq!(ensure_extension("out.csv", ExportFormat::Csv), "out.csv");
        assert_eq!(ensure_extension("FILE.CSV", ExportFormat::Csv), "FILE.CSV");
        assert_eq!(ensure_extension("Book.XlSx", ExportFormat::Xlsx), "Book.XlSx");
    }

    #[test]
    fn other_extensions_get_the_format_appended() {
        assert_eq!(ensure_extension("out.xls", ExportFormat::Xlsx), "out.xls.xlsx");
        assert_eq!(ensure_extension("out.xlsx", ExportFormat::Csv), "out.xlsx.csv");
    }

    #[test]
    fn format_names_parse() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!(" XLSX ".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
        let err = "json".parse::<ExportFormat>().unwrap_err();
        assert!(matches!(err, CleanerError::UnknownExportFormat { ref format } if format == "json"));
    }
}
