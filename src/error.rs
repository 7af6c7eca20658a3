use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for every table operation.
pub type CleanerResult<T> = Result<T, CleanerError>;

/// Underlying cause of a failed read or write.
///
/// Wrapped by [`CleanerError::ReadError`] and [`CleanerError::WriteError`] so callers can still
/// reach the original library error through [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum SourceError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or writing error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook reading error.
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// Workbook writing error.
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// The file was readable but its contents cannot form a table.
    #[error("{message}")]
    Malformed { message: String },
}

impl SourceError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Returns `true` when the failure came from the filesystem rather than the file contents.
    pub fn is_io(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::Csv(err) => matches!(err.kind(), csv::ErrorKind::Io(_)),
            Self::Excel(err) => matches!(err, calamine::Error::Io(_)),
            Self::Xlsx(err) => matches!(err, rust_xlsxwriter::XlsxError::IoError(_)),
            Self::Malformed { .. } => false,
        }
    }
}

/// Error type returned by detection, loading, conversion, cleaning and export.
///
/// Each operation either succeeds or fails with exactly one of these kinds. Pipeline-level
/// failures are raised before the table is touched.
#[derive(Debug, Error)]
pub enum CleanerError {
    /// The path's extension is not one of `.csv`, `.xlsx`, `.xls`.
    #[error("unsupported file type: '{extension}' ({})", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// The file could not be read or parsed into a table.
    #[error("failed to read {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: SourceError,
    },

    /// The named column does not exist in the table.
    #[error("column not found: '{column}'")]
    ColumnNotFound { column: String },

    /// The requested conversion target is not `int`, `float`, `datetime` or `string`.
    #[error("unknown target type: '{target}' (expected int, float, datetime or string)")]
    UnknownTargetType { target: String },

    /// The cleaning pattern is not a valid regular expression.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The export format is not `csv` or `xlsx`.
    #[error("unknown export format: '{format}' (expected csv or xlsx)")]
    UnknownExportFormat { format: String },

    /// The table could not be written to the destination.
    #[error("failed to write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: SourceError,
    },

    /// A configuration document could not be parsed.
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

impl CleanerError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: impl Into<SourceError>) -> Self {
        Self::ReadError {
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: impl Into<SourceError>) -> Self {
        Self::WriteError {
            path: path.into(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::{CleanerError, SourceError};

    #[test]
    fn read_error_message_surfaces_the_original_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = CleanerError::read("data/input.csv", io);

        let msg = err.to_string();
        assert!(msg.contains("data/input.csv"));
        assert!(msg.contains("no such file"));
        assert!(err.source().is_some());
    }

    #[test]
    fn io_classification_follows_the_wrapped_error() {
        let io = SourceError::from(std::io::Error::other("disk full"));
        assert!(io.is_io());
        assert!(!SourceError::malformed("no header row").is_io());
    }
}
