//! File-type detection by extension.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{CleanerError, CleanerResult};

/// Supported tabular file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// Comma-separated values.
    Csv,
    /// Office Open XML workbook.
    Xlsx,
    /// Legacy binary Excel workbook.
    Xls,
}

impl FileFormat {
    /// Parse a format from a file extension (case-insensitive, with or without the leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            _ => None,
        }
    }

    /// Canonical lower-case extension including the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => ".csv",
            Self::Xlsx => ".xlsx",
            Self::Xls => ".xls",
        }
    }

    /// Returns `true` for workbook formats.
    pub fn is_excel(self) -> bool {
        matches!(self, Self::Xlsx | Self::Xls)
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension()[1..])
    }
}

/// A path whose extension has been validated. Created by [`detect_file`], never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    path: PathBuf,
    format: FileFormat,
}

impl FileSpec {
    /// The path as given to [`detect_file`].
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Detected format.
    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Lower-cased extension including the leading dot (`.csv`, `.xlsx`, `.xls`).
    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }
}

/// Validate `path`'s extension against the supported set and tag it.
///
/// Matching is case-insensitive and looks only at the suffix; the file is not opened.
///
/// ```
/// use data_cleaner::ingestion::{detect_file, FileFormat};
///
/// let spec = detect_file("reports/Q1.XLSX").unwrap();
/// assert_eq!(spec.format(), FileFormat::Xlsx);
/// assert!(detect_file("notes.txt").is_err());
/// ```
pub fn detect_file(path: impl AsRef<Path>) -> CleanerResult<FileSpec> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match FileFormat::from_extension(&ext) {
        Some(format) => Ok(FileSpec {
            path: path.to_path_buf(),
            format,
        }),
        None => Err(CleanerError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension: if ext.is_empty() { ext } else { format!(".{ext}") },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{detect_file, FileFormat};
    use crate::error::CleanerError;

    #[test]
    fn detects_supported_extensions_in_any_case() {
        for (path, expected) in [
            ("a.csv", FileFormat::Csv),
            ("a.CSV", FileFormat::Csv),
            ("dir/b.Xlsx", FileFormat::Xlsx),
            ("c.xls", FileFormat::Xls),
            ("archive.tar.csv", FileFormat::Csv),
        ] {
            let spec = detect_file(path).unwrap();
            assert_eq!(spec.format(), expected, "{path}");
            assert_eq!(spec.path().to_str(), Some(path));
        }
    }

    #[test]
    fn rejects_other_or_missing_extensions() {
        for path in ["notes.txt", "data.json", "no_extension", ".csv", "book.xlsm"] {
            match detect_file(path) {
                Err(CleanerError::UnsupportedFormat { .. }) => {}
                other => panic!("{path}: expected UnsupportedFormat, got {other:?}"),
            }
        }
    }

    #[test]
    fn unsupported_message_names_the_extension() {
        let err = detect_file("notes.TXT").unwrap_err();
        assert!(err.to_string().contains("'.txt'"));
    }

    #[test]
    fn from_extension_accepts_leading_dot() {
        assert_eq!(FileFormat::from_extension(".XLS"), Some(FileFormat::Xls));
        assert_eq!(FileFormat::from_extension("parquet"), None);
    }
}
