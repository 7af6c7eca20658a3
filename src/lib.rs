//! `data-cleaner` is the core of a small table-cleaning tool: load a CSV or Excel file into an
//! in-memory [`types::Table`], convert column types, clean text with regular expressions, and
//! export the result as CSV or XLSX.
//!
//! The crate holds no state between calls. The caller owns the [`types::Table`] and passes it
//! into each operation; mutating operations take `&mut Table`.
//!
//! ## Supported files
//!
//! - **Input** (detected by extension, case-insensitive): `.csv`, `.xlsx`, `.xls`
//! - **Output**: `csv`, `xlsx`
//!
//! Cells are [`types::Value`]s: integer, float, boolean, text, timestamp or
//! [`types::Value::Null`] for missing data.
//!
//! ## Example: load, convert, clean, export
//!
//! ```no_run
//! use data_cleaner::export::{ensure_extension, export_table, ExportFormat, ExportOptions};
//! use data_cleaner::ingestion::{load_from_path, LoadOptions};
//! use data_cleaner::processing::{clean_column, convert_column_named};
//!
//! # fn main() -> Result<(), data_cleaner::CleanerError> {
//! let mut table = load_from_path("people.xlsx", &LoadOptions::default())?;
//!
//! convert_column_named(&mut table, "age", "int")?;
//! clean_column(&mut table, "comment", r"[^a-z0-9\s]", " ")?;
//!
//! let format: ExportFormat = "csv".parse()?;
//! let out = ensure_extension("people_clean", format);
//! export_table(&table, &out, format, &ExportOptions::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error policy
//!
//! Every operation returns [`CleanerResult`]. Conversion is tolerant per cell (unreadable cells
//! become null); cleaning validates its pattern before touching any value.
//!
//! ## Modules
//!
//! - [`ingestion`]: file detection and loading
//! - [`processing`]: column conversion and text cleaning
//! - [`export`]: writing tables and save-path normalisation
//! - [`preview`]: head-of-table rendering
//! - [`observability`]: observer hooks for loads and exports
//! - [`config`]: persisted settings
//! - [`types`]: table data model
//! - [`error`]: error types

pub mod config;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod observability;
pub mod preview;
pub mod processing;
pub mod types;

pub use error::{CleanerError, CleanerResult};
