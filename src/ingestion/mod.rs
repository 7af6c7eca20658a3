//! Detection and loading.
//!
//! Most callers should use [`load_from_path`] (from [`unified`]) which:
//!
//! - detects the format by file extension ([`detect_file`])
//! - reads the file into an in-memory [`crate::types::Table`]
//! - optionally reports success/failure/alerts to a [`crate::observability::PipelineObserver`]
//!
//! Format-specific readers are also available under:
//! - [`csv`]
//! - [`excel`]

pub mod csv;
pub mod detect;
pub mod excel;
pub mod infer;
pub mod unified;

pub use detect::{detect_file, FileFormat, FileSpec};
pub use infer::DEFAULT_NA_VALUES;
pub use unified::{load, load_from_path, LoadOptions};
