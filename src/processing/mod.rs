//! In-memory column transformations.
//!
//! The processing layer operates on a [`crate::types::Table`] held by the caller. It keeps no
//! state between calls.
//!
//! - [`convert_column()`]: change one column's type, coercing unreadable cells to null
//! - [`clean_text()`] / [`clean_column()`]: lower-case, trim, regex-replace and collapse whitespace
//!
//! The two differ on failure: conversion tolerates bad cells one by one, while cleaning rejects
//! an invalid pattern up front and changes nothing.
//!
//! ## Example: convert then clean
//!
//! ```rust
//! use data_cleaner::processing::{clean_column, convert_column_named};
//! use data_cleaner::types::{DataType, Field, Schema, Table, Value};
//!
//! let mut table = Table::new(
//!     Schema::new(vec![
//!         Field::new("code", DataType::Float64),
//!         Field::new("label", DataType::Utf8),
//!     ]),
//!     vec![
//!         vec![Value::Float64(7.0), Value::Utf8("  Blue -- SKY ".into())],
//!         vec![Value::Null, Value::Utf8("RED!".into())],
//!     ],
//! );
//!
//! convert_column_named(&mut table, "code", "int").unwrap();
//! clean_column(&mut table, "label", r"[^a-z\s]", " ").unwrap();
//!
//! assert_eq!(table.rows[0], vec![Value::Int64(7), Value::Utf8("blue sky".into())]);
//! assert_eq!(table.rows[1], vec![Value::Null, Value::Utf8("red".into())]);
//! ```

pub mod clean;
pub mod convert;
pub mod parse;

pub use clean::{clean_column, clean_text, TextCleaner};
pub use convert::{convert_column, convert_column_named, ConvertTarget};
