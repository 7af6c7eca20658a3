//! Column type conversion for [`crate::types::Table`].
//!
//! Conversion is element-wise tolerant: a cell that cannot be read as the target type becomes
//! [`Value::Null`] and the rest of the column is still converted. Only a missing column or an
//! unknown target aborts, and both are checked before anything is written.

use std::fmt;
use std::str::FromStr;

use log::{debug, info};

use crate::error::{CleanerError, CleanerResult};
use crate::types::{DataType, Table, Value};

use super::parse::{datetime_from_epoch_nanos, epoch_nanos, parse_datetime, parse_number, Number};

/// Logical type a column can be converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertTarget {
    /// Nullable 64-bit integer. Non-integral numbers are truncated toward zero.
    Int,
    /// 64-bit float.
    Float,
    /// Timestamp parsed permissively.
    Datetime,
    /// Text. Nulls stay null.
    String,
}

impl ConvertTarget {
    /// All targets, in the order a column-type picker would list them.
    pub const ALL: [ConvertTarget; 4] = [
        ConvertTarget::String,
        ConvertTarget::Int,
        ConvertTarget::Float,
        ConvertTarget::Datetime,
    ];

    /// Column type produced by this target.
    pub fn data_type(self) -> DataType {
        match self {
            ConvertTarget::Int => DataType::Int64,
            ConvertTarget::Float => DataType::Float64,
            ConvertTarget::Datetime => DataType::Timestamp,
            ConvertTarget::String => DataType::Utf8,
        }
    }

    /// Name accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            ConvertTarget::Int => "int",
            ConvertTarget::Float => "float",
            ConvertTarget::Datetime => "datetime",
            ConvertTarget::String => "string",
        }
    }

    /// Convert one value. Values that cannot be read as the target become [`Value::Null`].
    pub fn convert_value(self, value: &Value) -> Value {
        match self {
            ConvertTarget::Int => to_int(value),
            ConvertTarget::Float => to_float(value),
            ConvertTarget::Datetime => to_datetime(value),
            ConvertTarget::String => match value.to_text() {
                Some(text) => Value::Utf8(text),
                None => Value::Null,
            },
        }
    }
}

impl fmt::Display for ConvertTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConvertTarget {
    type Err = CleanerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "int" => Ok(ConvertTarget::Int),
            "float" => Ok(ConvertTarget::Float),
            "datetime" => Ok(ConvertTarget::Datetime),
            "string" => Ok(ConvertTarget::String),
            other => Err(CleanerError::UnknownTargetType {
                target: other.to_string(),
            }),
        }
    }
}

/// Convert `column` of `table` to `target` in place.
///
/// Row order and count are preserved and other columns are untouched.
///
/// ```
/// use data_cleaner::processing::{convert_column, ConvertTarget};
/// use data_cleaner::types::{DataType, Field, Schema, Table, Value};
///
/// let mut table = Table::new(
///     Schema::new(vec![Field::new("age", DataType::Utf8)]),
///     vec![
///         vec![Value::Utf8("3".into())],
///         vec![Value::Utf8("4.9".into())],
///         vec![Value::Utf8("x".into())],
///         vec![Value::Null],
///     ],
/// );
/// convert_column(&mut table, "age", ConvertTarget::Int).unwrap();
/// assert_eq!(
///     table.column("age").unwrap(),
///     vec![&Value::Int64(3), &Value::Int64(4), &Value::Null, &Value::Null]
/// );
/// ```
pub fn convert_column(table: &mut Table, column: &str, target: ConvertTarget) -> CleanerResult<()> {
    let idx = table
        .schema
        .index_of(column)
        .ok_or_else(|| CleanerError::ColumnNotFound {
            column: column.to_string(),
        })?;

    let mut coerced = 0usize;
    table.map_column(idx, target.data_type(), |value| {
        let out = target.convert_value(value);
        if out.is_null() && !value.is_null() {
            coerced += 1;
        }
        out
    });

    info!(
        "converted column '{column}' to {target} ({} row(s))",
        table.row_count()
    );
    if coerced > 0 {
        debug!("{coerced} value(s) in '{column}' could not be read as {target} and became null");
    }
    Ok(())
}

/// Convert using a target given by name (`int`, `float`, `datetime`, `string`).
///
/// The column is looked up first, then the target; neither failure modifies the table.
pub fn convert_column_named(table: &mut Table, column: &str, target: &str) -> CleanerResult<()> {
    if table.schema.index_of(column).is_none() {
        return Err(CleanerError::ColumnNotFound {
            column: column.to_string(),
        });
    }
    let target: ConvertTarget = target.parse()?;
    convert_column(table, column, target)
}

fn to_number(value: &Value) -> Option<Number> {
    match value {
        Value::Null => None,
        Value::Int64(i) => Some(Number::Int(*i)),
        Value::Float64(f) => Some(Number::Float(*f)),
        Value::Bool(b) => Some(Number::Int(i64::from(*b))),
        Value::Utf8(s) => parse_number(s),
        Value::Timestamp(ts) => epoch_nanos(ts).map(Number::Int),
    }
}

fn to_int(value: &Value) -> Value {
    to_number(value)
        .and_then(Number::to_i64)
        .map(Value::Int64)
        .unwrap_or(Value::Null)
}

fn to_float(value: &Value) -> Value {
    to_number(value)
        .and_then(Number::to_f64)
        .map(Value::Float64)
        .unwrap_or(Value::Null)
}

fn to_datetime(value: &Value) -> Value {
    let parsed = match value {
        Value::Timestamp(ts) => Some(*ts),
        Value::Utf8(s) => parse_datetime(s),
        Value::Int64(i) => Some(datetime_from_epoch_nanos(*i)),
        Value::Float64(f) => Number::Float(*f).to_i64().map(datetime_from_epoch_nanos),
        Value::Bool(_) | Value::Null => None,
    };
    parsed.map(Value::Timestamp).unwrap_or(Value::Null)
}
