//! Core data model types.
//!
//! A [`Table`] is an ordered set of named columns described by a [`Schema`] (a list of typed
//! [`Field`]s). Cells are [`Value`]s, with [`Value::Null`] standing for missing data.

use std::fmt;

use chrono::NaiveDateTime;

/// Display format for timestamps. Fractional seconds are only printed when non-zero.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Logical data type for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer (nullable).
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
    /// Date and time without a timezone.
    Timestamp,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Ordered list of fields describing the columns of a [`Table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single cell in a [`Table`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing value. Distinct from an empty string or zero.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
    /// Date and time without a timezone.
    Timestamp(NaiveDateTime),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Textual form of the value, or `None` for null.
    ///
    /// This is the representation used when a column is converted to strings, cleaned, written
    /// to CSV, or rendered in a preview.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Utf8(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float64(v) => f.write_str(&format_float(*v)),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Utf8(s) => f.write_str(s),
            Value::Timestamp(ts) => write!(f, "{}", ts.format(TIMESTAMP_FORMAT)),
        }
    }
}

/// Integral floats keep a float marker (`2.0`, `1e16`) so they read back as floats.
fn format_float(v: f64) -> String {
    if !v.is_finite() {
        v.to_string()
    } else if v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else if v.fract() == 0.0 {
        format!("{v:?}")
    } else {
        v.to_string()
    }
}

/// In-memory tabular value.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields; every row
/// has exactly one value per field.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table from schema and rows.
    ///
    /// # Panics
    ///
    /// Panics if any row's length differs from the schema field count.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        let expected_len = schema.fields.len();
        for row in &rows {
            assert!(
                row.len() == expected_len,
                "row length {} does not match schema length {}",
                row.len(),
                expected_len
            );
        }
        Self { schema, rows }
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the table.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<String> {
        self.schema.field_names().map(str::to_owned).collect()
    }

    /// Returns the values of `name` top to bottom, if the column exists.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.schema.index_of(name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Replace the column at `index` with `values`, updating its declared type.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range or `values` does not have one entry per row.
    pub fn set_column(&mut self, index: usize, data_type: DataType, values: Vec<Value>) {
        assert!(
            values.len() == self.rows.len(),
            "column length {} does not match row count {}",
            values.len(),
            self.rows.len()
        );
        self.schema.fields[index].data_type = data_type;
        for (row, value) in self.rows.iter_mut().zip(values) {
            row[index] = value;
        }
    }

    /// Rewrite the column at `index` in place by applying `mapper` to every cell.
    pub fn map_column<F>(&mut self, index: usize, data_type: DataType, mut mapper: F)
    where
        F: FnMut(&Value) -> Value,
    {
        self.schema.fields[index].data_type = data_type;
        for row in &mut self.rows {
            row[index] = mapper(&row[index]);
        }
    }

    /// A new table holding the first `n` rows.
    pub fn head(&self, n: usize) -> Self {
        Self {
            schema: self.schema.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{DataType, Field, Schema, Table, Value};

    fn sample_table() -> Table {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("name", DataType::Utf8),
        ]);
        Table::new(
            schema,
            vec![
                vec![Value::Int64(1), Value::Utf8("a".to_string())],
                vec![Value::Int64(2), Value::Null],
                vec![Value::Int64(3), Value::Utf8("c".to_string())],
            ],
        )
    }

    #[test]
    fn textual_form_of_each_variant() {
        let ts = NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();

        assert_eq!(Value::Null.to_text(), None);
        assert_eq!(Value::Int64(-7).to_text().as_deref(), Some("-7"));
        assert_eq!(Value::Float64(4.0).to_text().as_deref(), Some("4.0"));
        assert_eq!(Value::Float64(4.25).to_text().as_deref(), Some("4.25"));
        assert_eq!(Value::Float64(1e16).to_text().as_deref(), Some("1e16"));
        assert_eq!(Value::Float64(-2.5e20).to_text().as_deref(), Some("-2.5e20"));
        assert_eq!(Value::Bool(true).to_text().as_deref(), Some("true"));
        assert_eq!(Value::Utf8(" x ".into()).to_text().as_deref(), Some(" x "));
        assert_eq!(
            Value::Timestamp(ts).to_text().as_deref(),
            Some("2024-05-06 14:30:00")
        );
    }

    #[test]
    fn set_column_replaces_values_and_type() {
        let mut table = sample_table();
        table.set_column(
            1,
            DataType::Int64,
            vec![Value::Int64(10), Value::Null, Value::Int64(30)],
        );

        assert_eq!(table.schema.fields[1].data_type, DataType::Int64);
        assert_eq!(
            table.column("name").unwrap(),
            vec![&Value::Int64(10), &Value::Null, &Value::Int64(30)]
        );
        assert_eq!(table.column("id").unwrap()[0], &Value::Int64(1));
    }

    #[test]
    #[should_panic(expected = "column length")]
    fn set_column_panics_on_length_mismatch() {
        let mut table = sample_table();
        table.set_column(0, DataType::Int64, vec![Value::Null]);
    }

    #[test]
    fn head_keeps_schema_and_truncates_rows() {
        let table = sample_table();
        let head = table.head(2);
        assert_eq!(head.schema, table.schema);
        assert_eq!(head.row_count(), 2);
        assert_eq!(table.head(10).row_count(), 3);
    }
}
