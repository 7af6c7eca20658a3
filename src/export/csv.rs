//! CSV export.

use std::path::Path;

use crate::error::{CleanerError, CleanerResult, SourceError};
use crate::types::Table;

/// Write `table` to `path` as CSV: header row first, nulls as empty fields, no index column.
pub fn write_csv_to_path(table: &Table, path: impl AsRef<Path>) -> CleanerResult<()> {
    let path = path.as_ref();
    let mut wtr = csv::Writer::from_path(path).map_err(|e| CleanerError::write(path, e))?;
    write_csv(table, &mut wtr).map_err(|e| CleanerError::write(path, e))
}

/// Write `table` through an existing CSV writer and flush it.
pub fn write_csv<W: std::io::Write>(
    table: &Table,
    wtr: &mut csv::Writer<W>,
) -> Result<(), SourceError> {
    wtr.write_record(table.schema.field_names())?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_csv;
    use crate::types::{DataType, Field, Schema, Table, Value};

    #[test]
    fn writes_header_and_quotes_when_needed() {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("note", DataType::Utf8),
            Field::new("score", DataType::Float64),
        ]);
        let table = Table::new(
            schema,
            vec![
                vec![Value::Int64(1), Value::Utf8("a, b".into()), Value::Float64(2.0)],
                vec![Value::Int64(2), Value::Null, Value::Float64(0.25)],
            ],
        );

        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_csv(&table, &mut wtr).unwrap();
        let out = String::from_utf8(wtr.into_inner().unwrap()).unwrap();

        assert_eq!(out, "id,note,score\n1,\"a, b\",2.0\n2,,0.25\n");
    }
}
