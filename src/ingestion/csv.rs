//! CSV loading.

use std::path::Path;

use log::debug;

use crate::error::{CleanerError, CleanerResult, SourceError};
use crate::types::{Field, Schema, Table, Value};

use super::infer::{infer_text_column, normalize_headers};

/// Load a CSV file into an in-memory [`Table`].
///
/// Rules:
///
/// - The first record is the header row.
/// - Quoting and embedded delimiters follow standard CSV rules.
/// - Cells matching one of `na_values` load as [`Value::Null`].
/// - Each column's type is inferred from its non-missing cells.
pub fn read_csv_from_path(path: impl AsRef<Path>, na_values: &[String]) -> CleanerResult<Table> {
    let path = path.as_ref();
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| CleanerError::read(path, e))?;
    read_csv_from_reader(&mut rdr, na_values).map_err(|e| CleanerError::read(path, e))
}

/// Load CSV data from an existing CSV reader.
pub fn read_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    na_values: &[String],
) -> Result<Table, SourceError> {
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(SourceError::malformed("no columns to parse from file"));
    }
    let names = normalize_headers(headers.iter());

    let records = rdr.records().collect::<Result<Vec<_>, _>>()?;
    debug!(
        "parsed csv: {} column(s), {} record(s)",
        names.len(),
        records.len()
    );

    let is_na = |cell: &str| na_values.iter().any(|na| na == cell);

    let mut fields = Vec::with_capacity(names.len());
    let mut columns: Vec<Vec<Value>> = Vec::with_capacity(names.len());
    for (col_idx, name) in names.into_iter().enumerate() {
        let cells: Vec<Option<&str>> = records
            .iter()
            .map(|record| record.get(col_idx).filter(|&cell| !is_na(cell)))
            .collect();
        let (data_type, values) = infer_text_column(&cells);
        fields.push(Field::new(name, data_type));
        columns.push(values);
    }

    Ok(Table::new(Schema::new(fields), transpose(columns, records.len())))
}

pub(crate) fn transpose(columns: Vec<Vec<Value>>, row_count: usize) -> Vec<Vec<Value>> {
    let mut rows: Vec<Vec<Value>> = (0..row_count)
        .map(|_| Vec::with_capacity(columns.len()))
        .collect();
    for column in columns {
        for (row, value) in rows.iter_mut().zip(column) {
            row.push(value);
        }
    }
    rows
}
