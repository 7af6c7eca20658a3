//! Excel workbook loading (`.xlsx`, `.xls`).

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Sheets, Xls, Xlsx};
use log::{debug, warn};

use crate::error::{CleanerError, CleanerResult, SourceError};
use crate::processing::parse::parse_datetime;
use crate::types::{Field, Schema, Table, Value};

use super::csv::transpose;
use super::detect::FileFormat;
use super::infer::{normalize_headers, unify_column};

/// Load the first worksheet of a workbook into an in-memory [`Table`].
///
/// Behavior:
/// - Opens [`FileFormat::Xls`] with the legacy reader and any other format as `.xlsx`
/// - Uses the first sheet in workbook order
/// - Treats the first non-empty row as the header row
/// - Reads remaining rows, converting cells into [`Value`]s
/// - Unifies each column to a single type (see [`super::infer::unify_column`])
pub fn read_excel_from_path(path: impl AsRef<Path>, format: FileFormat) -> CleanerResult<Table> {
    let path = path.as_ref();
    let mut workbook = open_sheets(path, format).map_err(|e| CleanerError::read(path, e))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| CleanerError::read(path, e))?,
        None => {
            return Err(CleanerError::read(
                path,
                SourceError::malformed("workbook has no sheets"),
            ));
        }
    };

    read_sheet_range(&range).map_err(|e| CleanerError::read(path, e))
}

fn open_sheets(
    path: &Path,
    format: FileFormat,
) -> Result<Sheets<BufReader<File>>, calamine::Error> {
    match format {
        FileFormat::Xls => Ok(Sheets::Xls(open_workbook::<Xls<_>, _>(path)?)),
        _ => Ok(Sheets::Xlsx(open_workbook::<Xlsx<_>, _>(path)?)),
    }
}

/// Build a [`Table`] from a worksheet range.
pub fn read_sheet_range(range: &Range<Data>) -> Result<Table, SourceError> {
    let mut rows = range.rows();
    let header = rows
        .by_ref()
        .find(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .ok_or_else(|| {
            SourceError::malformed("sheet has no non-empty rows (no header row found)")
        })?;

    let names = normalize_headers(header.iter().map(cell_to_header_string));
    let body: Vec<&[Data]> = rows.collect();
    debug!(
        "parsed worksheet: {} column(s), {} row(s)",
        names.len(),
        body.len()
    );

    let mut fields = Vec::with_capacity(names.len());
    let mut columns = Vec::with_capacity(names.len());
    for (col_idx, name) in names.into_iter().enumerate() {
        let cells = body
            .iter()
            .map(|row| convert_cell(row.get(col_idx).unwrap_or(&Data::Empty)))
            .collect();
        let (data_type, values) = unify_column(cells);
        fields.push(Field::new(name, data_type));
        columns.push(values);
    }

    Ok(Table::new(Schema::new(fields), transpose(columns, body.len())))
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => (*f as i64).to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn convert_cell(c: &Data) -> Value {
    match c {
        Data::Empty => Value::Null,
        Data::Int(i) => Value::Int64(*i),
        Data::Float(f) => Value::Float64(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::String(s) if s.is_empty() => Value::Null,
        Data::String(s) => Value::Utf8(s.clone()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ts) => Value::Timestamp(ts),
            None => {
                warn!("worksheet date cell {dt:?} is out of range; loading as null");
                Value::Null
            }
        },
        Data::DateTimeIso(s) => parse_datetime(s).map(Value::Timestamp).unwrap_or(Value::Null),
        Data::DurationIso(s) => Value::Utf8(s.clone()),
        Data::Error(_) => Value::Null,
    }
}
