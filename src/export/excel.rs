//! XLSX export.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::error::{CleanerError, CleanerResult, SourceError};
use crate::types::{Table, Value};

/// Name of the single worksheet written by [`write_xlsx_to_path`].
pub const SHEET_NAME: &str = "Sheet1";

const MAX_ROWS: usize = 1_048_576;
const MAX_COLUMNS: usize = 16_384;
const DATETIME_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
/// Largest integer magnitude a worksheet number (an f64) holds exactly.
const MAX_EXACT_INT: u64 = 1 << 53;

/// Write `table` to `path` as a single-sheet workbook with a header row and no index column.
///
/// Integers beyond ±2^53 are written as text so no digits are lost.
pub fn write_xlsx_to_path(table: &Table, path: impl AsRef<Path>) -> CleanerResult<()> {
    let path = path.as_ref();
    let mut workbook = build_workbook(table).map_err(|e| CleanerError::write(path, e))?;
    workbook
        .save(path)
        .map_err(|e| CleanerError::write(path, e))
}

/// Build the workbook in memory.
pub fn build_workbook(table: &Table) -> Result<Workbook, SourceError> {
    // Header row counts against the row limit.
    if table.row_count() + 1 > MAX_ROWS || table.column_count() > MAX_COLUMNS {
        return Err(SourceError::malformed(format!(
            "table of {} row(s) x {} column(s) exceeds xlsx limits ({} rows x {} columns)",
            table.row_count(),
            table.column_count(),
            MAX_ROWS - 1,
            MAX_COLUMNS
        )));
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;
    write_sheet(table, worksheet)?;
    Ok(workbook)
}

fn write_sheet(table: &Table, worksheet: &mut Worksheet) -> Result<(), XlsxError> {
    let datetime_format = Format::new().set_num_format(DATETIME_NUM_FORMAT);

    // Bounds are checked by the caller, so the casts below cannot truncate.
    for (col, name) in table.schema.field_names().enumerate() {
        worksheet.write_string(0, col as u16, name)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let r = (row_idx + 1) as u32;
        for (col_idx, value) in row.iter().enumerate() {
            let c = col_idx as u16;
            match value {
                Value::Null => {}
                Value::Int64(i) if i.unsigned_abs() <= MAX_EXACT_INT => {
                    worksheet.write_number(r, c, *i as f64)?;
                }
                Value::Int64(i) => {
                    worksheet.write_string(r, c, i.to_string())?;
                }
                Value::Float64(f) if f.is_finite() => {
                    worksheet.write_number(r, c, *f)?;
                }
                Value::Float64(f) => {
                    worksheet.write_string(r, c, f.to_string())?;
                }
                Value::Bool(b) => {
                    worksheet.write_boolean(r, c, *b)?;
                }
                Value::Utf8(s) => {
                    worksheet.write_string(r, c, s)?;
                }
                Value::Timestamp(ts) => {
                    worksheet.write_datetime_with_format(r, c, ts, &datetime_format)?;
                }
            }
        }
    }
    Ok(())
}
