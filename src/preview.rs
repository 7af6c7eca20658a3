//! Display-ready rendering of the first rows of a table.

use crate::types::Table;

/// Smallest number of preview rows.
pub const MIN_PREVIEW_ROWS: usize = 1;
/// Largest number of preview rows.
pub const MAX_PREVIEW_ROWS: usize = 500;
/// Preview rows used when nothing else is configured.
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// The head of a table rendered as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// Column names in order.
    pub headers: Vec<String>,
    /// Rendered cells; nulls are empty strings.
    pub rows: Vec<Vec<String>>,
    /// Row count of the whole table.
    pub total_rows: usize,
}

/// Render up to `rows` rows of `table`. `rows` is clamped to `1..=500`.
pub fn preview(table: &Table, rows: usize) -> Preview {
    let n = rows.clamp(MIN_PREVIEW_ROWS, MAX_PREVIEW_ROWS);
    Preview {
        headers: table.column_names(),
        rows: table
            .rows
            .iter()
            .take(n)
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect(),
        total_rows: table.row_count(),
    }
}
