//! Header normalisation and per-column type inference shared by the CSV and Excel loaders.

use std::collections::HashSet;

use crate::types::{DataType, Value};

/// Cell texts treated as missing data by default.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "#N/A", "<NA>",
];

/// Make header names usable as unique column identifiers.
///
/// Blank headers become `Unnamed: <index>`; repeated names get `.1`, `.2`, ... suffixes.
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for (idx, name) in raw.into_iter().enumerate() {
        let name = name.as_ref().trim();
        let base = if name.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            name.to_string()
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

/// Type a column of raw text cells (`None` = missing).
///
/// Non-missing cells decide the type in priority order Int64, Float64, Bool, Utf8. Text cells
/// keep their original spelling; an all-missing column is Utf8.
pub fn infer_text_column(cells: &[Option<&str>]) -> (DataType, Vec<Value>) {
    let mut present = cells.iter().flatten().map(|s| s.trim());

    if present.clone().next().is_none() {
        return (DataType::Utf8, vec![Value::Null; cells.len()]);
    }

    let typed = if present.clone().all(|s| s.parse::<i64>().is_ok()) {
        DataType::Int64
    } else if present.clone().all(|s| s.parse::<f64>().is_ok()) {
        DataType::Float64
    } else if present.all(|s| parse_bool_literal(s).is_some()) {
        DataType::Bool
    } else {
        DataType::Utf8
    };

    let values = cells
        .iter()
        .map(|cell| match cell {
            None => Value::Null,
            Some(raw) => {
                let trimmed = raw.trim();
                match typed {
                    DataType::Int64 => {
                        trimmed.parse::<i64>().map(Value::Int64).unwrap_or(Value::Null)
                    }
                    DataType::Float64 => {
                        trimmed.parse::<f64>().map(Value::Float64).unwrap_or(Value::Null)
                    }
                    DataType::Bool => parse_bool_literal(trimmed)
                        .map(Value::Bool)
                        .unwrap_or(Value::Null),
                    _ => Value::Utf8((*raw).to_string()),
                }
            }
        })
        .collect();

    (typed, values)
}

/// Unify a column of already-typed cells (as read from a workbook) into a single type.
///
/// - integers and integral floats only: Int64
/// - any other mix of numbers: Float64
/// - a single non-numeric kind: that kind
/// - anything else: Utf8, using each cell's textual form
pub fn unify_column(cells: Vec<Value>) -> (DataType, Vec<Value>) {
    let present: Vec<&Value> = cells.iter().filter(|v| !v.is_null()).collect();
    if present.is_empty() {
        return (DataType::Utf8, cells);
    }

    let all_numeric = present
        .iter()
        .all(|v| matches!(v, Value::Int64(_) | Value::Float64(_)));
    if all_numeric {
        let all_integral = present.iter().all(|v| match v {
            Value::Float64(f) => is_integral(*f),
            _ => true,
        });
        if all_integral {
            let values = cells
                .into_iter()
                .map(|v| match v {
                    Value::Float64(f) => Value::Int64(f as i64),
                    other => other,
                })
                .collect();
            return (DataType::Int64, values);
        }
        let values = cells
            .into_iter()
            .map(|v| match v {
                Value::Int64(i) => Value::Float64(i as f64),
                other => other,
            })
            .collect();
        return (DataType::Float64, values);
    }

    let kind = |v: &Value| match v {
        Value::Bool(_) => Some(DataType::Bool),
        Value::Utf8(_) => Some(DataType::Utf8),
        Value::Timestamp(_) => Some(DataType::Timestamp),
        _ => None,
    };
    let first = kind(present[0]);
    if first.is_some() && present.iter().all(|v| kind(v) == first) {
        return (first.unwrap_or(DataType::Utf8), cells);
    }

    let values = cells
        .into_iter()
        .map(|v| match v.to_text() {
            Some(text) => Value::Utf8(text),
            None => Value::Null,
        })
        .collect();
    (DataType::Utf8, values)
}

fn is_integral(f: f64) -> bool {
    f.is_finite() && f.fract() == 0.0 && f.abs() < 9.2e18
}

fn parse_bool_literal(s: &str) -> Option<bool> {
    match s {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}
