//! Tolerant scalar parsers used by column conversion.
//!
//! Every parser returns `None` instead of an error; callers turn that into [`crate::types::Value::Null`].

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%d-%m-%Y", "%Y%m%d",
];

/// Parse a number, preferring an exact integer reading.
pub fn parse_number(value: &str) -> Option<Number> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(Number::Int(i));
    }
    trimmed.parse::<f64>().ok().map(Number::Float)
}

/// A parsed numeric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Truncate toward zero. `None` for NaN, infinities and values outside the `i64` range.
    pub fn to_i64(self) -> Option<i64> {
        match self {
            Number::Int(i) => Some(i),
            Number::Float(f) => {
                let t = f.trunc();
                if t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64 {
                    Some(t as i64)
                } else {
                    None
                }
            }
        }
    }

    /// Float reading. `None` for NaN.
    pub fn to_f64(self) -> Option<f64> {
        let f = match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        };
        (!f.is_nan()).then_some(f)
    }
}

/// Parse a date/time permissively.
///
/// Accepts RFC 3339 (converted to UTC), several common date-time layouts, and date-only layouts
/// (midnight). Ambiguous slash dates are read month-first.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(parsed);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, fmt) {
            return parsed.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Interpret a count of nanoseconds since the Unix epoch.
pub fn datetime_from_epoch_nanos(nanos: i64) -> NaiveDateTime {
    DateTime::from_timestamp_nanos(nanos).naive_utc()
}

/// Nanoseconds since the Unix epoch, if representable.
pub fn epoch_nanos(ts: &NaiveDateTime) -> Option<i64> {
    ts.and_utc().timestamp_nanos_opt()
}
