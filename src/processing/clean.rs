//! Regex-based text cleaning.
//!
//! The pipeline runs in a fixed order:
//!
//! 1. take each value's textual form (nulls stay null and skip the remaining steps)
//! 2. lower-case
//! 3. trim
//! 4. replace every match of `pattern` with `repl` (skipped when `pattern` is blank)
//! 5. collapse whitespace runs to a single space and trim again
//!
//! The pattern is compiled before any value is touched, so an invalid pattern fails the whole
//! call and leaves the input as it was.

use log::{debug, info};
use regex::Regex;

use crate::error::{CleanerError, CleanerResult};
use crate::types::{DataType, Table, Value};

/// A compiled cleaning pipeline.
#[derive(Debug, Clone)]
pub struct TextCleaner {
    pattern: Option<Regex>,
    repl: String,
}

impl TextCleaner {
    /// Compile a cleaner. A blank `pattern` disables the replace step.
    ///
    /// `repl` refers to groups as `\1` or `\g<name>`; every other character, `$` included, is
    /// inserted literally.
    pub fn new(pattern: &str, repl: &str) -> CleanerResult<Self> {
        let pattern = if pattern.trim().is_empty() {
            None
        } else {
            let regex = Regex::new(pattern).map_err(|source| CleanerError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
            Some(regex)
        };
        Ok(Self {
            pattern,
            repl: expansion_from_backslash_syntax(repl),
        })
    }

    /// Clean a single value. `None` for null input.
    pub fn clean_value(&self, value: &Value) -> Option<String> {
        let lowered = value.to_text()?.to_lowercase();
        let trimmed = lowered.trim();
        let replaced = match &self.pattern {
            Some(regex) => regex.replace_all(trimmed, self.repl.as_str()),
            None => trimmed.into(),
        };
        Some(collapse_whitespace(&replaced))
    }

    /// Clean every value, preserving order and nulls.
    pub fn clean<'a, I>(&self, values: I) -> Vec<Option<String>>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        values.into_iter().map(|v| self.clean_value(v)).collect()
    }
}

/// Rewrite a backslash-style replacement into the regex crate's `$` expansion syntax.
fn expansion_from_backslash_syntax(repl: &str) -> String {
    let mut out = String::with_capacity(repl.len());
    let mut chars = repl.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '$' => out.push_str("$$"),
            '\\' => match chars.next() {
                Some('0') => out.push('\0'),
                Some(d) if d.is_ascii_digit() => {
                    let mut group = String::from(d);
                    if let Some(next) = chars.next_if(char::is_ascii_digit) {
                        group.push(next);
                    }
                    out.push_str(&format!("${{{group}}}"));
                }
                Some('g') if chars.peek() == Some(&'<') => {
                    chars.next();
                    let name: String = chars.by_ref().take_while(|&ch| ch != '>').collect();
                    out.push_str(&format!("${{{name}}}"));
                }
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('\\') => out.push('\\'),
                Some('$') => out.push_str("\\$$"),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            },
            other => out.push(other),
        }
    }
    out
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Run the cleaning pipeline over `values` and return the cleaned sequence.
///
/// The input is not modified; the caller decides where the result goes.
///
/// ```
/// use data_cleaner::processing::clean_text;
/// use data_cleaner::types::Value;
///
/// let values = vec![Value::Utf8("  Hello, World!  ".into()), Value::Null];
/// let cleaned = clean_text(&values, r"[^a-z\s]", "").unwrap();
/// assert_eq!(cleaned, vec![Some("hello world".to_string()), None]);
/// ```
pub fn clean_text(values: &[Value], pattern: &str, repl: &str) -> CleanerResult<Vec<Option<String>>> {
    let cleaner = TextCleaner::new(pattern, repl)?;
    Ok(cleaner.clean(values))
}

/// Clean `column` of `table` and replace it with the result, typed as text.
///
/// The column and the pattern are both validated before the table is modified.
pub fn clean_column(table: &mut Table, column: &str, pattern: &str, repl: &str) -> CleanerResult<()> {
    let idx = table
        .schema
        .index_of(column)
        .ok_or_else(|| CleanerError::ColumnNotFound {
            column: column.to_string(),
        })?;
    let cleaner = TextCleaner::new(pattern, repl)?;
    debug!(
        "cleaning column '{column}' (pattern={:?}, repl={repl:?})",
        cleaner.pattern.as_ref().map(Regex::as_str)
    );

    table.map_column(idx, DataType::Utf8, |value| match cleaner.clean_value(value) {
        Some(text) => Value::Utf8(text),
        None => Value::Null,
    });

    info!("cleaned column '{column}' ({} row(s))", table.row_count());
    Ok(())
}
