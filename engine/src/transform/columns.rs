//! Column-level row transforms: projection, sign stripping, extraction.
//!
//! All of them take a table by reference and build a new one. A requested
//! column that a row does not have is left out of that row's output; it is
//! never filled with an empty string.
//!
//! The `*_json` variants accept a raw JSON value and reject anything that
//! is not an array of string-valued objects.

use serde_json::Value;

use crate::error::TransformResult;
use crate::models::{Row, Table};

/// Keep only the requested columns of each row.
///
/// Output has as many rows as the input. Keys keep the input row's order.
pub fn project<S: AsRef<str>>(table: &Table, columns: &[S]) -> Table {
    table.iter().map(|row| project_row(row, columns)).collect()
}

fn project_row<S: AsRef<str>>(row: &Row, columns: &[S]) -> Row {
    row.iter()
        .filter(|(key, _)| is_requested(key, columns))
        .collect()
}

fn is_requested<S: AsRef<str>>(key: &str, columns: &[S]) -> bool {
    columns.iter().any(|c| c.as_ref() == key)
}

/// Truncate a cell at its first `+`, or failing that its first `-`.
///
/// `"63.57+5.43"` → `"63.57"`, `"56.12-2.88"` → `"56.12"`. Only one cut
/// applies: a value holding both signs is cut at the `+`.
pub fn strip_sign_value(value: &str) -> &str {
    if let Some(pos) = value.find('+') {
        &value[..pos]
    } else if let Some(pos) = value.find('-') {
        &value[..pos]
    } else {
        value
    }
}

/// Project the requested columns and strip the `+`/`-` suffix from each.
pub fn strip_sign<S: AsRef<str>>(table: &Table, columns: &[S]) -> Table {
    table
        .iter()
        .map(|row| {
            row.iter()
                .filter(|(key, _)| is_requested(key, columns))
                .map(|(key, value)| (key, strip_sign_value(value)))
                .collect()
        })
        .collect()
}

/// Values of one column, in row order. Rows without the column are skipped,
/// so the result can be shorter than the table.
pub fn extract_column(table: &Table, column: &str) -> Vec<String> {
    table
        .iter()
        .filter_map(|row| row.get(column).map(str::to_string))
        .collect()
}

/// [`project`] over a JSON table.
pub fn project_json<S: AsRef<str>>(value: &Value, columns: &[S]) -> TransformResult<Table> {
    Ok(project(&Table::from_json(value)?, columns))
}

/// [`strip_sign`] over a JSON table.
pub fn strip_sign_json<S: AsRef<str>>(value: &Value, columns: &[S]) -> TransformResult<Table> {
    Ok(strip_sign(&Table::from_json(value)?, columns))
}

/// [`extract_column`] over a JSON table.
pub fn extract_column_json(value: &Value, column: &str) -> TransformResult<Vec<String>> {
    Ok(extract_column(&Table::from_json(value)?, column))
}
