//! Numeric helpers over string cells.
//!
//! Cells in match statistics files are text (`"1.87"`, `"63.57-5.43"`,
//! `"12 "`). [`parse_number`] reads the leading number of a cell and ignores
//! whatever follows, so a delta suffix does not make the cell unusable.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Table;

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").expect("Invalid number pattern")
});

/// Parse the leading decimal number of a cell.
///
/// ```
/// use matchstats::transform::numeric::parse_number;
///
/// assert_eq!(parse_number("63.57-5.43"), Some(63.57));
/// assert_eq!(parse_number("  12"), Some(12.0));
/// assert_eq!(parse_number("n/a"), None);
/// ```
pub fn parse_number(cell: &str) -> Option<f64> {
    LEADING_NUMBER
        .captures(cell)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Numeric values of a column, in row order.
///
/// Rows without the column, or whose cell has no leading number, are
/// skipped.
pub fn extract_numbers(table: &Table, column: &str) -> Vec<f64> {
    table
        .iter()
        .filter_map(|row| row.get(column))
        .filter_map(parse_number)
        .collect()
}

/// Median of a set of values; the mean of the two middle values when the
/// count is even.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Summary of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

/// Count, mean, median and range of a column; `None` if it holds no numbers.
pub fn summarize(table: &Table, column: &str) -> Option<ColumnSummary> {
    let values = extract_numbers(table, column);
    let min = values.iter().copied().min_by(f64::total_cmp)?;
    let max = values.iter().copied().max_by(f64::total_cmp)?;

    Some(ColumnSummary {
        count: values.len(),
        mean: mean(&values)?,
        median: median(&values)?,
        min,
        max,
    })
}
