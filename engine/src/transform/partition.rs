//! Splitting and ordering tables by a column's value.
//!
//! Match files carry dates as text (`02/20/2019`); [`split_by_date`] cuts a
//! season at a pivot day so the two halves can be compared.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::numeric::parse_number;
use crate::models::{Row, Table};

/// Date layout of the source data (month/day/year).
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Parse a cell as a date with a chrono format string.
pub fn parse_date(cell: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(cell.trim(), format).ok()
}

/// Rows of a table split around a pivot date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateSplit {
    /// Rows dated strictly before the pivot.
    pub before: Table,
    /// Rows dated on or after the pivot.
    pub after: Table,
    /// Rows without the column or with a cell that is not a date.
    pub unparsed: Table,
}

/// Split rows by comparing `column` (read with `format`) against `pivot`.
///
/// Source order is kept inside each part.
pub fn split_by_date(table: &Table, column: &str, pivot: NaiveDate, format: &str) -> DateSplit {
    let mut before = Vec::new();
    let mut after = Vec::new();
    let mut unparsed = Vec::new();

    for row in table {
        match row.get(column).and_then(|cell| parse_date(cell, format)) {
            Some(date) if date < pivot => before.push(row.clone()),
            Some(_) => after.push(row.clone()),
            None => unparsed.push(row.clone()),
        }
    }

    DateSplit {
        before: before.into(),
        after: after.into(),
        unparsed: unparsed.into(),
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

/// Stable sort by the leading number of `column`.
///
/// Rows without a number go last whatever the direction.
pub fn sort_by_numeric(table: &Table, column: &str, order: Order) -> Table {
    let mut keyed: Vec<(Option<f64>, &Row)> = table
        .iter()
        .map(|row| (row.get(column).and_then(parse_number), row))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(x), Some(y)) => match order {
            Order::Asc => x.total_cmp(y),
            Order::Desc => y.total_cmp(x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    keyed.into_iter().map(|(_, row)| row.clone()).collect()
}
