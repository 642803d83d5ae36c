//! Plan steps
//!
//! Each step turns one table into another. Steps are serialized with a
//! `type` tag so plans can live in JSON files.

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};
use crate::models::Table;
use crate::transform::columns::{project, strip_sign};
use crate::transform::partition::{
    parse_date, sort_by_numeric, split_by_date, Order, DEFAULT_DATE_FORMAT,
};

/// All available plan steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// Keep only the listed columns
    Project { columns: Vec<String> },

    /// Keep only the listed columns, cut at the first `+` or `-`
    StripSign { columns: Vec<String> },

    /// Stable sort on the leading number of a column
    SortBy {
        column: String,
        #[serde(default)]
        order: Order,
    },

    /// Keep rows dated strictly before the pivot
    FilterBefore {
        column: String,
        pivot: String,
        #[serde(default = "default_date_format")]
        format: String,
    },

    /// Keep rows dated on or after the pivot
    FilterAfter {
        column: String,
        pivot: String,
        #[serde(default = "default_date_format")]
        format: String,
    },
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Step {
    /// Apply this step. `index` is only used to label errors.
    pub fn apply(&self, table: &Table, index: usize) -> PlanResult<Table> {
        match self {
            Step::Project { columns } => Ok(project(table, columns)),
            Step::StripSign { columns } => Ok(strip_sign(table, columns)),
            Step::SortBy { column, order } => Ok(sort_by_numeric(table, column, *order)),
            Step::FilterBefore { column, pivot, format } => {
                let pivot_date = Self::pivot_date(pivot, format, index)?;
                Ok(split_by_date(table, column, pivot_date, format).before)
            }
            Step::FilterAfter { column, pivot, format } => {
                let pivot_date = Self::pivot_date(pivot, format, index)?;
                Ok(split_by_date(table, column, pivot_date, format).after)
            }
        }
    }

    fn pivot_date(pivot: &str, format: &str, index: usize) -> PlanResult<chrono::NaiveDate> {
        parse_date(pivot, format).ok_or_else(|| PlanError::InvalidPivot {
            step: index,
            pivot: pivot.to_string(),
            format: format.to_string(),
        })
    }

    /// Check the step's parameters without running it.
    pub fn check(&self, index: usize) -> PlanResult<()> {
        match self {
            Step::Project { columns } | Step::StripSign { columns } if columns.is_empty() => {
                Err(PlanError::InvalidPlan(format!(
                    "step {} ({}) lists no columns",
                    index,
                    self.name()
                )))
            }
            Step::FilterBefore { pivot, format, .. } | Step::FilterAfter { pivot, format, .. } => {
                Self::pivot_date(pivot, format, index).map(|_| ())
            }
            _ => Ok(()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Step::Project { .. } => "project",
            Step::StripSign { .. } => "strip_sign",
            Step::SortBy { .. } => "sort_by",
            Step::FilterBefore { .. } => "filter_before",
            Step::FilterAfter { .. } => "filter_after",
        }
    }

    /// One-line human description, used in logs.
    pub fn describe(&self) -> String {
        match self {
            Step::Project { columns } => format!("project [{}]", columns.join(", ")),
            Step::StripSign { columns } => format!("strip_sign [{}]", columns.join(", ")),
            Step::SortBy { column, order } => {
                let direction = match order {
                    Order::Asc => "asc",
                    Order::Desc => "desc",
                };
                format!("sort_by {} {}", column, direction)
            }
            Step::FilterBefore { column, pivot, .. } => {
                format!("filter_before {} < {}", column, pivot)
            }
            Step::FilterAfter { column, pivot, .. } => {
                format!("filter_after {} >= {}", column, pivot)
            }
        }
    }
}

/// Get a description of all available steps
pub fn operations_description() -> String {
    r#"Available plan steps:

| Step | Description | Parameters |
|------|-------------|------------|
| project | Keep only the listed columns (absent ones are skipped) | columns: list of names |
| strip_sign | Keep the listed columns, cut each value at its first "+" (else first "-") | columns: list of names |
| sort_by | Stable sort on the leading number of a column, non-numeric rows last | column, order: "asc" or "desc" (default "asc") |
| filter_before | Keep rows whose date is strictly before the pivot | column, pivot, format (default "%m/%d/%Y") |
| filter_after | Keep rows whose date is on or after the pivot | column, pivot, format (default "%m/%d/%Y") |

Example steps in JSON:
[
  {"type": "strip_sign", "columns": ["Team", "xPTS"]},
  {"type": "sort_by", "column": "xPTS", "order": "desc"},
  {"type": "filter_after", "column": "Data", "pivot": "02/20/2019"}
]"#
    .to_string()
}
