//! Transform plans: a JSON-described list of steps run over a table.
//!
//! - `operations`: the available steps
//! - `executor`: run a plan on a table
//!
//! ## Usage Flow
//!
//! ```text
//! CSV → parser::parse → TransformPlan::from_json → executor::execute → Table
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use matchstats::{parse, TransformPlan, execute};
//!
//! let table = parse(csv_content);
//! let plan = TransformPlan::from_json(plan_json)?;
//! let report = execute(&table, &plan)?;
//! println!("{} rows after {} steps", report.table.len(), report.applied.len());
//! ```

pub mod executor;
pub mod operations;

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};
use crate::transform::partition::Order;

pub use executor::{execute, ExecutionReport};
pub use operations::{operations_description, Step};

/// An ordered list of steps with some metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformPlan {
    /// Version of the plan format
    #[serde(default = "default_version")]
    pub version: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Steps, applied in order
    pub steps: Vec<Step>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl TransformPlan {
    pub fn new() -> Self {
        Self {
            version: default_version(),
            description: String::new(),
            steps: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Parse and check a plan from JSON text.
    pub fn from_json(json: &str) -> PlanResult<Self> {
        let plan: TransformPlan = serde_json::from_str(json)?;
        plan.check()?;
        Ok(plan)
    }

    pub fn to_json(&self) -> PlanResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every step's parameters.
    pub fn check(&self) -> PlanResult<()> {
        if self.steps.is_empty() {
            return Err(PlanError::InvalidPlan("plan has no steps".to_string()));
        }
        self.steps
            .iter()
            .enumerate()
            .try_for_each(|(i, step)| step.check(i))
    }
}

impl Default for TransformPlan {
    fn default() -> Self {
        Self::new()
    }
}

/// Expected-points standings: clean the `+`/`-` deltas, then rank by xPTS.
pub fn example_plan() -> TransformPlan {
    TransformPlan::new()
        .with_description("Serie A standings ranked by expected points")
        .with_step(Step::StripSign {
            columns: ["N", "Team", "M", "W", "D", "L", "G", "GA", "PTS", "xG", "xGA", "xPTS"]
                .into_iter()
                .map(String::from)
                .collect(),
        })
        .with_step(Step::SortBy {
            column: "xPTS".to_string(),
            order: Order::Desc,
        })
        .with_step(Step::Project {
            columns: vec!["Team".to_string(), "PTS".to_string(), "xPTS".to_string()],
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_plan_round_trips() {
        let plan = example_plan();
        let json = plan.to_json().unwrap();
        assert_eq!(TransformPlan::from_json(&json).unwrap(), plan);
    }

    #[test]
    fn test_defaults_filled_in() {
        let json = r#"{"steps": [{"type": "project", "columns": ["Team"]}]}"#;
        let plan = TransformPlan::from_json(json).unwrap();
        assert_eq!(plan.version, "1.0");
        assert!(plan.description.is_empty());
    }

    #[test]
    fn test_empty_plan_rejected() {
        let err = TransformPlan::from_json(r#"{"steps": []}"#).unwrap_err();
        assert!(matches!(err, PlanError::InvalidPlan(_)));
    }

    #[test]
    fn test_unknown_step_rejected() {
        let err = TransformPlan::from_json(r#"{"steps": [{"type": "render_chart"}]}"#).unwrap_err();
        assert!(matches!(err, PlanError::Json(_)));
    }
}
