//! Plan executor
//!
//! Runs the steps of a [`TransformPlan`] one after the other. The input
//! table is never modified; a failing step aborts the whole run.

use super::TransformPlan;
use crate::error::PlanResult;
use crate::models::Table;

/// Result of executing a plan
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    /// Table produced by the last step
    pub table: Table,
    /// Description of each applied step, in order
    pub applied: Vec<String>,
    /// Row count after each step
    pub row_counts: Vec<usize>,
}

impl ExecutionReport {
    /// Get summary statistics
    pub fn summary(&self) -> String {
        format!(
            "Applied {} steps, {} rows out",
            self.applied.len(),
            self.table.len()
        )
    }
}

/// Execute a plan on a table
///
/// # Arguments
/// * `table` - Parsed rows
/// * `plan` - The steps to apply
pub fn execute(table: &Table, plan: &TransformPlan) -> PlanResult<ExecutionReport> {
    let mut current = table.clone();
    let mut applied = Vec::with_capacity(plan.steps.len());
    let mut row_counts = Vec::with_capacity(plan.steps.len());

    for (index, step) in plan.steps.iter().enumerate() {
        current = step.apply(&current, index)?;
        applied.push(step.describe());
        row_counts.push(current.len());
    }

    Ok(ExecutionReport {
        table: current,
        applied,
        row_counts,
    })
}
