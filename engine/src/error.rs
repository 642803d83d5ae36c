//! Error types for the matchstats pipeline.
//!
//! - [`CsvError`] - reading and decoding CSV input
//! - [`TransformError`] - row transforms fed with malformed tables
//! - [`PlanError`] - transform plan loading and execution
//! - [`ExportError`] - writing tables back out
//! - [`PipelineError`] - top-level orchestration
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// CSV Parsing Errors
// =============================================================================

/// Errors while turning raw input into text the tokenizer can read.
///
/// The tokenizer itself never fails: malformed quoting is consumed leniently.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Input is not text (invalid UTF-8 where UTF-8 was required).
    #[error("Input is not valid UTF-8 text (first invalid byte at offset {offset})")]
    NotText { offset: usize },

    /// Failed to read the input.
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown or unsupported encoding label.
    #[error("Unsupported encoding: {0}")]
    Encoding(String),
}

// =============================================================================
// Transformation Errors
// =============================================================================

/// Errors from the row transforms.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Value is not a sequence of string-valued mappings.
    #[error("Invalid input table: {0}")]
    InvalidInput(String),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Plan Errors
// =============================================================================

/// Errors from loading or running a transform plan.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Plan document is structurally wrong.
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    /// A date pivot that does not match its format.
    #[error("Step {step}: pivot '{pivot}' does not match format '{format}'")]
    InvalidPivot {
        step: usize,
        pivot: String,
        format: String,
    },

    /// JSON serialization/deserialization error.
    #[error("Plan JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors while writing a table as JSON or CSV.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Output IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level orchestration errors.
///
/// This is the error type returned by [`crate::transform::pipeline`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Column requested for a numeric summary holds no numbers.
    #[error("Column '{0}' has no numeric values")]
    NoNumbers(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for plan operations.
pub type PlanResult<T> = Result<T, PlanError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // CsvError -> PipelineError
        let csv_err = CsvError::NotText { offset: 3 };
        let pipeline_err: PipelineError = csv_err.into();
        assert!(pipeline_err.to_string().contains("offset 3"));

        // TransformError -> PipelineError
        let transform_err = TransformError::InvalidInput("row 2 is not an object".into());
        let pipeline_err: PipelineError = transform_err.into();
        assert!(pipeline_err.to_string().contains("row 2"));
    }

    #[test]
    fn test_pivot_error_format() {
        let err = PlanError::InvalidPivot {
            step: 1,
            pivot: "2019-02-20".into(),
            format: "%m/%d/%Y".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Step 1"));
        assert!(msg.contains("2019-02-20"));
        assert!(msg.contains("%m/%d/%Y"));
    }
}
