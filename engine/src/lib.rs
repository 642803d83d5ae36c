//! # Matchstats - football statistics tables from CSV
//!
//! Matchstats reads comma-separated match statistics (team standings with
//! expected-goals columns such as `xG` = `"60.10+3.90"`) into rows keyed by
//! header, and reshapes them for charting: projection, sign stripping,
//! column extraction, date splits and numeric ordering.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV text   │────▶│   Parser    │────▶│  Transform  │────▶│ JSON / CSV  │
//! │ (UTF-8/ISO) │     │ (tokenizer) │     │(steps, plan)│     │   output    │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use matchstats::{extract_column, parse, strip_sign};
//!
//! let table = parse("Team,xG\nInter,60.10+3.90\nRoma,55.02-1.98");
//! let clean = strip_sign(&table, &["Team", "xG"]);
//!
//! assert_eq!(extract_column(&clean, "xG"), vec!["60.10", "55.02"]);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Row and Table
//! - [`parser`] - CSV tokenizer, header mapping and encoding detection
//! - [`transform`] - Column transforms, numeric helpers, plans and pipeline
//! - [`validation`] - JSON table schema validation
//! - [`export`] - JSON and CSV output
//! - [`config`] - Environment settings
//! - [`logs`] - Progress log broadcasting

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Validation
pub mod validation;

// Output
pub mod export;

// Runtime
pub mod config;
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    CsvError, CsvResult,
    ExportError, ExportResult,
    PipelineError, PipelineResult,
    PlanError, PlanResult,
    TransformError, TransformResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Row, Table};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_content,
    decode_utf8,
    detect_encoding,
    headers,
    parse,
    parse_bytes,
    parse_bytes_auto,
    parse_csv_file,
    parse_csv_file_auto,
    ParseResult,
};

// =============================================================================
// Re-exports - Row transforms
// =============================================================================

pub use transform::columns::{
    extract_column,
    extract_column_json,
    project,
    project_json,
    strip_sign,
    strip_sign_json,
    strip_sign_value,
};

pub use transform::numeric::{extract_numbers, mean, median, parse_number, summarize, ColumnSummary};

pub use transform::partition::{parse_date, sort_by_numeric, split_by_date, DateSplit, Order};

// =============================================================================
// Re-exports - Plans
// =============================================================================

pub use transform::plan::{
    example_plan,
    execute,
    operations_description,
    ExecutionReport,
    Step,
    TransformPlan,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    load_bytes,
    load_table,
    run_plan,
    summarize_column,
    InputKind,
    LoadOptions,
    LoadedTable,
    TableInfo,
};

// =============================================================================
// Re-exports - Validation, output and settings
// =============================================================================

pub use validation::{is_valid_table, validate_table};

pub use export::{render, to_csv_string, to_json_string, write_csv};

pub use config::{LogFormat, OutputFormat, Settings};
