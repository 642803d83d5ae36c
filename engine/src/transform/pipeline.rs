//! High-level pipeline API: load a table, reshape it, summarize it.
//!
//! This module combines the steps the CLI runs: reading CSV or JSON input,
//! running a plan, and computing column summaries, with progress logging.
//!
//! # Example
//!
//! ```rust,ignore
//! use matchstats::transform::pipeline::{load_table, run_plan, LoadOptions};
//! use std::path::Path;
//!
//! let loaded = load_table(Path::new("serie_a_stats.csv"), &LoadOptions::default())?;
//! let report = run_plan(&loaded.table, &matchstats::example_plan())?;
//! println!("{} teams ranked", report.table.len());
//! ```

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::Table;
use crate::parser::{decode_utf8, parse_bytes_auto, parse_string_with_metadata};
use crate::transform::numeric::{summarize, ColumnSummary};
use crate::transform::plan::{execute, ExecutionReport, TransformPlan};

/// Path that stands for standard input.
pub const STDIN_PATH: &str = "-";

/// What the input bytes hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Csv,
    Json,
}

impl InputKind {
    /// `.json` files are JSON tables, everything else is CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputKind::Json,
            _ => InputKind::Csv,
        }
    }
}

/// Options for loading input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Detect and decode non-UTF-8 CSV input instead of rejecting it
    pub auto_encoding: bool,

    /// Force the input kind instead of guessing from the extension
    pub kind: Option<InputKind>,
}

/// Input information
#[derive(Debug, Clone, Serialize)]
pub struct TableInfo {
    pub source: String,
    pub kind: InputKind,
    pub encoding: String,
    pub columns: Vec<String>,
    pub row_count: usize,
}

/// A table with the information about where it came from
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub table: Table,
    pub info: TableInfo,
}

/// Load a table from a file, or from stdin when the path is `-`.
pub fn load_table(path: &Path, options: &LoadOptions) -> PipelineResult<LoadedTable> {
    let source = path.display().to_string();
    let bytes = if source == STDIN_PATH {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        std::fs::read(path)?
    };

    let kind = options.kind.unwrap_or_else(|| InputKind::from_path(path));
    load_bytes(&bytes, kind, options, &source)
}

/// Load a table from raw bytes.
pub fn load_bytes(
    bytes: &[u8],
    kind: InputKind,
    options: &LoadOptions,
    source: &str,
) -> PipelineResult<LoadedTable> {
    log_info(format!("📖 Reading {} ({} bytes)", source, bytes.len()));

    let (table, encoding, columns) = match kind {
        InputKind::Json => {
            let text = decode_utf8(bytes)?;
            let table = Table::from_json_str(text)?;
            let columns = table.columns();
            (table, "utf-8".to_string(), columns)
        }
        InputKind::Csv if options.auto_encoding => {
            let result = parse_bytes_auto(bytes)?;
            log_success(format!("Detected encoding: {}", result.encoding));
            (result.table, result.encoding, result.headers)
        }
        InputKind::Csv => {
            let result = parse_string_with_metadata(decode_utf8(bytes)?, "utf-8");
            (result.table, result.encoding, result.headers)
        }
    };

    log_success(format!("Read {} rows", table.len()));
    if !columns.is_empty() {
        log_info_indent(format!("Columns: {}", columns.join(", ")), 1);
    }
    if table.is_empty() {
        log_warning("Input has no data rows");
    }

    let info = TableInfo {
        source: source.to_string(),
        kind,
        encoding,
        columns,
        row_count: table.len(),
    };

    Ok(LoadedTable { table, info })
}

/// Run a plan, logging each step.
pub fn run_plan(table: &Table, plan: &TransformPlan) -> PipelineResult<ExecutionReport> {
    if !plan.description.is_empty() {
        log_info(format!("⚙️  Plan: {}", plan.description));
    }

    let report = execute(table, plan)?;
    for (step, rows) in report.applied.iter().zip(&report.row_counts) {
        log_info_indent(format!("{} → {} rows", step, rows), 1);
    }
    log_success(report.summary());

    Ok(report)
}

/// Numeric summary of a column; fails if the column holds no numbers.
pub fn summarize_column(table: &Table, column: &str) -> PipelineResult<ColumnSummary> {
    let summary =
        summarize(table, column).ok_or_else(|| PipelineError::NoNumbers(column.to_string()))?;

    let skipped = table.len() - summary.count;
    if skipped > 0 {
        log_warning(format!("{} rows without a number in '{}'", skipped, column));
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CsvError, TransformError};
    use crate::transform::plan::example_plan;
    use std::io::Write;

    const STANDINGS: &str = "N,Team,M,W,D,L,G,GA,PTS,xG,xGA,xPTS\n\
1,Juventus,38,28,6,4,70,30,90,68.42-1.58,32.50+2.50,77.41-12.59\n\
2,Napoli,38,24,7,7,74,36,79,74.62+0.62,34.39-1.61,78.92-0.08\n";

    #[test]
    fn test_input_kind_from_path() {
        assert_eq!(InputKind::from_path(Path::new("rows.JSON")), InputKind::Json);
        assert_eq!(InputKind::from_path(Path::new("serie_a_stats.csv")), InputKind::Csv);
        assert_eq!(InputKind::from_path(Path::new("-")), InputKind::Csv);
    }

    #[test]
    fn test_load_csv_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(STANDINGS.as_bytes()).unwrap();

        let loaded = load_table(file.path(), &LoadOptions::default()).unwrap();
        assert_eq!(loaded.info.kind, InputKind::Csv);
        assert_eq!(loaded.info.row_count, 2);
        assert_eq!(loaded.info.columns.len(), 12);
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"[{"Team": "Inter", "PTS": "69"}]"#).unwrap();

        let loaded = load_table(file.path(), &LoadOptions::default()).unwrap();
        assert_eq!(loaded.info.kind, InputKind::Json);
        assert_eq!(loaded.info.columns, vec!["Team", "PTS"]);
    }

    #[test]
    fn test_load_malformed_json() {
        let err = load_bytes(br#"{"Team": "Inter"}"#, InputKind::Json, &LoadOptions::default(), "t")
            .unwrap_err();
        assert!(matches!(err, PipelineError::Transform(TransformError::InvalidInput(_))));
    }

    #[test]
    fn test_strict_utf8_unless_auto() {
        let latin1: &[u8] = b"Squadra\nSociet\xe0";
        let err = load_bytes(latin1, InputKind::Csv, &LoadOptions::default(), "t").unwrap_err();
        assert!(matches!(err, PipelineError::Csv(CsvError::NotText { .. })));

        let options = LoadOptions { auto_encoding: true, kind: None };
        let loaded = load_bytes(latin1, InputKind::Csv, &options, "t").unwrap();
        assert_eq!(loaded.table.len(), 1);
    }

    #[test]
    fn test_run_plan() {
        let loaded =
            load_bytes(STANDINGS.as_bytes(), InputKind::Csv, &LoadOptions::default(), "t").unwrap();
        let report = run_plan(&loaded.table, &example_plan()).unwrap();
        assert_eq!(report.table.rows()[0].get("Team"), Some("Napoli"));
    }

    #[test]
    fn test_summarize_column() {
        let table = crate::parser::parse(STANDINGS);
        let summary = summarize_column(&table, "PTS").unwrap();
        assert_eq!(summary.median, 84.5);

        let err = summarize_column(&table, "Team").unwrap_err();
        assert!(matches!(err, PipelineError::NoNumbers(_)));
    }
}
