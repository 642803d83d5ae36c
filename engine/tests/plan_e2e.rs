// tests/plan_e2e.rs
use std::fs;

use matchstats::{
    example_plan, load_table, render, run_plan, summarize_column, to_csv_string, LoadOptions,
    OutputFormat, PipelineError, PlanError, Step, TransformPlan,
};

const MATCHES: &str = "Data,Home,Away,xG\r
02/10/2019,Inter,Sassuolo,1.87+0.87\r
02/17/2019,Fiorentina,Inter,0.95-1.05\r
02/24/2019,Inter,Cagliari,2.31+0.31\r
03/03/2019,Udinese,Inter,1.02\r
,Inter,Roma,\r
";

#[test]
fn run_plan_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("matches.csv");
    let plan_path = dir.path().join("after_pivot.json");
    fs::write(&csv_path, MATCHES).unwrap();
    fs::write(
        &plan_path,
        r#"{
            "description": "Second half of the season, best xG first",
            "steps": [
                {"type": "filter_after", "column": "Data", "pivot": "02/20/2019"},
                {"type": "strip_sign", "columns": ["Data", "Home", "xG"]},
                {"type": "sort_by", "column": "xG", "order": "desc"}
            ]
        }"#,
    )
    .unwrap();

    let plan = TransformPlan::from_json(&fs::read_to_string(&plan_path).unwrap()).unwrap();
    let loaded = load_table(&csv_path, &LoadOptions::default()).unwrap();
    assert_eq!(loaded.info.row_count, 5);

    let report = run_plan(&loaded.table, &plan).unwrap();
    assert_eq!(report.row_counts, vec![2, 2, 2]);

    let csv = to_csv_string(&report.table).unwrap();
    assert_eq!(csv, "Data,Home,xG\n02/24/2019,Inter,2.31\n03/03/2019,Udinese,1.02\n");
}

#[test]
fn json_table_input_goes_through_the_same_plan() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("standings.json");
    fs::write(
        &json_path,
        r#"[
            {"Team": "Juventus", "PTS": "90", "xPTS": "77.41-12.59"},
            {"Team": "Napoli", "PTS": "79", "xPTS": "78.92-0.08"}
        ]"#,
    )
    .unwrap();

    let loaded = load_table(&json_path, &LoadOptions::default()).unwrap();
    let report = run_plan(&loaded.table, &example_plan()).unwrap();

    let json = render(&report.table, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            {"Team": "Napoli", "PTS": "79", "xPTS": "78.92"},
            {"Team": "Juventus", "PTS": "90", "xPTS": "77.41"}
        ])
    );
}

#[test]
fn bad_pivot_is_rejected_before_running() {
    let err = TransformPlan::from_json(
        r#"{"steps": [{"type": "filter_before", "column": "Data", "pivot": "2019-02-20"}]}"#,
    )
    .unwrap_err();
    assert!(matches!(err, PlanError::InvalidPivot { step: 0, .. }));
}

#[test]
fn plan_survives_json_round_trip() {
    let plan = TransformPlan::new()
        .with_description("rank")
        .with_step(Step::SortBy {
            column: "xPTS".to_string(),
            order: Default::default(),
        });
    let again = TransformPlan::from_json(&plan.to_json().unwrap()).unwrap();
    assert_eq!(again, plan);
}

#[test]
fn stats_on_missing_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("matches.csv");
    fs::write(&csv_path, MATCHES).unwrap();

    let loaded = load_table(&csv_path, &LoadOptions::default()).unwrap();
    let summary = summarize_column(&loaded.table, "xG").unwrap();
    assert_eq!(summary.count, 4);
    assert!((summary.median - 1.445).abs() < 1e-9);

    let err = summarize_column(&loaded.table, "Home").unwrap_err();
    assert!(matches!(err, PipelineError::NoNumbers(_)));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_table(&dir.path().join("nope.csv"), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, PipelineError::Io(_)));
}
