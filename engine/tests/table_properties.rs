// tests/table_properties.rs
use matchstats::{
    extract_column, parse, project, project_json, strip_sign, Row, Table, TransformError,
};
use serde_json::json;

fn row(cells: &[(&str, &str)]) -> Row {
    cells.iter().copied().collect()
}

fn table(rows: Vec<Row>) -> Table {
    Table::from(rows)
}

const STANDINGS: &str = "N,Team,M,W,D,L,G,GA,PTS,xG,xGA,xPTS
1,Juventus,38,28,6,4,70,30,90,68.42-1.58,32.50+2.50,77.41-12.59
2,Napoli,38,24,7,7,74,36,79,74.62+0.62,34.39-1.61,78.92-0.08
3,Atalanta,38,20,9,9,77,46,69,72.33-4.67,40.51-5.49,71.04+2.04
4,Inter,38,20,9,9,57,33,69,60.10+3.10,33.02+0.02,68.36-0.64
";

#[test]
fn header_mapping_round_trip() {
    let t = parse("A,B\n1,2\n3,4");
    assert_eq!(t.rows(), &[row(&[("A", "1"), ("B", "2")]), row(&[("A", "3"), ("B", "4")])]);
}

#[test]
fn quoted_comma_and_escaped_quote() {
    let t = parse("A,B\n\"x,y\",\"say \"\"hi\"\"\"");
    assert_eq!(t.rows(), &[row(&[("A", "x,y"), ("B", "say \"hi\"")])]);
}

#[test]
fn empty_input_is_empty_table() {
    assert!(parse("").is_empty());
}

#[test]
fn interior_blank_line_keeps_its_row() {
    let t = parse("A,B\n1,2\n\n3,4\n");
    assert_eq!(t.len(), 3);
    assert_eq!(t.rows()[1], row(&[("A", "")]));
}

#[test]
fn strip_sign_cuts_at_either_sign() {
    for (cell, expected) in [("5+", "5"), ("5-", "5"), ("5", "5")] {
        let t = table(vec![row(&[("P", cell)])]);
        assert_eq!(strip_sign(&t, &["P"]).rows(), &[row(&[("P", expected)])]);
    }
}

#[test]
fn projection_omits_absent_keys() {
    let t = table(vec![row(&[("A", "1")])]);
    let projected = project(&t, &["A", "B"]);
    assert_eq!(projected.rows(), &[row(&[("A", "1")])]);
    assert!(!projected.rows()[0].contains_key("B"));
}

#[test]
fn projection_is_idempotent() {
    let t = parse(STANDINGS);
    let cols = ["Team", "xG", "Missing"];
    let once = project(&t, &cols);
    assert_eq!(project(&once, &cols), once);
}

#[test]
fn transforms_keep_row_count() {
    let t = parse(STANDINGS);
    for cols in [vec![], vec!["Team"], vec!["Team", "xPTS", "Nope"]] {
        assert_eq!(project(&t, &cols).len(), t.len());
        assert_eq!(strip_sign(&t, &cols).len(), t.len());
    }
}

#[test]
fn standings_cleanup_matches_chart_input() {
    let t = parse(STANDINGS);
    let clean = strip_sign(&t, &["Team", "xG", "xGA", "xPTS"]);

    assert_eq!(extract_column(&clean, "Team"), vec!["Juventus", "Napoli", "Atalanta", "Inter"]);
    assert_eq!(extract_column(&clean, "xG"), vec!["68.42", "74.62", "72.33", "60.10"]);
    assert_eq!(extract_column(&clean, "PTS"), Vec::<String>::new());
}

#[test]
fn malformed_json_table_is_invalid_input() {
    let err = project_json(&json!(42), &["A"]).unwrap_err();
    assert!(matches!(err, TransformError::InvalidInput(_)));

    let err = project_json(&json!([{ "A": 1 }]), &["A"]).unwrap_err();
    assert!(matches!(err, TransformError::InvalidInput(_)));
}
