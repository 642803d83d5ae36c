//! Writing tables out as JSON or CSV.
//!
//! CSV output uses every column seen in the table (first-seen order) as the
//! header; a row missing a column gets an empty cell there. A table whose
//! rows hold no cells at all writes nothing.

use std::io::Write;

use crate::config::OutputFormat;
use crate::error::ExportResult;
use crate::models::Table;

/// Write a table as CSV to any writer.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> ExportResult<()> {
    let columns = table.columns();
    // Without a header there is nothing to key the rows by
    if columns.is_empty() {
        return Ok(());
    }

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&columns)?;
    for row in table {
        wtr.write_record(columns.iter().map(|c| row.get(c).unwrap_or("")))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Render a table as CSV text.
pub fn to_csv_string(table: &Table) -> ExportResult<String> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Render a table as pretty-printed JSON.
pub fn to_json_string(table: &Table) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(table)?)
}

/// Render a table in the requested format.
pub fn render(table: &Table, format: OutputFormat) -> ExportResult<String> {
    match format {
        OutputFormat::Json => to_json_string(table),
        OutputFormat::Csv => to_csv_string(table),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_csv_quotes_when_needed() {
        let table = parse("Match,Note\n\"Inter, Milan\",\"said \"\"ok\"\"\"");
        let csv = to_csv_string(&table).unwrap();
        assert_eq!(csv, "Match,Note\n\"Inter, Milan\",\"said \"\"ok\"\"\"\n");
    }

    #[test]
    fn test_csv_fills_missing_cells() {
        let table = parse("A,B,C\n1,2,3\n4");
        let csv = to_csv_string(&table).unwrap();
        assert_eq!(csv, "A,B,C\n1,2,3\n4,,\n");
    }

    #[test]
    fn test_csv_reparses_to_same_table() {
        let table = parse("Team,xG\nInter,\"60.10\n+3.90\"\nRoma,55");
        let again = parse(&to_csv_string(&table).unwrap());
        assert_eq!(again, table);
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(to_csv_string(&Table::default()).unwrap(), "");
        assert_eq!(to_json_string(&Table::default()).unwrap(), "[]");
    }

    #[test]
    fn test_rows_without_cells_write_nothing() {
        let table = crate::transform::columns::project(&parse("A,B\n1,2\n3,4"), &["Z"]);
        assert_eq!(table.len(), 2);
        assert_eq!(to_csv_string(&table).unwrap(), "");
    }

    #[test]
    fn test_render_json() {
        let table = parse("Team\nInter");
        let json = render(&table, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, serde_json::json!([{ "Team": "Inter" }]));
    }
}
