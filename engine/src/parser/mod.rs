//! CSV text to [`Table`] parser, with encoding auto-detection for raw bytes.
//!
//! The first record is the header. Every following record becomes a
//! [`Row`] keyed by header name; positions without a usable header name
//! get a synthesized `C<n>` key (1-based).
//!
//! ```text
//! Team,,PTS          →  { "Team": "Inter", "C2": "38", "PTS": "69" }
//! Inter,38,69
//! ```

pub mod tokenizer;

use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::models::{Row, Table};
use tokenizer::{is_blank, Field, Record, Tokenizer};

const UTF8_BOM: char = '\u{feff}';

/// Result of parsing raw bytes, with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed rows
    pub table: Table,
    /// Detected or used encoding
    pub encoding: String,
    /// Resolved column names (synthesized where the header cell was empty)
    pub headers: Vec<String>,
}

/// Parse CSV text into a table.
///
/// Never fails: a blank line becomes a row holding one empty cell under the
/// first column (except a final one), and an unterminated quoted field runs
/// to the end of the input.
///
/// # Example
/// ```
/// let table = matchstats::parse("A,B\n1,2\n3,4");
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.rows()[0].get("A"), Some("1"));
/// assert_eq!(table.rows()[1].get("B"), Some("4"));
/// ```
pub fn parse(text: &str) -> Table {
    let mut records = Tokenizer::new(text);

    let Some(header) = records.next() else {
        return Table::default();
    };
    let header: Vec<String> = header.into_iter().map(|f| f.value).collect();

    let mut body: Vec<Record> = records.collect();
    // Only the empty line left by a final line break is dropped
    if body.last().is_some_and(|record| is_blank(record)) {
        body.pop();
    }

    body.into_iter()
        .map(|record| build_row(&header, record))
        .collect()
}

/// Column names of a CSV text, as [`parse`] would key its rows.
pub fn headers(text: &str) -> Vec<String> {
    let Some(header) = Tokenizer::new(text).next() else {
        return Vec::new();
    };
    let raw: Vec<String> = header.into_iter().map(|f| f.value).collect();
    (0..raw.len()).map(|i| column_name(&raw, i)).collect()
}

fn build_row(header: &[String], record: Vec<Field>) -> Row {
    let mut row = Row::with_capacity(record.len());
    for (i, field) in record.into_iter().enumerate() {
        row.insert(column_name(header, i), field.value);
    }
    row
}

fn column_name(header: &[String], index: usize) -> String {
    match header.get(index) {
        Some(name) if !name.is_empty() => name.clone(),
        _ => format!("C{}", index + 1),
    }
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix(UTF8_BOM).unwrap_or(text)
}

/// View bytes as UTF-8 text, without a leading byte order mark.
///
/// Anything that is not valid UTF-8 is rejected with [`CsvError::NotText`].
pub fn decode_utf8(bytes: &[u8]) -> CsvResult<&str> {
    let text = std::str::from_utf8(bytes).map_err(|e| CsvError::NotText {
        offset: e.valid_up_to(),
    })?;
    Ok(strip_bom(text))
}

/// Parse bytes that must be UTF-8 text.
pub fn parse_bytes(bytes: &[u8]) -> CsvResult<Table> {
    Ok(parse(decode_utf8(bytes)?))
}

/// Parse CSV text and keep its metadata.
pub fn parse_string_with_metadata(content: &str, encoding: impl Into<String>) -> ParseResult {
    ParseResult {
        table: parse(content),
        encoding: encoding.into(),
        headers: headers(content),
    }
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the given encoding label.
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let text = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(_) => String::from_utf8_lossy(bytes).into_owned(),
        },
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        label => {
            let encoding = encoding_rs::Encoding::for_label(label.as_bytes())
                .ok_or_else(|| CsvError::Encoding(label.to_string()))?;
            encoding.decode(bytes).0.into_owned()
        }
    };

    Ok(strip_bom(&text).to_string())
}

/// Parse CSV bytes with auto-detection of the encoding.
pub fn parse_bytes_auto(bytes: &[u8]) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    Ok(parse_string_with_metadata(&content, encoding))
}

/// Parse a UTF-8 CSV file.
pub fn parse_csv_file<P: AsRef<Path>>(path: P) -> CsvResult<Table> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes(&bytes)
}

/// Parse a CSV file with auto-detection of the encoding.
///
/// # Example
/// ```ignore
/// let result = parse_csv_file_auto("serie_a_stats.csv")?;
/// println!("Encoding: {}, rows: {}", result.encoding, result.table.len());
/// ```
pub fn parse_csv_file_auto<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes_auto(&bytes)
}
