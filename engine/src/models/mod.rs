//! Domain models: [`Row`] and [`Table`].
//!
//! A row maps column names to string cells and remembers the order in which
//! its columns were first inserted. A table is the ordered list of rows
//! produced by one parse.
//!
//! Both serialize to plain JSON (`[{"Team": "Inter", "PTS": "69"}]`), keys in
//! column order.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

use crate::error::{TransformError, TransformResult};
use crate::validation::validate_table;

// =============================================================================
// Row
// =============================================================================

/// One data record: column name → cell value, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
        }
    }

    /// Insert a cell. An existing key keeps its position and gets the new
    /// value; the previous value is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.cells.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.cells.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Convert a JSON object with string values into a row.
    pub fn from_json(value: &Value) -> TransformResult<Self> {
        let obj = value.as_object().ok_or_else(|| {
            TransformError::InvalidInput(format!("expected an object, got {}", kind_of(value)))
        })?;

        let mut row = Row::with_capacity(obj.len());
        for (key, cell) in obj {
            let text = cell.as_str().ok_or_else(|| {
                TransformError::InvalidInput(format!(
                    "column '{}' holds {}, expected a string",
                    key,
                    kind_of(cell)
                ))
            })?;
            row.insert(key.as_str(), text);
        }
        Ok(row)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (k, v) in &self.cells {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of column names to string cells")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Row, A::Error> {
                let mut row = Row::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((k, v)) = access.next_entry::<String, String>()? {
                    row.insert(k, v);
                }
                Ok(row)
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

// =============================================================================
// Table
// =============================================================================

/// Ordered sequence of rows. The header record is not part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Every column name seen in the table, in first-seen order.
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for row in &self.rows {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.to_string());
                }
            }
        }
        columns
    }

    /// Build a table from a JSON array of string-valued objects.
    ///
    /// Anything else (a scalar, an array holding non-objects, non-string
    /// cells) is rejected with [`TransformError::InvalidInput`].
    pub fn from_json(value: &Value) -> TransformResult<Self> {
        validate_table(value)
            .map_err(|errors| TransformError::InvalidInput(errors.join("; ")))?;

        let items = value.as_array().ok_or_else(|| {
            TransformError::InvalidInput(format!("expected an array, got {}", kind_of(value)))
        })?;

        let rows = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                Row::from_json(item).map_err(|e| match e {
                    TransformError::InvalidInput(msg) => {
                        TransformError::InvalidInput(format!("row {}: {}", i, msg))
                    }
                    other => other,
                })
            })
            .collect::<TransformResult<Vec<_>>>()?;

        Ok(Self { rows })
    }

    /// Parse JSON text into a table.
    pub fn from_json_str(text: &str) -> TransformResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json(&value)
    }

    pub fn to_json(&self) -> Value {
        Value::Array(
            self.rows
                .iter()
                .map(|row| {
                    Value::Object(
                        row.iter()
                            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                            .collect(),
                    )
                })
                .collect(),
        )
    }
}

impl From<Vec<Row>> for Table {
    fn from(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Table {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_keeps_first_position() {
        let mut row = Row::new();
        row.insert("A", "1");
        row.insert("B", "2");
        assert_eq!(row.insert("A", "3"), Some("1".to_string()));

        let keys: Vec<&str> = row.keys().collect();
        assert_eq!(keys, vec!["A", "B"]);
        assert_eq!(row.get("A"), Some("3"));
    }

    #[test]
    fn test_serialize_in_column_order() {
        let row: Row = [("Team", "Inter"), ("PTS", "69"), ("M", "38")].into_iter().collect();
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"Team":"Inter","PTS":"69","M":"38"}"#);
    }

    #[test]
    fn test_table_from_json() {
        let table = Table::from_json(&json!([{"Z": "1", "A": "2"}, {"A": "3"}])).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].keys().collect::<Vec<_>>(), vec!["Z", "A"]);
        assert_eq!(table.columns(), vec!["Z", "A"]);
    }

    #[test]
    fn test_table_from_json_rejects_scalar() {
        let err = Table::from_json(&json!(42)).unwrap_err();
        assert!(matches!(err, TransformError::InvalidInput(_)));
    }

    #[test]
    fn test_table_from_json_rejects_non_string_cell() {
        let err = Table::from_json(&json!([{"A": "1"}, {"A": 2}])).unwrap_err();
        assert!(matches!(err, TransformError::InvalidInput(_)));
    }

    #[test]
    fn test_to_json_matches_serde() {
        let table: Table = vec![[("A", "1"), ("B", "2")].into_iter().collect::<Row>()].into();
        assert_eq!(table.to_json(), serde_json::to_value(&table).unwrap());
    }

    #[test]
    fn test_deserialize_rejects_numbers() {
        let result: Result<Table, _> = serde_json::from_str(r#"[{"A": 1}]"#);
        assert!(result.is_err());
    }
}
