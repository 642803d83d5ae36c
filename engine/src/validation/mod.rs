//! JSON Schema validation for tables handed in as JSON.
//!
//! CSV input never needs this: the parser only ever builds well-formed
//! tables. JSON input (files, other tools' output) is checked against the
//! embedded `schemas/table.json` (Draft 7) before it is turned into a
//! [`crate::Table`].
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use matchstats::validation::{is_valid_table, validate_table};
//!
//! assert!(is_valid_table(&json!([{ "Team": "Inter", "PTS": "69" }])));
//! assert!(validate_table(&json!([{ "PTS": 69 }])).is_err());
//! ```

use once_cell::sync::Lazy;
use serde_json::Value;

static TABLE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/table.json")).expect("Invalid embedded schema")
});

/// Validate a JSON value against a JSON schema.
///
/// Returns `Err` with one message per violation.
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Quick true/false check against a schema.
pub fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

/// Validate against the table schema (array of string-valued objects).
pub fn validate_table(data: &Value) -> Result<(), Vec<String>> {
    validate(&TABLE_SCHEMA, data)
}

/// Quick check against the table schema.
pub fn is_valid_table(data: &Value) -> bool {
    is_valid(&TABLE_SCHEMA, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_table() {
        let table = json!([
            { "Team": "Inter", "PTS": "69", "xPTS": "63.57-5.43" },
            { "Team": "Napoli" }
        ]);
        assert!(is_valid_table(&table));
    }

    #[test]
    fn test_empty_table_is_valid() {
        assert!(is_valid_table(&json!([])));
    }

    #[test]
    fn test_invalid_shapes() {
        assert!(!is_valid_table(&json!({ "Team": "Inter" })));
        assert!(!is_valid_table(&json!(["Inter", "Napoli"])));
        assert!(!is_valid_table(&json!([{ "PTS": 69 }])));
    }

    #[test]
    fn test_errors_name_expected_type() {
        let result = validate_table(&json!([{ "Team": "Inter" }, { "PTS": 69 }]));
        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("string"));
    }
}
