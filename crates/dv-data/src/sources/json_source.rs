//! JSON adapter

use dv_core::{RawRecord, RawValue, TableDefinition};
use serde_json::Value;

use crate::schema::table_from_sample;
use crate::DataError;

/// Infer tables from a JSON document.
///
/// A top-level array is one table named `array_table_name`; a top-level
/// object maps each key to a table. Keys whose value is not a non-empty array
/// become tables without columns.
pub fn infer_json(text: &str, array_table_name: &str) -> Result<Vec<TableDefinition>, DataError> {
    let document: Value = serde_json::from_str(text)?;

    match document {
        Value::Array(rows) => {
            if rows.is_empty() {
                tracing::warn!("JSON array is empty, no tables inferred");
                return Ok(Vec::new());
            }
            Ok(vec![table_from_rows(array_table_name, &rows)])
        }
        Value::Object(tables) => Ok(tables
            .iter()
            .map(|(name, value)| match value {
                Value::Array(rows) if !rows.is_empty() => table_from_rows(name, rows),
                _ => TableDefinition::empty(name.as_str()),
            })
            .collect()),
        other => Err(DataError::UnsupportedDocument(json_type_name(&other))),
    }
}

fn table_from_rows(name: &str, rows: &[Value]) -> TableDefinition {
    let sample: Vec<RawRecord> = rows.first().map(record_from_json).into_iter().collect();
    table_from_sample(name, &sample)
}

/// Flatten a JSON object into a raw record; anything else has no fields
pub fn record_from_json(value: &Value) -> RawRecord {
    match value {
        Value::Object(fields) => fields
            .iter()
            .map(|(key, value)| (key.clone(), RawValue::from(value.clone())))
            .collect(),
        _ => RawRecord::new(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
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
    use dv_core::{ColumnDefinition, SemanticType};

    #[test]
    fn test_object_of_tables_scenario() {
        let tables = infer_json(r#"{"users":[{"id":1,"name":"Al"}], "orders":[]}"#, "json_data")
            .unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].name, "users");
        assert_eq!(
            tables[0].columns,
            vec![
                ColumnDefinition::new("id", SemanticType::Number),
                ColumnDefinition::new("name", SemanticType::String),
            ]
        );
        assert_eq!(tables[1], TableDefinition::empty("orders"));
    }

    #[test]
    fn test_array_document() {
        let tables = infer_json(
            r#"[{"active":true,"when":"2024-03-01","note":null},{"active":"x"}]"#,
            "json_data",
        )
        .unwrap();
        assert_eq!(tables.len(), 1);
        let types: Vec<SemanticType> = tables[0].columns.iter().map(|c| c.semantic_type).collect();
        assert_eq!(
            types,
            vec![SemanticType::Boolean, SemanticType::Date, SemanticType::String]
        );
    }

    #[test]
    fn test_non_array_values_yield_empty_tables() {
        let tables = infer_json(r#"{"meta":{"v":1},"count":3}"#, "json_data").unwrap();
        assert!(tables.iter().all(|t| t.columns.is_empty()));
        assert_eq!(tables.len(), 2);
    }

    #[test]
    fn test_empty_array_yields_no_tables() {
        assert!(infer_json("[]", "json_data").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(infer_json("{\"users\": [", "json_data"), Err(DataError::Json(_))));
    }

    #[test]
    fn test_scalar_document_is_rejected() {
        let err = infer_json("42", "json_data").unwrap_err();
        assert_eq!(
            err.to_string(),
            "JSON document must be an array or an object, found a number"
        );
    }
}
