//! Type inference over a single-record sample
//!
//! Only the first record of a sample is consulted. Later rows never change the
//! inferred type, so a blank first value yields `string` even when the rest of
//! the column is numeric.

mod date;

pub use date::parse_date;

use dv_core::{ColumnDefinition, RawRecord, RawValue, SemanticType, TableDefinition};

/// Infer the semantic type of a single raw value.
///
/// Rules are applied in order and the first match wins:
/// blank → string, boolean → boolean, number → number, date → date,
/// anything else → string.
pub fn infer_value_type(value: &RawValue) -> SemanticType {
    match value {
        RawValue::Null => SemanticType::String,
        RawValue::Boolean(_) => SemanticType::Boolean,
        RawValue::Number(_) => SemanticType::Number,
        RawValue::Date(_) => SemanticType::Date,
        RawValue::String(text) => infer_text_type(text),
    }
}

fn infer_text_type(text: &str) -> SemanticType {
    if text.trim().is_empty() {
        SemanticType::String
    } else if text == "true" || text == "false" {
        SemanticType::Boolean
    } else if dv_core::parse_number(text).is_some() {
        SemanticType::Number
    } else if parse_date(text).is_some() {
        SemanticType::Date
    } else {
        SemanticType::String
    }
}

/// Detect one semantic type per key of the first record, in key order
pub fn detect_column_types(sample: &[RawRecord]) -> Vec<SemanticType> {
    let Some(first) = sample.first() else {
        return Vec::new();
    };

    first.values().map(infer_value_type).collect()
}

/// Build a table definition whose columns are the first record's keys
pub fn table_from_sample(name: &str, sample: &[RawRecord]) -> TableDefinition {
    let types = detect_column_types(sample);
    let columns = sample
        .first()
        .map(|first| {
            first
                .keys()
                .zip(types)
                .map(|(key, semantic_type)| ColumnDefinition::new(key.clone(), semantic_type))
                .collect()
        })
        .unwrap_or_default();

    let table = TableDefinition::new(name, columns);
    tracing::debug!(
        "Inferred {} columns for table '{}': {:?}",
        table.columns.len(),
        table.name,
        table
            .columns
            .iter()
            .map(|c| format!("{}:{}", c.name, c.semantic_type))
            .collect::<Vec<_>>()
    );
    table
}
