//! Single-value ("stroke") display

use dv_core::{QueryResult, RawValue};
use serde::Serialize;

use crate::keys::{lookup_normalized, normalize_field_key};

/// The sole value of a one-row, one-column result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrokeSpec {
    /// Result column the value comes from
    pub column: String,

    /// Normalized key the value was looked up under
    pub key: String,

    pub value: Option<RawValue>,
}

impl StrokeSpec {
    pub fn new(result: &QueryResult, column: &str) -> Self {
        let value = result
            .first_row()
            .and_then(|row| lookup_normalized(row, column))
            .cloned();

        Self {
            column: column.to_string(),
            key: normalize_field_key(column),
            value,
        }
    }

    /// Text shown for the value; empty when nothing was found
    pub fn display_value(&self) -> String {
        match &self.value {
            Some(RawValue::Null) | None => String::new(),
            Some(value) => value.to_string(),
        }
    }
}
