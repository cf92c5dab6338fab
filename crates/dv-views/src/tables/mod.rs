//! Tabular fallback for results no chart fits

use dv_core::{QueryResult, RawValue};
use serde::Serialize;

use crate::plots::utils::label_text;

/// Columns of a result shown as a plain table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSpec {
    pub columns: Vec<String>,
}

impl TableSpec {
    pub fn new(result: &QueryResult) -> Self {
        Self {
            columns: result.columns.clone(),
        }
    }

    /// Display text of every cell, row-major in column order
    pub fn cells(&self, result: &QueryResult) -> Vec<Vec<String>> {
        result
            .rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|column| cell_text(row.get(column)))
                    .collect()
            })
            .collect()
    }
}

/// Missing and null cells are empty; fractional numbers show two decimals
fn cell_text(value: Option<&RawValue>) -> String {
    match value {
        Some(RawValue::Number(n)) if n.is_finite() && n.fract() != 0.0 => format!("{:.2}", n),
        other => label_text(other),
    }
}
