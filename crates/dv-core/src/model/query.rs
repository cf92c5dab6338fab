use std::fmt;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use super::value::{RawRecord, RawValue};
use crate::ModelError;

/// Rectangular result of a query against an imported dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Column names in result order
    pub columns: Vec<String>,

    /// Rows keyed by column name
    pub rows: Vec<RawRecord>,
}

impl QueryResult {
    /// Create a query result, checking that columns are unique and that every
    /// row carries exactly the result columns
    pub fn try_new(columns: Vec<String>, rows: Vec<RawRecord>) -> Result<Self, ModelError> {
        let result = Self { columns, rows };
        result.validate()?;
        Ok(result)
    }

    /// Check the column and row invariants
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut seen = AHashSet::with_capacity(self.columns.len());
        for column in &self.columns {
            if !seen.insert(column.as_str()) {
                return Err(ModelError::DuplicateColumn(column.clone()));
            }
        }

        for (idx, row) in self.rows.iter().enumerate() {
            let matches = row.len() == seen.len() && row.keys().all(|k| seen.contains(k.as_str()));
            if !matches {
                return Err(ModelError::RowShape {
                    row: idx,
                    expected: self.columns.clone(),
                    found: row.keys().cloned().collect(),
                });
            }
        }
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_row(&self) -> Option<&RawRecord> {
        self.rows.first()
    }

    /// Value of `column` in the first row, if present
    pub fn first_value(&self, column: &str) -> Option<&RawValue> {
        self.first_row().and_then(|row| row.get(column))
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

/// Kind of visualization chosen for a query result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualizationKind {
    Bar,
    Line,
    Pie,
    Scatter,
    Table,
    Stroke,
    None,
}

impl VisualizationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualizationKind::Bar => "bar",
            VisualizationKind::Line => "line",
            VisualizationKind::Pie => "pie",
            VisualizationKind::Scatter => "scatter",
            VisualizationKind::Table => "table",
            VisualizationKind::Stroke => "stroke",
            VisualizationKind::None => "none",
        }
    }
}

impl fmt::Display for VisualizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, RawValue)]) -> RawRecord {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_try_new_accepts_matching_rows() {
        let result = QueryResult::try_new(
            vec!["country".into(), "sales".into()],
            vec![record(&[("sales", RawValue::Number(100.0)), ("country", "US".into())])],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_try_new_rejects_partial_rows() {
        let result = QueryResult::try_new(
            vec!["country".into(), "sales".into()],
            vec![record(&[("country", "US".into())])],
        );
        assert!(matches!(result, Err(ModelError::RowShape { row: 0, .. })));
    }

    #[test]
    fn test_try_new_rejects_duplicate_columns() {
        let result = QueryResult::try_new(vec!["a".into(), "a".into()], Vec::new());
        assert_eq!(result, Err(ModelError::DuplicateColumn("a".into())));
    }

    #[test]
    fn test_deserialize_preserves_row_order() {
        let result: QueryResult = serde_json::from_value(json!({
            "columns": ["b", "a"],
            "rows": [{"b": 1, "a": "x"}]
        }))
        .unwrap();
        let keys: Vec<&String> = result.rows[0].keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(result.first_value("a"), Some(&RawValue::String("x".into())));
    }
}
