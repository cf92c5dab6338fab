//! Scatter plot specification

use dv_core::{QueryResult, RawValue};
use serde::Serialize;

use super::utils::coerce_number;

/// Scatter point; x keeps its raw value so category axes stay categorical
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: RawValue,
    pub y: f64,
}

/// Scatter plot over the first two result columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPlotSpec {
    pub x: String,
    pub y: String,
    pub numeric_x: bool,
    pub points: Vec<ScatterPoint>,
}

impl ScatterPlotSpec {
    pub fn new(result: &QueryResult, x: &str, y: &str) -> Self {
        let numeric_x = matches!(result.first_value(x), Some(RawValue::Number(_)));

        let points = result
            .rows
            .iter()
            .map(|row| ScatterPoint {
                x: row.get(x).cloned().unwrap_or(RawValue::Null),
                y: coerce_number(row.get(y)),
            })
            .collect();

        Self {
            x: x.to_string(),
            y: y.to_string(),
            numeric_x,
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_x_axis() {
        let result: QueryResult = serde_json::from_value(json!({
            "columns": ["label", "weight", "height"],
            "rows": [{"label": "a", "weight": 3, "height": 9}]
        }))
        .unwrap();

        let spec = ScatterPlotSpec::new(&result, "label", "weight");
        assert!(!spec.numeric_x);
        assert_eq!(spec.points[0].x, RawValue::String("a".into()));
        assert_eq!(spec.points[0].y, 3.0);
    }
}
