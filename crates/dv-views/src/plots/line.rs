//! Line chart specification

use dv_core::QueryResult;
use serde::Serialize;

use super::utils::{coerce_number, label_text};
use super::ChartPoint;

/// A line over an x column (usually dates) with y values from a value column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChartSpec {
    pub x: String,
    pub y: String,
    pub points: Vec<ChartPoint>,
}

impl LineChartSpec {
    pub fn new(result: &QueryResult, x: &str, y: &str) -> Self {
        tracing::debug!("Building line chart - X: '{}', Y: '{}'", x, y);

        let points = result
            .rows
            .iter()
            .map(|row| ChartPoint::new(label_text(row.get(x)), coerce_number(row.get(y))))
            .collect();

        Self {
            x: x.to_string(),
            y: y.to_string(),
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_points_follow_row_order() {
        let result: QueryResult = serde_json::from_value(json!({
            "columns": ["month", "total"],
            "rows": [{"month": "2024-02", "total": 8}, {"month": "2024-01", "total": "5"}]
        }))
        .unwrap();

        let spec = LineChartSpec::new(&result, "month", "total");
        assert_eq!(
            spec.points,
            vec![ChartPoint::new("2024-02", 8.0), ChartPoint::new("2024-01", 5.0)]
        );
    }
}
