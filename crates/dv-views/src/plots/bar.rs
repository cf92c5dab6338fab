//! Bar chart specification

use dv_core::QueryResult;
use serde::Serialize;

use super::utils::{coerce_number, label_text};
use super::ChartPoint;

/// Bars keyed by a category column with heights from a value column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartSpec {
    /// Category column (X-axis)
    pub category: String,

    /// Value column (Y-axis)
    pub value: String,

    pub points: Vec<ChartPoint>,
}

impl BarChartSpec {
    pub fn new(result: &QueryResult, category: &str, value: &str) -> Self {
        tracing::debug!(
            "Building bar chart - Category: '{}', Value: '{}'",
            category,
            value
        );

        let points = result
            .rows
            .iter()
            .map(|row| ChartPoint::new(label_text(row.get(category)), coerce_number(row.get(value))))
            .collect();

        Self {
            category: category.to_string(),
            value: value.to_string(),
            points,
        }
    }

    pub fn max_value(&self) -> f64 {
        self.points.iter().map(|p| p.value).fold(0.0, f64::max)
    }
}
