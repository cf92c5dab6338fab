//! Pie chart specification

use dv_core::QueryResult;
use serde::Serialize;

use super::utils::{coerce_number, label_text};
use super::ChartPoint;
use crate::keys::lookup_normalized;

/// Pie slices named by a category column and sized by a value column.
///
/// Rows are read through normalized field keys, so `total_sales` also finds
/// a `totalSales` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChartSpec {
    pub name_key: String,
    pub value_key: String,
    pub slices: Vec<ChartPoint>,
    pub total: f64,
}

impl PieChartSpec {
    pub fn new(result: &QueryResult, name_key: &str, value_key: &str) -> Self {
        let slices: Vec<ChartPoint> = result
            .rows
            .iter()
            .map(|row| {
                ChartPoint::new(
                    label_text(lookup_normalized(row, name_key)),
                    coerce_number(lookup_normalized(row, value_key)),
                )
            })
            .collect();
        let total = slices.iter().map(|s| s.value).sum();

        Self {
            name_key: name_key.to_string(),
            value_key: value_key.to_string(),
            slices,
            total,
        }
    }

    /// Share of the total for one slice, 0 when the total is 0
    pub fn fraction(&self, idx: usize) -> f64 {
        match self.slices.get(idx) {
            Some(slice) if self.total != 0.0 => slice.value / self.total,
            _ => 0.0,
        }
    }
}
