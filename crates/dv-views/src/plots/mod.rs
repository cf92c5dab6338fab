//! Render-ready chart specifications

pub mod bar;
pub mod line;
pub mod pie;
pub mod scatter;
pub mod stroke;

pub(crate) mod utils;

use serde::Serialize;

// Re-exports
pub use bar::BarChartSpec;
pub use line::LineChartSpec;
pub use pie::PieChartSpec;
pub use scatter::{ScatterPlotSpec, ScatterPoint};
pub use stroke::StrokeSpec;

/// One labelled value of a bar, line or pie chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}
