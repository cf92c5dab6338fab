//! Visualization selection for query results
//!
//! `identify` picks a visualization kind from the shape of a result and
//! `plan` resolves the columns each chart needs. Rendering itself lives with
//! the consumer.

pub mod axis;
pub mod keys;
pub mod plan;
pub mod plots;
pub mod selector;
mod tables;

pub use axis::{AxisKeyResolver, AxisOverrides};
pub use keys::{lookup_normalized, normalize_field_key};
pub use plan::{plan, plan_for_kind, VisualizationPlan};
pub use plots::{
    BarChartSpec, ChartPoint, LineChartSpec, PieChartSpec, ScatterPlotSpec, StrokeSpec,
};
pub use selector::{identify, identify_optional, ShapeSignature};
pub use tables::TableSpec;
