//! Visualization plans: the selected kind plus the columns each chart uses

use dv_core::{QueryResult, VisualizationKind};
use serde::Serialize;

use crate::axis::{AxisKeyResolver, AxisOverrides};
use crate::plots::{BarChartSpec, LineChartSpec, PieChartSpec, ScatterPlotSpec, StrokeSpec};
use crate::selector::identify;
use crate::tables::TableSpec;

/// What to render for a query result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VisualizationPlan {
    None,
    Stroke(StrokeSpec),
    Table(TableSpec),
    /// Pie charts are shown alongside a bar chart over the same columns
    Pie {
        pie: PieChartSpec,
        bar: BarChartSpec,
    },
    Bar(BarChartSpec),
    Line(LineChartSpec),
    Scatter(ScatterPlotSpec),
}

impl VisualizationPlan {
    pub fn kind(&self) -> VisualizationKind {
        match self {
            VisualizationPlan::None => VisualizationKind::None,
            VisualizationPlan::Stroke(_) => VisualizationKind::Stroke,
            VisualizationPlan::Table(_) => VisualizationKind::Table,
            VisualizationPlan::Pie { .. } => VisualizationKind::Pie,
            VisualizationPlan::Bar(_) => VisualizationKind::Bar,
            VisualizationPlan::Line(_) => VisualizationKind::Line,
            VisualizationPlan::Scatter(_) => VisualizationKind::Scatter,
        }
    }
}

/// Identify the kind for a result and resolve its chart columns
pub fn plan(result: &QueryResult, overrides: &AxisOverrides) -> VisualizationPlan {
    plan_for_kind(identify(result), result, overrides)
}

/// Build the plan for an explicit kind. Falls back to `None` when the result
/// lacks the columns the kind needs.
pub fn plan_for_kind(
    kind: VisualizationKind,
    result: &QueryResult,
    overrides: &AxisOverrides,
) -> VisualizationPlan {
    if result.is_empty() {
        return VisualizationPlan::None;
    }

    let axes = AxisKeyResolver::new(result, overrides);
    let planned = match kind {
        VisualizationKind::None => None,
        VisualizationKind::Stroke => result
            .columns
            .first()
            .map(|column| VisualizationPlan::Stroke(StrokeSpec::new(result, column))),
        VisualizationKind::Table => Some(VisualizationPlan::Table(TableSpec::new(result))),
        VisualizationKind::Pie => axes.category().zip(axes.value()).map(|(name, value)| {
            VisualizationPlan::Pie {
                pie: PieChartSpec::new(result, name, value),
                bar: BarChartSpec::new(result, name, value),
            }
        }),
        VisualizationKind::Bar => axes
            .category()
            .zip(axes.value())
            .map(|(category, value)| VisualizationPlan::Bar(BarChartSpec::new(result, category, value))),
        VisualizationKind::Line => axes
            .line_x()
            .zip(axes.value())
            .map(|(x, y)| VisualizationPlan::Line(LineChartSpec::new(result, x, y))),
        VisualizationKind::Scatter => axes
            .scatter()
            .map(|(x, y)| VisualizationPlan::Scatter(ScatterPlotSpec::new(result, x, y))),
    };

    planned.unwrap_or_else(|| {
        if kind != VisualizationKind::None {
            tracing::warn!("Cannot plan {} for result with {} columns", kind, result.column_count());
        }
        VisualizationPlan::None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plots::ChartPoint;
    use serde_json::json;

    fn result(value: serde_json::Value) -> QueryResult {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_pie_plan_pairs_bar_fallback() {
        let r = result(json!({
            "columns": ["country", "sales"],
            "rows": [{"country": "US", "sales": 100}, {"country": "UK", "sales": 50}]
        }));

        match plan(&r, &AxisOverrides::default()) {
            VisualizationPlan::Pie { pie, bar } => {
                assert_eq!(pie.name_key, "country");
                assert_eq!(pie.value_key, "sales");
                assert_eq!(pie.total, 150.0);
                assert_eq!(bar.category, "country");
                assert_eq!(bar.points[1], ChartPoint::new("UK", 50.0));
            }
            other => panic!("expected pie plan, got {:?}", other),
        }
    }

    #[test]
    fn test_stroke_plan() {
        let r = result(json!({"columns": ["total_sales"], "rows": [{"totalSales": 1250}]}));
        let planned = plan(&r, &AxisOverrides::default());
        assert_eq!(planned.kind(), VisualizationKind::Stroke);
        match planned {
            VisualizationPlan::Stroke(stroke) => assert_eq!(stroke.display_value(), "1250"),
            other => panic!("expected stroke plan, got {:?}", other),
        }
    }

    #[test]
    fn test_scatter_plan_uses_first_two_columns() {
        let r = result(json!({
            "columns": ["label", "x", "y"],
            "rows": [{"label": "a", "x": 1, "y": 2}]
        }));
        match plan(&r, &AxisOverrides::default()) {
            VisualizationPlan::Scatter(spec) => {
                assert_eq!(spec.x, "label");
                assert_eq!(spec.y, "x");
            }
            other => panic!("expected scatter plan, got {:?}", other),
        }
    }

    #[test]
    fn test_explicit_line_plan() {
        let r = result(json!({
            "columns": ["total", "month"],
            "rows": [{"total": 3, "month": "2024-01"}]
        }));
        match plan_for_kind(VisualizationKind::Line, &r, &AxisOverrides::default()) {
            VisualizationPlan::Line(spec) => {
                assert_eq!(spec.x, "month");
                assert_eq!(spec.y, "total");
            }
            other => panic!("expected line plan, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_result_plans_none() {
        let r = result(json!({"columns": ["a"], "rows": []}));
        assert_eq!(plan(&r, &AxisOverrides::default()), VisualizationPlan::None);
        assert_eq!(
            plan_for_kind(VisualizationKind::Table, &r, &AxisOverrides::default()),
            VisualizationPlan::None
        );
    }

    #[test]
    fn test_plan_serializes_with_kind_tag() {
        let r = result(json!({"columns": ["a", "b"], "rows": [{"a": "x", "b": "y"}]}));
        let value = serde_json::to_value(plan(&r, &AxisOverrides::default())).unwrap();
        assert_eq!(value, json!({"kind": "table", "columns": ["a", "b"]}));
    }
}
