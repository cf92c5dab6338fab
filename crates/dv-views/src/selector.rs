//! Visualization kind selection from the shape of a query result

use dv_core::{QueryResult, ValueType, VisualizationKind};

/// Shape descriptor the selector switches on: row count, column count and
/// the runtime type of each column in the first row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeSignature {
    pub rows: usize,
    pub columns: usize,
    pub first_row: Vec<ValueType>,
}

impl ShapeSignature {
    /// Describe a query result. Columns missing from the first row count as null.
    pub fn of(result: &QueryResult) -> Self {
        let first_row = match result.first_row() {
            Some(row) => result
                .columns
                .iter()
                .map(|column| {
                    row.get(column)
                        .map(|value| value.value_type())
                        .unwrap_or(ValueType::Null)
                })
                .collect(),
            None => Vec::new(),
        };

        Self {
            rows: result.row_count(),
            columns: result.column_count(),
            first_row,
        }
    }

    /// Pick the visualization kind for this shape
    pub fn classify(&self) -> VisualizationKind {
        use ValueType::{Number, String};

        match (self.rows, self.columns, self.first_row.as_slice()) {
            (0, _, _) | (_, 0, _) => VisualizationKind::None,
            (1, 1, _) => VisualizationKind::Stroke,
            (_, 1, _) => VisualizationKind::Table,
            (_, 2, [String, Number]) => VisualizationKind::Pie,
            (_, 2, [String, String]) => VisualizationKind::Table,
            (_, 3, [String, Number, Number])
            | (_, 3, [String, String, Number])
            | (_, 3, [Number, Number, Number]) => VisualizationKind::Scatter,
            // Bar and line have no shape rule yet; they are only reachable
            // through an explicit request to `plan_for_kind`.
            _ => VisualizationKind::Table,
        }
    }
}

/// Identify the visualization kind for a query result
pub fn identify(result: &QueryResult) -> VisualizationKind {
    let shape = ShapeSignature::of(result);
    let kind = shape.classify();
    tracing::debug!(
        "Identified {} for {} rows x {} columns {:?}",
        kind,
        shape.rows,
        shape.columns,
        shape.first_row
    );
    kind
}

/// Identify the visualization kind, treating a missing result as no data
pub fn identify_optional(result: Option<&QueryResult>) -> VisualizationKind {
    result.map(identify).unwrap_or(VisualizationKind::None)
}
