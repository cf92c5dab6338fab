//! Axis role resolution for chart columns

use dv_core::{QueryResult, RawValue};
use serde::{Deserialize, Serialize};

/// Explicit column choices per axis role. An override only applies when it
/// names a column of the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisOverrides {
    pub category: Option<String>,
    pub value: Option<String>,
    pub line_x: Option<String>,
}

impl AxisOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, column: impl Into<String>) -> Self {
        self.category = Some(column.into());
        self
    }

    pub fn with_value(mut self, column: impl Into<String>) -> Self {
        self.value = Some(column.into());
        self
    }

    pub fn with_line_x(mut self, column: impl Into<String>) -> Self {
        self.line_x = Some(column.into());
        self
    }
}

/// Resolves which column of a result plays each chart role.
///
/// Every role returns `None` only when the result has no columns.
pub struct AxisKeyResolver<'a> {
    result: &'a QueryResult,
    overrides: &'a AxisOverrides,
}

impl<'a> AxisKeyResolver<'a> {
    pub fn new(result: &'a QueryResult, overrides: &'a AxisOverrides) -> Self {
        Self { result, overrides }
    }

    /// Category (label) column: the first column holding a string in the
    /// first row, else the first column
    pub fn category(&self) -> Option<&'a str> {
        self.valid_override(self.overrides.category.as_deref())
            .or_else(|| self.first_matching(|value| matches!(value, RawValue::String(_))))
            .or_else(|| self.column(0))
    }

    /// Value column: the first column that is numeric or parses as a number
    /// in the first row, else the second column, else the first.
    ///
    /// Null, booleans and blank strings are not numeric here. They would plot
    /// as 0 or 1 and take the role from a real measure column further right.
    pub fn value(&self) -> Option<&'a str> {
        self.valid_override(self.overrides.value.as_deref())
            .or_else(|| self.first_matching(|value| value.as_number().is_some()))
            .or_else(|| self.column(1))
            .or_else(|| self.column(0))
    }

    /// Line x-axis column: the first column whose first-row value reads like
    /// a date (contains `-` or `/`), else the first column
    pub fn line_x(&self) -> Option<&'a str> {
        self.valid_override(self.overrides.line_x.as_deref())
            .or_else(|| {
                self.first_matching(|value| {
                    let text = value.to_string();
                    text.contains('-') || text.contains('/')
                })
            })
            .or_else(|| self.column(0))
    }

    /// Scatter axes are positional
    pub fn scatter(&self) -> Option<(&'a str, &'a str)> {
        Some((self.column(0)?, self.column(1)?))
    }

    fn column(&self, idx: usize) -> Option<&'a str> {
        self.result.columns.get(idx).map(String::as_str)
    }

    fn valid_override(&self, column: Option<&str>) -> Option<&'a str> {
        let column = column?;
        let found = self
            .result
            .columns
            .iter()
            .find(|c| c.as_str() == column)
            .map(String::as_str);
        if found.is_none() {
            tracing::warn!("Ignoring axis override '{}': not a result column", column);
        }
        found
    }

    fn first_matching(&self, predicate: impl Fn(&RawValue) -> bool) -> Option<&'a str> {
        let result: &'a QueryResult = self.result;
        let row = result.first_row()?;
        result
            .columns
            .iter()
            .find(|column| row.get(column.as_str()).map_or(false, &predicate))
            .map(String::as_str)
    }
}
