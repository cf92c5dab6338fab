//! Value coercion shared by chart specs

use dv_core::RawValue;

/// Numeric value for plotting. Values that do not parse plot as 0.
pub(crate) fn coerce_number(value: Option<&RawValue>) -> f64 {
    value
        .and_then(RawValue::as_number)
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Text label for plotting; missing values render empty
pub(crate) fn label_text(value: Option<&RawValue>) -> String {
    match value {
        Some(RawValue::Null) | None => String::new(),
        Some(value) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(Some(&RawValue::Number(2.5))), 2.5);
        assert_eq!(coerce_number(Some(&RawValue::String("40".into()))), 40.0);
        assert_eq!(coerce_number(Some(&RawValue::String("n/a".into()))), 0.0);
        assert_eq!(coerce_number(Some(&RawValue::Boolean(true))), 0.0);
        assert_eq!(coerce_number(None), 0.0);
    }

    #[test]
    fn test_label_text() {
        assert_eq!(label_text(Some(&RawValue::Number(3.0))), "3");
        assert_eq!(label_text(Some(&RawValue::Null)), "");
        assert_eq!(label_text(None), "");
    }
}
