use std::fmt;

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One record of untyped input, keyed by field name in source column order
pub type RawRecord = IndexMap<String, RawValue>;

/// A single untyped field value as read from a source or a query result
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    Date(NaiveDateTime),
}

/// Runtime type tag of a raw value, used for shape signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    String,
    Number,
    Boolean,
    Null,
    Date,
}

impl RawValue {
    /// Get the runtime type tag of this value
    pub fn value_type(&self) -> ValueType {
        match self {
            RawValue::String(_) => ValueType::String,
            RawValue::Number(_) => ValueType::Number,
            RawValue::Boolean(_) => ValueType::Boolean,
            RawValue::Null => ValueType::Null,
            RawValue::Date(_) => ValueType::Date,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the value: native numbers, or strings that parse fully
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => Some(*n),
            RawValue::String(s) => parse_number(s),
            _ => None,
        }
    }
}

/// Parse a string that must be a number in its entirety.
///
/// Surrounding whitespace is ignored. Accepts decimal and exponent forms,
/// unsigned `0x`/`0o`/`0b` integers and `Infinity` with an optional sign.
/// Anything else, including `NaN` and partial parses like `12abc`, is rejected.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(value) = parse_radix_integer(trimmed) {
        return value;
    }

    let unsigned = trimmed.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(trimmed);
    if unsigned == "Infinity" {
        return Some(if trimmed.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    // f64::from_str also takes "inf" and "nan", which are not numbers here
    if !unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }

    trimmed.parse::<f64>().ok()
}

/// Returns `Some(result)` when the text carries a radix prefix
fn parse_radix_integer(text: &str) -> Option<Option<f64>> {
    let radix = match text.get(..2) {
        Some("0x") | Some("0X") => 16,
        Some("0o") | Some("0O") => 8,
        Some("0b") | Some("0B") => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() {
        return Some(None);
    }
    Some(u64::from_str_radix(digits, radix).ok().map(|v| v as f64))
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::String(s) => f.write_str(s),
            RawValue::Number(n) => format_number(*n, f),
            RawValue::Boolean(b) => write!(f, "{}", b),
            RawValue::Null => f.write_str("null"),
            RawValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

fn format_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        write!(f, "{:.0}", n)
    } else {
        write!(f, "{}", n)
    }
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Boolean(b),
            Value::Number(n) => n
                .as_f64()
                .map(RawValue::Number)
                .unwrap_or_else(|| RawValue::String(n.to_string())),
            Value::String(s) => RawValue::String(s),
            // Nested structures have no raw shape of their own
            nested @ (Value::Array(_) | Value::Object(_)) => RawValue::String(nested.to_string()),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::String(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::String(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Number(value as f64)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Boolean(value)
    }
}

impl From<NaiveDateTime> for RawValue {
    fn from(value: NaiveDateTime) -> Self {
        RawValue::Date(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawValue::Null)
    }
}

impl Serialize for RawValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RawValue::String(s) => serializer.serialize_str(s),
            RawValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            RawValue::Boolean(b) => serializer.serialize_bool(*b),
            RawValue::Null => serializer.serialize_none(),
            RawValue::Date(_) => serializer.collect_str(self),
        }
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(RawValue::from)
    }
}
