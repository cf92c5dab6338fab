//! Field key normalization for result rows keyed in camel case

use dv_core::{RawRecord, RawValue};

/// Convert `snake_case` segments to a camel-style key (`total_sales` →
/// `totalSales`).
///
/// Only an underscore followed by a lowercase ASCII letter is folded; other
/// underscores are kept as they are.
pub fn normalize_field_key(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, chars.peek().copied()) {
            ('_', Some(next)) if next.is_ascii_lowercase() => {
                out.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

/// Look up a column through its normalized key, then its literal name
pub fn lookup_normalized<'a>(row: &'a RawRecord, column: &str) -> Option<&'a RawValue> {
    row.get(normalize_field_key(column).as_str())
        .or_else(|| row.get(column))
}
