//! CSV adapter
//!
//! Fields are split on commas only. Quotes are ordinary characters, so a
//! quoted field containing a comma spills into the next column.

use csv::{ReaderBuilder, StringRecord};
use dv_core::{ColumnDefinition, RawValue, TableDefinition};

use crate::schema::infer_value_type;
use crate::DataError;

/// Column names and the first data row of a CSV document
#[derive(Debug, Clone, PartialEq)]
pub struct CsvSample {
    pub names: Vec<String>,
    /// One value per name. Short rows leave trailing columns null; surplus
    /// fields are dropped.
    pub values: Vec<RawValue>,
}

/// Infer the single table of a CSV document from its first data row.
///
/// Columns are positional: a repeated header name still produces its own
/// column.
pub fn infer_csv(
    text: &str,
    header_present: bool,
    manual_column_names: &[String],
    table_name: &str,
) -> Result<TableDefinition, DataError> {
    let sample = sample_row(text, header_present, manual_column_names)?;
    let columns = sample
        .names
        .into_iter()
        .zip(&sample.values)
        .map(|(name, value)| ColumnDefinition::new(name, infer_value_type(value)))
        .collect();

    let table = TableDefinition::new(table_name, columns);
    tracing::debug!("Inferred {} CSV columns for '{}'", table.columns.len(), table.name);
    Ok(table)
}

/// Split off the column names and the first non-blank data row.
///
/// With `header_present` the header is the first physical line, even when it
/// is blank. Blank lines are skipped only among the data rows.
pub fn sample_row(
    text: &str,
    header_present: bool,
    manual_column_names: &[String],
) -> Result<CsvSample, DataError> {
    let (names, body): (Vec<String>, &str) = if header_present {
        if text.is_empty() {
            return Err(DataError::EmptyCsv);
        }
        let (header, body) = text.split_once('\n').unwrap_or((text, ""));
        let names = header.split(',').map(|name| name.trim().to_string()).collect();
        (names, body)
    } else {
        if manual_column_names.iter().all(|name| name.trim().is_empty()) {
            return Err(DataError::MissingColumnNames);
        }
        let names = manual_column_names
            .iter()
            .map(|name| name.trim().to_string())
            .collect();
        (names, text)
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut first_row = None;
    for record in reader.records() {
        let record = record?;
        if !is_blank(&record) {
            first_row = Some(record);
            break;
        }
    }
    let first_row = first_row.ok_or(DataError::EmptyCsv)?;

    tracing::debug!(
        "CSV sample has {} fields for {} columns",
        first_row.len(),
        names.len()
    );

    let values = (0..names.len())
        .map(|idx| first_row.get(idx).map(RawValue::from).unwrap_or(RawValue::Null))
        .collect();
    Ok(CsvSample { names, values })
}

fn is_blank(record: &StringRecord) -> bool {
    record.len() <= 1 && record.get(0).map_or(true, |field| field.trim().is_empty())
}
