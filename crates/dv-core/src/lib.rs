//! Core functionality for the data visualization platform
//!
//! This crate provides the shared data model used by schema inference,
//! visualization selection and the import wizard, plus the event bus the
//! wizard reports progress on.

pub mod events;
pub mod model;

use thiserror::Error;

// Re-export commonly used types
pub use events::{Event, EventBus};
pub use model::{
    parse_number, ColumnDefinition, QueryResult, RawRecord, RawValue, SemanticType,
    SourceKind, TableDefinition, ValueType, VisualizationKind,
};

/// Errors raised when model invariants are violated
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Row {row} does not match the result columns (expected {expected:?}, found {found:?})")]
    RowShape {
        row: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Unknown {kind}: {value}")]
    UnknownVariant {
        kind: &'static str,
        value: String,
    },
}
