//! Shared data model

mod query;
mod schema;
mod value;

pub use query::{QueryResult, VisualizationKind};
pub use schema::{ColumnDefinition, SemanticType, SourceKind, TableDefinition};
pub use value::{parse_number, RawRecord, RawValue, ValueType};
