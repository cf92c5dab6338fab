//! Data handling for the import pipeline: schema inference, source adapters,
//! import configuration and the submission payload

pub mod config;
pub mod payload;
pub mod schema;
pub mod sources;

use thiserror::Error;
use tokio::task::JoinError;

// Re-exports
pub use config::ImportConfig;
pub use payload::{build_payload, StorageColumn, StorageTable, StorageType, SubmissionPayload};
pub use schema::{detect_column_types, infer_value_type, table_from_sample};
pub use sources::{infer_tables, infer_tables_blocking, FileId, InferenceKey, InferenceRequest, SourceFile};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File is not valid UTF-8 text: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("CSV file contains no data rows")]
    EmptyCsv,

    #[error("Column names are required when the CSV file has no header row")]
    MissingColumnNames,

    #[error("JSON document must be an array or an object, found {0}")]
    UnsupportedDocument(&'static str),

    #[error("No table definition to submit")]
    NoTables,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Join error: {0}")]
    Join(#[from] JoinError),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => {
                DataError::Io(std::io::Error::new(io_err.kind(), error.to_string()))
            }
            _ => DataError::Csv(error.to_string()),
        }
    }
}
