//! Collaborators of the import wizard: the conversion service and the
//! caller's authentication state

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dv_data::payload::{CsvToSqliteOptions, JsonToSqliteOptions};
use dv_data::{SourceFile, SubmissionPayload};
use serde::{Deserialize, Serialize};

use crate::ImportError;

/// A dataset record created by the conversion service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: String,
    pub name: String,
    pub file_key: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub file_type: String,
    pub file_size: u64,
}

/// Response of every upload endpoint. A response with `error` set is a failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<Dataset>,
}

/// Outcome of clearing the service's temporary files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClearTempResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

/// Service that turns uploaded files into SQLite datasets
#[async_trait]
pub trait ConversionService: Send + Sync {
    async fn csv_to_sqlite(
        &self,
        file: &SourceFile,
        name: &str,
        options: &CsvToSqliteOptions,
    ) -> Result<UploadResponse, ImportError>;

    async fn json_to_sqlite(
        &self,
        file: &SourceFile,
        name: &str,
        options: &JsonToSqliteOptions,
    ) -> Result<UploadResponse, ImportError>;

    async fn upload_sqlite(&self, file: &SourceFile, name: &str) -> Result<UploadResponse, ImportError>;

    async fn clear_temp_files(&self) -> Result<ClearTempResponse, ImportError>;
}

/// Answers whether the current caller is signed in
pub trait AuthProvider: Send + Sync {
    fn is_signed_in(&self) -> bool;
}

impl AuthProvider for bool {
    fn is_signed_in(&self) -> bool {
        *self
    }
}

/// Send a payload to the endpoint for its source kind
pub async fn submit_payload(
    service: &dyn ConversionService,
    payload: &SubmissionPayload,
) -> Result<UploadResponse, ImportError> {
    tracing::info!(
        "Submitting '{}' ({}, {} bytes) for conversion",
        payload.name(),
        payload.source_kind(),
        payload.file().len()
    );

    let response = match payload {
        SubmissionPayload::Csv {
            file,
            name,
            options,
        } => service.csv_to_sqlite(file, name, options).await?,
        SubmissionPayload::Json {
            file,
            name,
            options,
        } => service.json_to_sqlite(file, name, options).await?,
        SubmissionPayload::Sqlite { file, name } => service.upload_sqlite(file, name).await?,
    };

    match response.error {
        Some(error) => Err(ImportError::Rejected(error)),
        None => Ok(response),
    }
}
