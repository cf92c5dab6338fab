//! Conversion service that prints payloads instead of uploading them

use async_trait::async_trait;
use dv_data::payload::{CsvToSqliteOptions, JsonToSqliteOptions};
use dv_data::SourceFile;
use dv_import::{ClearTempResponse, ConversionService, ImportError, UploadResponse};

/// Prints each submission's `options` form field to stdout
pub struct DryRunService;

impl DryRunService {
    fn print(&self, endpoint: &str, file: &SourceFile, name: &str, options: Option<String>) -> UploadResponse {
        println!("POST {} file={} ({} bytes) name={}", endpoint, file.name(), file.len(), name);
        if let Some(options) = options {
            println!("options={}", options);
        }
        UploadResponse {
            message: Some(format!("dry run: '{}' not uploaded", name)),
            ..Default::default()
        }
    }
}

fn to_json<T: serde::Serialize>(options: &T) -> Result<String, ImportError> {
    serde_json::to_string_pretty(options).map_err(|err| ImportError::Service(err.to_string()))
}

#[async_trait]
impl ConversionService for DryRunService {
    async fn csv_to_sqlite(
        &self,
        file: &SourceFile,
        name: &str,
        options: &CsvToSqliteOptions,
    ) -> Result<UploadResponse, ImportError> {
        Ok(self.print("/files/csv-to-sqlite", file, name, Some(to_json(options)?)))
    }

    async fn json_to_sqlite(
        &self,
        file: &SourceFile,
        name: &str,
        options: &JsonToSqliteOptions,
    ) -> Result<UploadResponse, ImportError> {
        Ok(self.print("/files/json-to-sqlite", file, name, Some(to_json(options)?)))
    }

    async fn upload_sqlite(&self, file: &SourceFile, name: &str) -> Result<UploadResponse, ImportError> {
        Ok(self.print("/files/upload-sqlite", file, name, None))
    }

    async fn clear_temp_files(&self) -> Result<ClearTempResponse, ImportError> {
        Ok(ClearTempResponse {
            success: true,
            message: "nothing to clear in dry run".to_string(),
            count: Some(0),
        })
    }
}
