//! Source adapters feeding the type inference engine

pub mod csv_source;
pub mod json_source;
pub mod sqlite_source;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use dv_core::{SourceKind, TableDefinition};
use uuid::Uuid;

use crate::config::ImportConfig;
use crate::DataError;

/// Identity of an uploaded file, fixed when the file is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(Uuid);

impl FileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An uploaded file held in memory
#[derive(Clone)]
pub struct SourceFile {
    id: FileId,
    name: String,
    bytes: Arc<[u8]>,
}

impl SourceFile {
    /// Create a file from its name and contents
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let bytes: Vec<u8> = bytes.into();
        Self {
            id: FileId::new(),
            name: name.into(),
            bytes: Arc::from(bytes),
        }
    }

    /// Read a file from disk
    pub async fn from_path(path: &Path) -> Result<Self, DataError> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        Ok(Self::new(name, bytes))
    }

    pub fn id(&self) -> FileId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decode the contents as UTF-8 text, dropping a leading byte order mark
    pub fn text(&self) -> Result<&str, DataError> {
        let text = std::str::from_utf8(&self.bytes)?;
        Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
    }
}

impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceFile")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Inputs that determine the inferred schema of an upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceKey {
    pub file: FileId,
    pub source_kind: SourceKind,
    pub header_present: bool,
    pub manual_column_names: Vec<String>,
}

/// Everything needed to infer the tables of an uploaded file
#[derive(Debug, Clone)]
pub struct InferenceRequest {
    pub file: SourceFile,
    pub source_kind: SourceKind,
    pub header_present: bool,
    pub manual_column_names: Vec<String>,
}

impl InferenceRequest {
    pub fn key(&self) -> InferenceKey {
        InferenceKey {
            file: self.file.id(),
            source_kind: self.source_kind,
            header_present: self.header_present,
            manual_column_names: self.manual_column_names.clone(),
        }
    }
}

/// Infer the table definitions of an uploaded file
pub fn infer_tables(
    request: &InferenceRequest,
    config: &ImportConfig,
) -> Result<Vec<TableDefinition>, DataError> {
    tracing::info!(
        "Inferring schema of '{}' as {} ({} bytes)",
        request.file.name(),
        request.source_kind,
        request.file.len()
    );

    let tables = match request.source_kind {
        SourceKind::Csv => {
            let table = csv_source::infer_csv(
                request.file.text()?,
                request.header_present,
                &request.manual_column_names,
                &config.csv_table_name,
            )?;
            vec![table]
        }
        SourceKind::Json => json_source::infer_json(request.file.text()?, &config.json_table_name)?,
        SourceKind::Sqlite => sqlite_source::stand_in_schema(config),
    };

    tracing::info!("Inferred {} table(s) from '{}'", tables.len(), request.file.name());
    Ok(tables)
}

/// Run inference on the blocking pool
pub async fn infer_tables_blocking(
    request: InferenceRequest,
    config: ImportConfig,
) -> Result<Vec<TableDefinition>, DataError> {
    tokio::task::spawn_blocking(move || infer_tables(&request, &config)).await?
}
