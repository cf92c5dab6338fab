//! Submission payloads consumed by the SQLite conversion service

use dv_core::{ColumnDefinition, SemanticType, SourceKind, TableDefinition};
use serde::{Deserialize, Serialize};

use crate::sources::SourceFile;
use crate::DataError;

/// Storage class of a column in the generated SQLite file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StorageType {
    Text,
    Integer,
    Real,
    Blob,
    Null,
}

impl From<SemanticType> for StorageType {
    fn from(semantic_type: SemanticType) -> Self {
        match semantic_type {
            SemanticType::String => StorageType::Text,
            SemanticType::Number => StorageType::Integer,
            SemanticType::Boolean => StorageType::Integer,
            SemanticType::Date => StorageType::Text,
        }
    }
}

/// Column as sent to the conversion service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageColumn {
    pub name: String,

    #[serde(rename = "type")]
    pub storage_type: StorageType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_null: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
}

impl From<&ColumnDefinition> for StorageColumn {
    fn from(column: &ColumnDefinition) -> Self {
        Self {
            name: column.name.clone(),
            storage_type: column.semantic_type.into(),
            primary_key: column.name.eq_ignore_ascii_case("id").then_some(true),
            not_null: None,
            unique: None,
            default_value: None,
        }
    }
}

/// Table as sent to the conversion service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageTable {
    pub name: String,
    pub columns: Vec<StorageColumn>,
}

impl From<&TableDefinition> for StorageTable {
    fn from(table: &TableDefinition) -> Self {
        Self {
            name: table.name.clone(),
            columns: table.columns.iter().map(StorageColumn::from).collect(),
        }
    }
}

/// Options for converting a CSV upload (single table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvToSqliteOptions {
    pub table_name: String,
    pub columns: Vec<StorageColumn>,
}

/// Options for converting a JSON upload (one entry per table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonToSqliteOptions {
    pub tables: Vec<StorageTable>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infer_types: Option<bool>,
}

/// A submission ready for the conversion service, shaped per source kind
#[derive(Debug, Clone)]
pub enum SubmissionPayload {
    Csv {
        file: SourceFile,
        name: String,
        options: CsvToSqliteOptions,
    },
    Json {
        file: SourceFile,
        name: String,
        options: JsonToSqliteOptions,
    },
    Sqlite {
        file: SourceFile,
        name: String,
    },
}

impl SubmissionPayload {
    pub fn source_kind(&self) -> SourceKind {
        match self {
            SubmissionPayload::Csv { .. } => SourceKind::Csv,
            SubmissionPayload::Json { .. } => SourceKind::Json,
            SubmissionPayload::Sqlite { .. } => SourceKind::Sqlite,
        }
    }

    pub fn file(&self) -> &SourceFile {
        match self {
            SubmissionPayload::Csv { file, .. }
            | SubmissionPayload::Json { file, .. }
            | SubmissionPayload::Sqlite { file, .. } => file,
        }
    }

    /// Display name of the dataset
    pub fn name(&self) -> &str {
        match self {
            SubmissionPayload::Csv { name, .. }
            | SubmissionPayload::Json { name, .. }
            | SubmissionPayload::Sqlite { name, .. } => name,
        }
    }

    /// The serialized `options` form field, if this kind carries one
    pub fn options_json(&self) -> Result<Option<String>, DataError> {
        Ok(match self {
            SubmissionPayload::Csv { options, .. } => Some(serde_json::to_string(options)?),
            SubmissionPayload::Json { options, .. } => Some(serde_json::to_string(options)?),
            SubmissionPayload::Sqlite { .. } => None,
        })
    }
}

/// Build the payload for the given source kind from the reviewed tables
pub fn build_payload(
    source_kind: SourceKind,
    file: SourceFile,
    display_name: &str,
    tables: &[TableDefinition],
) -> Result<SubmissionPayload, DataError> {
    let name = display_name.to_string();

    let payload = match source_kind {
        SourceKind::Csv => {
            let table = tables.first().ok_or(DataError::NoTables)?;
            SubmissionPayload::Csv {
                file,
                name,
                options: CsvToSqliteOptions {
                    table_name: table.name.clone(),
                    columns: table.columns.iter().map(StorageColumn::from).collect(),
                },
            }
        }
        SourceKind::Json => SubmissionPayload::Json {
            file,
            name,
            options: JsonToSqliteOptions {
                tables: tables.iter().map(StorageTable::from).collect(),
                infer_types: None,
            },
        },
        SourceKind::Sqlite => SubmissionPayload::Sqlite { file, name },
    };

    tracing::debug!(
        "Built {} payload for '{}' from {} table(s)",
        source_kind,
        display_name,
        tables.len()
    );
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn users() -> TableDefinition {
        TableDefinition::new(
            "users",
            vec![
                ColumnDefinition::new("ID", SemanticType::Number),
                ColumnDefinition::new("name", SemanticType::String),
                ColumnDefinition::new("active", SemanticType::Boolean),
                ColumnDefinition::new("joined", SemanticType::Date),
            ],
        )
    }

    #[test]
    fn test_storage_type_mapping() {
        assert_eq!(StorageType::from(SemanticType::String), StorageType::Text);
        assert_eq!(StorageType::from(SemanticType::Number), StorageType::Integer);
        assert_eq!(StorageType::from(SemanticType::Boolean), StorageType::Integer);
        assert_eq!(StorageType::from(SemanticType::Date), StorageType::Text);
    }

    #[test]
    fn test_csv_options_wire_format() {
        let file = SourceFile::new("people.csv", b"ID,name\n1,Al".to_vec());
        let payload = build_payload(SourceKind::Csv, file, "People", &[users()]).unwrap();
        let options: serde_json::Value =
            serde_json::from_str(&payload.options_json().unwrap().unwrap()).unwrap();
        assert_eq!(
            options,
            json!({
                "tableName": "users",
                "columns": [
                    {"name": "ID", "type": "INTEGER", "primaryKey": true},
                    {"name": "name", "type": "TEXT"},
                    {"name": "active", "type": "INTEGER"},
                    {"name": "joined", "type": "TEXT"}
                ]
            })
        );
        assert_eq!(payload.name(), "People");
    }

    #[test]
    fn test_json_options_carry_every_table() {
        let file = SourceFile::new("db.json", b"{}".to_vec());
        let tables = vec![users(), TableDefinition::empty("orders")];
        let payload = build_payload(SourceKind::Json, file, "Shop", &tables).unwrap();
        match payload {
            SubmissionPayload::Json { options, .. } => {
                assert_eq!(options.tables.len(), 2);
                assert!(options.tables[1].columns.is_empty());
            }
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[test]
    fn test_sqlite_passes_file_through() {
        let file = SourceFile::new("app.db", vec![0u8, 1, 2]);
        let payload = build_payload(SourceKind::Sqlite, file, "App", &[]).unwrap();
        assert_eq!(payload.source_kind(), SourceKind::Sqlite);
        assert_eq!(payload.file().bytes(), &[0u8, 1, 2]);
        assert!(payload.options_json().unwrap().is_none());
    }

    #[test]
    fn test_csv_without_tables_is_rejected() {
        let file = SourceFile::new("x.csv", b"a\n1".to_vec());
        let result = build_payload(SourceKind::Csv, file, "X", &[]);
        assert!(matches!(result, Err(DataError::NoTables)));
    }
}
