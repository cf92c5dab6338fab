//! Import wizard configuration

use std::path::Path;
use std::time::Duration;

use dv_core::{ColumnDefinition, SemanticType, TableDefinition};
use serde::{Deserialize, Serialize};

use crate::DataError;

/// Configuration for the import wizard and the source adapters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Minimum number of characters in the dataset name
    pub min_name_len: usize,

    /// Delay between a successful submission and the wizard closing
    pub close_delay_ms: u64,

    /// Table name given to CSV uploads
    pub csv_table_name: String,

    /// Table name given to JSON documents whose root is an array
    pub json_table_name: String,

    /// Schema shown for SQLite uploads, which are not introspected
    pub sqlite_stand_in: TableDefinition,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            min_name_len: 3,
            close_delay_ms: 1500,
            csv_table_name: "csv_data".to_string(),
            json_table_name: "json_data".to_string(),
            sqlite_stand_in: TableDefinition::new(
                "sqlite_table",
                vec![
                    ColumnDefinition::new("id", SemanticType::Number),
                    ColumnDefinition::new("name", SemanticType::String),
                    ColumnDefinition::new("is_active", SemanticType::Boolean),
                ],
            ),
        }
    }
}

impl ImportConfig {
    /// Parse a configuration from JSON; missing fields keep their defaults
    pub fn from_json_str(text: &str) -> Result<Self, DataError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub async fn load(path: &Path) -> Result<Self, DataError> {
        let text = tokio::fs::read_to_string(path).await?;
        tracing::info!("Loaded import configuration from {}", path.display());
        Self::from_json_str(&text)
    }

    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }

    fn validate(&self) -> Result<(), DataError> {
        if self.csv_table_name.trim().is_empty() {
            return Err(DataError::Config("csv_table_name must not be empty".into()));
        }
        if self.json_table_name.trim().is_empty() {
            return Err(DataError::Config("json_table_name must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ImportConfig::default();
        assert_eq!(config.min_name_len, 3);
        assert_eq!(config.close_delay(), Duration::from_millis(1500));
        assert_eq!(config.sqlite_stand_in.columns.len(), 3);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ImportConfig::from_json_str(r#"{"close_delay_ms": 0}"#).unwrap();
        assert_eq!(config.close_delay(), Duration::ZERO);
        assert_eq!(config.csv_table_name, "csv_data");
    }

    #[test]
    fn test_blank_table_name_rejected() {
        let result = ImportConfig::from_json_str(r#"{"csv_table_name": " "}"#);
        assert!(matches!(result, Err(DataError::Config(_))));
    }
}
