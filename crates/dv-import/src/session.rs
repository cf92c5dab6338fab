//! Transient state of one import attempt

use dv_core::{SourceKind, TableDefinition};
use dv_data::{InferenceRequest, SourceFile};

use crate::step::ImportStep;

/// Everything the wizard knows about the dataset being imported.
///
/// Created when the wizard opens and discarded when it closes or a submission
/// succeeds.
#[derive(Debug, Clone)]
pub struct ImportSession {
    pub source_kind: Option<SourceKind>,
    pub file: Option<SourceFile>,
    pub display_name: String,
    pub header_present: bool,
    pub manual_column_names: Vec<String>,
    pub tables: Vec<TableDefinition>,
    pub current_step: ImportStep,
    pub last_error: Option<String>,
    pub is_busy: bool,
}

impl Default for ImportSession {
    fn default() -> Self {
        Self {
            source_kind: None,
            file: None,
            display_name: String::new(),
            header_present: true,
            manual_column_names: Vec::new(),
            tables: Vec::new(),
            current_step: ImportStep::Name,
            last_error: None,
            is_busy: false,
        }
    }
}

impl ImportSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inference inputs for the current file, if one is chosen
    pub fn inference_request(&self) -> Option<InferenceRequest> {
        Some(InferenceRequest {
            file: self.file.clone()?,
            source_kind: self.source_kind?,
            header_present: self.header_present,
            manual_column_names: self.manual_column_names.clone(),
        })
    }

    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|t| t.columns.len()).sum()
    }
}

/// Split a comma separated list of column names, trimming each
pub fn parse_column_names(text: &str) -> Vec<String> {
    text.split(',').map(|name| name.trim().to_string()).collect()
}
