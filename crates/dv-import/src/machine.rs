//! Import wizard state machine
//!
//! [`ImportMachine::handle`] applies one [`WizardEvent`] to the session and
//! returns the side effects the caller must run. Nothing here performs I/O.
//! Async work is started through [`Effect`]s and reported back as events
//! carrying the [`Generation`] captured at dispatch, so results from a closed
//! or reopened session are dropped.

use std::time::Duration;

use dv_core::{ColumnDefinition, SemanticType, SourceKind, TableDefinition};
use dv_data::sources::sqlite_source;
use dv_data::{
    build_payload, DataError, ImportConfig, InferenceKey, InferenceRequest, SourceFile,
    SubmissionPayload,
};

use crate::service::UploadResponse;
use crate::session::ImportSession;
use crate::step::{ImportStep, ValidationError};
use crate::ImportError;

/// Session generation, bumped whenever the wizard opens or closes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    fn bump(&mut self) {
        self.0 += 1;
    }
}

/// Result of a submission as reported by the driver
pub type SubmissionOutcome = Result<UploadResponse, ImportError>;

/// Inputs to the wizard
#[derive(Debug)]
pub enum WizardEvent {
    Open,
    Close,
    SetName(String),
    SelectSourceKind(SourceKind),
    SelectFile(SourceFile),
    SetHeaderPresent(bool),
    SetManualColumnNames(Vec<String>),
    RenameColumn {
        table: usize,
        column: usize,
        name: String,
    },
    RetypeColumn {
        table: usize,
        column: usize,
        semantic_type: SemanticType,
    },
    Next,
    Back,
    Submit {
        signed_in: bool,
    },
    InferenceFinished {
        token: Generation,
        key: InferenceKey,
        result: Result<Vec<TableDefinition>, DataError>,
    },
    SubmissionFinished {
        token: Generation,
        outcome: SubmissionOutcome,
    },
    CloseTimerFired {
        token: Generation,
    },
}

/// Side effects requested by a transition
#[derive(Debug)]
pub enum Effect {
    StartInference {
        token: Generation,
        request: InferenceRequest,
    },
    StartSubmission {
        token: Generation,
        payload: SubmissionPayload,
    },
    /// Best effort; failures are only logged
    ClearTempFiles,
    ScheduleClose {
        token: Generation,
        delay: Duration,
    },
}

/// The wizard's state and transition function
#[derive(Debug)]
pub struct ImportMachine {
    config: ImportConfig,
    session: ImportSession,
    generation: Generation,
    is_open: bool,
    /// Inputs of the schema currently held in (or being computed for) the session
    inferred_key: Option<InferenceKey>,
}

impl ImportMachine {
    pub fn new(config: ImportConfig) -> Self {
        Self {
            config,
            session: ImportSession::new(),
            generation: Generation::default(),
            is_open: false,
            inferred_key: None,
        }
    }

    pub fn session(&self) -> &ImportSession {
        &self.session
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Whether an inference result for `key` dispatched under `token` would be applied
    pub fn expects_inference(&self, token: Generation, key: &InferenceKey) -> bool {
        token == self.generation && self.session.is_busy && self.inferred_key.as_ref() == Some(key)
    }

    /// Apply an event.
    ///
    /// User-facing failures are recorded as the session's last error and also
    /// returned. Busy rejections leave the session untouched.
    pub fn handle(&mut self, event: WizardEvent) -> Result<Vec<Effect>, ImportError> {
        match event {
            WizardEvent::Open => {
                self.reset();
                self.is_open = true;
                tracing::debug!("Import wizard opened ({:?})", self.generation);
                Ok(Vec::new())
            }
            WizardEvent::Close => {
                if self.session.is_busy {
                    tracing::debug!("Closing wizard with an operation in flight; its result will be dropped");
                }
                self.reset();
                self.is_open = false;
                Ok(Vec::new())
            }
            WizardEvent::InferenceFinished { token, key, result } => {
                Ok(self.finish_inference(token, key, result))
            }
            WizardEvent::SubmissionFinished { token, outcome } => {
                Ok(self.finish_submission(token, outcome))
            }
            WizardEvent::CloseTimerFired { token } => {
                if self.is_current(token, "close timer") {
                    self.reset();
                    self.is_open = false;
                    tracing::info!("Import finished, wizard closed");
                }
                Ok(Vec::new())
            }
            _ if !self.is_open => {
                tracing::debug!("Ignoring {:?} while the wizard is closed", event);
                Ok(Vec::new())
            }
            _ if self.session.is_busy => Err(ImportError::Busy),
            user_event => self.handle_user_event(user_event),
        }
    }

    fn handle_user_event(&mut self, event: WizardEvent) -> Result<Vec<Effect>, ImportError> {
        match event {
            WizardEvent::SetName(name) => self.session.display_name = name,
            WizardEvent::SelectSourceKind(kind) => self.session.source_kind = Some(kind),
            WizardEvent::SelectFile(file) => {
                tracing::debug!("Selected file {:?}", file);
                self.session.file = Some(file);
            }
            WizardEvent::SetHeaderPresent(present) => self.session.header_present = present,
            WizardEvent::SetManualColumnNames(names) => self.session.manual_column_names = names,
            WizardEvent::RenameColumn {
                table,
                column,
                name,
            } => {
                if let Some(definition) = self.column_mut(table, column) {
                    definition.name = name;
                }
            }
            WizardEvent::RetypeColumn {
                table,
                column,
                semantic_type,
            } => {
                if let Some(definition) = self.column_mut(table, column) {
                    definition.semantic_type = semantic_type;
                }
            }
            WizardEvent::Next => return self.next(),
            WizardEvent::Back => {
                self.back();
            }
            WizardEvent::Submit { signed_in } => return self.submit(signed_in),
            other => tracing::warn!("Unexpected wizard event {:?}", other),
        }
        Ok(Vec::new())
    }

    fn next(&mut self) -> Result<Vec<Effect>, ImportError> {
        let step = self.session.current_step;
        let Some(target) = step.next() else {
            tracing::debug!("Next has no effect on the {} step", step);
            return Ok(Vec::new());
        };

        if let Err(err) = self.validate(step) {
            return Err(self.fail(err.into()));
        }

        if step == ImportStep::Upload && self.session.source_kind != Some(SourceKind::Csv) {
            self.session.header_present = false;
        }

        self.session.last_error = None;
        self.session.current_step = target;

        if target == ImportStep::Configure {
            return Ok(self.enter_configure());
        }
        Ok(Vec::new())
    }

    fn validate(&self, step: ImportStep) -> Result<(), ValidationError> {
        match step {
            ImportStep::Name if self.session.display_name.chars().count() < self.config.min_name_len => {
                Err(ValidationError::NameTooShort {
                    min: self.config.min_name_len,
                })
            }
            ImportStep::Type if self.session.source_kind.is_none() => {
                Err(ValidationError::MissingSourceKind)
            }
            ImportStep::Upload if self.session.file.is_none() => Err(ValidationError::MissingFile),
            _ => Ok(()),
        }
    }

    fn enter_configure(&mut self) -> Vec<Effect> {
        let Some(request) = self.session.inference_request() else {
            return Vec::new();
        };
        let key = request.key();

        let already_inferred = self.inferred_key.as_ref() == Some(&key);

        if request.source_kind == SourceKind::Sqlite {
            if !already_inferred {
                self.session.tables = sqlite_source::stand_in_schema(&self.config);
                self.inferred_key = Some(key);
            }
            self.session.current_step = ImportStep::Review;
            return Vec::new();
        }

        if already_inferred {
            tracing::debug!("Schema for '{}' is already inferred", request.file.name());
            return Vec::new();
        }

        self.inferred_key = Some(key);
        self.session.is_busy = true;
        vec![Effect::StartInference {
            token: self.generation,
            request,
        }]
    }

    fn back(&mut self) {
        if let Some(previous) = self.session.current_step.previous() {
            self.session.current_step = previous;
        }
        self.session.last_error = None;
    }

    fn submit(&mut self, signed_in: bool) -> Result<Vec<Effect>, ImportError> {
        if !matches!(
            self.session.current_step,
            ImportStep::Review | ImportStep::Processing
        ) {
            tracing::debug!("Submit has no effect on the {} step", self.session.current_step);
            return Ok(Vec::new());
        }

        let Some(file) = self.session.file.clone() else {
            return Err(self.fail(ValidationError::MissingFile.into()));
        };
        let Some(source_kind) = self.session.source_kind else {
            return Err(self.fail(ValidationError::MissingSourceKind.into()));
        };
        if !signed_in {
            return Err(self.fail(ImportError::Unauthorized));
        }

        let payload = match build_payload(
            source_kind,
            file,
            &self.session.display_name,
            &self.session.tables,
        ) {
            Ok(payload) => payload,
            Err(err) => return Err(self.fail(err.into())),
        };

        self.session.last_error = None;
        self.session.current_step = ImportStep::Processing;
        self.session.is_busy = true;
        Ok(vec![Effect::StartSubmission {
            token: self.generation,
            payload,
        }])
    }

    fn finish_inference(
        &mut self,
        token: Generation,
        key: InferenceKey,
        result: Result<Vec<TableDefinition>, DataError>,
    ) -> Vec<Effect> {
        if !self.expects_inference(token, &key) {
            tracing::debug!("Dropping inference result for a closed session or superseded inputs");
            return Vec::new();
        }

        self.session.is_busy = false;
        match result {
            Ok(tables) => {
                self.session.tables = tables;
                self.session.last_error = None;
            }
            Err(err) => {
                // Forget the key so the same inputs can be retried.
                self.inferred_key = None;
                self.session.tables.clear();
                self.fail(ImportError::Processing(err));
            }
        }
        Vec::new()
    }

    fn finish_submission(&mut self, token: Generation, outcome: SubmissionOutcome) -> Vec<Effect> {
        if !self.is_current(token, "submission") {
            return Vec::new();
        }

        match outcome {
            Ok(response) => {
                tracing::info!(
                    "Dataset '{}' submitted{}",
                    self.session.display_name,
                    response
                        .key
                        .as_deref()
                        .map(|key| format!(" as {}", key))
                        .unwrap_or_default()
                );
                // Stay busy until the wizard closes.
                vec![
                    Effect::ClearTempFiles,
                    Effect::ScheduleClose {
                        token: self.generation,
                        delay: self.config.close_delay(),
                    },
                ]
            }
            Err(err) => {
                self.session.is_busy = false;
                self.fail(err);
                Vec::new()
            }
        }
    }

    fn column_mut(&mut self, table: usize, column: usize) -> Option<&mut ColumnDefinition> {
        if self.session.current_step != ImportStep::Configure {
            tracing::debug!("Column edits are only accepted on the configure step");
            return None;
        }
        let definition = self
            .session
            .tables
            .get_mut(table)
            .and_then(|t| t.columns.get_mut(column));
        if definition.is_none() {
            tracing::warn!("No column {} in table {}", column, table);
        }
        definition
    }

    fn is_current(&self, token: Generation, what: &str) -> bool {
        let current = token == self.generation;
        if !current {
            tracing::debug!(
                "Dropping stale {} result ({:?}, now {:?})",
                what,
                token,
                self.generation
            );
        }
        current
    }

    fn fail(&mut self, err: ImportError) -> ImportError {
        tracing::warn!("Import step {} failed: {}", self.session.current_step, err);
        self.session.last_error = Some(err.to_string());
        err
    }

    fn reset(&mut self) {
        self.generation.bump();
        self.session = ImportSession::new();
        self.inferred_key = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> ImportMachine {
        let mut machine = ImportMachine::new(ImportConfig::default());
        machine.handle(WizardEvent::Open).unwrap();
        machine
    }

    fn csv_file() -> SourceFile {
        SourceFile::new("people.csv", b"name,age\nAlice,30\nBob,25".to_vec())
    }

    /// Drive a CSV import to the configure step, returning the inference effects
    fn to_configure(machine: &mut ImportMachine) -> Vec<Effect> {
        machine.handle(WizardEvent::SetName("People".into())).unwrap();
        machine.handle(WizardEvent::Next).unwrap();
        machine.handle(WizardEvent::SelectSourceKind(SourceKind::Csv)).unwrap();
        machine.handle(WizardEvent::Next).unwrap();
        machine.handle(WizardEvent::SelectFile(csv_file())).unwrap();
        machine.handle(WizardEvent::Next).unwrap()
    }

    fn inference_of(effects: Vec<Effect>) -> (Generation, InferenceRequest) {
        match effects.as_slice() {
            [Effect::StartInference { token, request }] => (*token, request.clone()),
            other => panic!("expected one inference effect, got {:?}", other),
        }
    }

    fn people() -> Vec<TableDefinition> {
        vec![TableDefinition::new(
            "csv_data",
            vec![
                ColumnDefinition::new("name", SemanticType::String),
                ColumnDefinition::new("age", SemanticType::Number),
            ],
        )]
    }

    #[test]
    fn test_name_gate() {
        let mut machine = machine();
        machine.handle(WizardEvent::SetName("ab".into())).unwrap();
        let err = machine.handle(WizardEvent::Next).unwrap_err();
        assert!(matches!(err, ImportError::Validation(ValidationError::NameTooShort { min: 3 })));
        assert_eq!(machine.session().current_step, ImportStep::Name);
        assert_eq!(
            machine.session().last_error.as_deref(),
            Some("Please fill name with at least 3 characters")
        );

        machine.handle(WizardEvent::SetName("abc".into())).unwrap();
        machine.handle(WizardEvent::Next).unwrap();
        assert_eq!(machine.session().current_step, ImportStep::Type);
        assert_eq!(machine.session().last_error, None);
    }

    #[test]
    fn test_type_and_upload_gates() {
        let mut machine = machine();
        machine.handle(WizardEvent::SetName("Sales".into())).unwrap();
        machine.handle(WizardEvent::Next).unwrap();

        machine.handle(WizardEvent::Next).unwrap_err();
        assert_eq!(
            machine.session().last_error.as_deref(),
            Some("Please select a data source type")
        );

        machine.handle(WizardEvent::SelectSourceKind(SourceKind::Json)).unwrap();
        machine.handle(WizardEvent::Next).unwrap();
        machine.handle(WizardEvent::Next).unwrap_err();
        assert_eq!(
            machine.session().last_error.as_deref(),
            Some("Please select a file to upload")
        );
        assert_eq!(machine.session().current_step, ImportStep::Upload);
    }

    #[test]
    fn test_leaving_upload_clears_header_for_non_csv() {
        let mut machine = machine();
        machine.handle(WizardEvent::SetName("Shop".into())).unwrap();
        machine.handle(WizardEvent::Next).unwrap();
        machine.handle(WizardEvent::SelectSourceKind(SourceKind::Json)).unwrap();
        machine.handle(WizardEvent::Next).unwrap();
        assert!(machine.session().header_present);

        machine
            .handle(WizardEvent::SelectFile(SourceFile::new("shop.json", b"[]".to_vec())))
            .unwrap();
        let (_, request) = inference_of(machine.handle(WizardEvent::Next).unwrap());
        assert!(!machine.session().header_present);
        assert!(!request.header_present);
    }

    #[test]
    fn test_inference_runs_once_per_key() {
        let mut machine = machine();
        let (token, request) = inference_of(to_configure(&mut machine));
        assert!(machine.session().is_busy);

        machine
            .handle(WizardEvent::InferenceFinished {
                token,
                key: request.key(),
                result: Ok(people()),
            })
            .unwrap();
        assert!(!machine.session().is_busy);
        assert_eq!(machine.session().tables, people());

        machine.handle(WizardEvent::Back).unwrap();
        let effects = machine.handle(WizardEvent::Next).unwrap();
        assert!(effects.is_empty());
        assert_eq!(machine.session().tables, people());

        // changing an input changes the key
        machine.handle(WizardEvent::Back).unwrap();
        machine.handle(WizardEvent::SetHeaderPresent(false)).unwrap();
        machine
            .handle(WizardEvent::SetManualColumnNames(vec!["n".into(), "a".into()]))
            .unwrap();
        let (_, rerun) = inference_of(machine.handle(WizardEvent::Next).unwrap());
        assert_eq!(rerun.manual_column_names, vec!["n", "a"]);
    }

    #[test]
    fn test_busy_gates_navigation_and_edits() {
        let mut machine = machine();
        to_configure(&mut machine);

        assert!(matches!(machine.handle(WizardEvent::Next), Err(ImportError::Busy)));
        assert!(matches!(machine.handle(WizardEvent::Back), Err(ImportError::Busy)));
        assert!(matches!(
            machine.handle(WizardEvent::Submit { signed_in: true }),
            Err(ImportError::Busy)
        ));
        assert!(matches!(
            machine.handle(WizardEvent::RenameColumn {
                table: 0,
                column: 0,
                name: "x".into()
            }),
            Err(ImportError::Busy)
        ));
        assert_eq!(machine.session().current_step, ImportStep::Configure);
        assert_eq!(machine.session().last_error, None);
    }

    #[test]
    fn test_inference_failure_allows_retry() {
        let mut machine = machine();
        let (token, request) = inference_of(to_configure(&mut machine));

        machine
            .handle(WizardEvent::InferenceFinished {
                token,
                key: request.key(),
                result: Err(DataError::EmptyCsv),
            })
            .unwrap();
        assert_eq!(
            machine.session().last_error.as_deref(),
            Some("Error processing file: CSV file contains no data rows")
        );
        assert!(machine.session().tables.is_empty());
        assert_eq!(machine.session().current_step, ImportStep::Configure);

        machine.handle(WizardEvent::Back).unwrap();
        assert_eq!(machine.session().last_error, None);
        let effects = machine.handle(WizardEvent::Next).unwrap();
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn test_stale_results_are_dropped_after_reopen() {
        let mut machine = machine();
        let (token, request) = inference_of(to_configure(&mut machine));

        machine.handle(WizardEvent::Close).unwrap();
        machine.handle(WizardEvent::Open).unwrap();
        assert_ne!(machine.generation(), token);

        machine
            .handle(WizardEvent::InferenceFinished {
                token,
                key: request.key(),
                result: Ok(people()),
            })
            .unwrap();
        assert!(machine.session().tables.is_empty());
        assert_eq!(machine.session().current_step, ImportStep::Name);
        assert!(!machine.session().is_busy);
    }

    #[test]
    fn test_column_edits_overwrite_definitions() {
        let mut machine = machine();
        let (token, request) = inference_of(to_configure(&mut machine));
        machine
            .handle(WizardEvent::InferenceFinished {
                token,
                key: request.key(),
                result: Ok(people()),
            })
            .unwrap();

        machine
            .handle(WizardEvent::RenameColumn {
                table: 0,
                column: 1,
                name: "years".into(),
            })
            .unwrap();
        machine
            .handle(WizardEvent::RetypeColumn {
                table: 0,
                column: 1,
                semantic_type: SemanticType::Date,
            })
            .unwrap();
        machine
            .handle(WizardEvent::RenameColumn {
                table: 3,
                column: 0,
                name: "ignored".into(),
            })
            .unwrap();

        let column = &machine.session().tables[0].columns[1];
        assert_eq!(column.name, "years");
        assert_eq!(column.semantic_type, SemanticType::Date);
    }

    #[test]
    fn test_sqlite_skips_inference() {
        let mut machine = machine();
        machine.handle(WizardEvent::SetName("App".into())).unwrap();
        machine.handle(WizardEvent::Next).unwrap();
        machine.handle(WizardEvent::SelectSourceKind(SourceKind::Sqlite)).unwrap();
        machine.handle(WizardEvent::Next).unwrap();
        machine
            .handle(WizardEvent::SelectFile(SourceFile::new("app.db", vec![0u8; 4])))
            .unwrap();

        let effects = machine.handle(WizardEvent::Next).unwrap();
        assert!(effects.is_empty());
        assert_eq!(machine.session().current_step, ImportStep::Review);
        assert_eq!(machine.session().tables[0].name, "sqlite_table");
        assert!(!machine.session().is_busy);
    }

    #[test]
    fn test_sqlite_reentry_keeps_column_edits() {
        let mut machine = machine();
        machine.handle(WizardEvent::SetName("App".into())).unwrap();
        machine.handle(WizardEvent::Next).unwrap();
        machine.handle(WizardEvent::SelectSourceKind(SourceKind::Sqlite)).unwrap();
        machine.handle(WizardEvent::Next).unwrap();
        machine
            .handle(WizardEvent::SelectFile(SourceFile::new("app.db", vec![0u8; 4])))
            .unwrap();
        machine.handle(WizardEvent::Next).unwrap();

        machine.handle(WizardEvent::Back).unwrap();
        assert_eq!(machine.session().current_step, ImportStep::Configure);
        machine
            .handle(WizardEvent::RenameColumn {
                table: 0,
                column: 1,
                name: "title".into(),
            })
            .unwrap();

        machine.handle(WizardEvent::Back).unwrap();
        let effects = machine.handle(WizardEvent::Next).unwrap();
        assert!(effects.is_empty());
        assert_eq!(machine.session().current_step, ImportStep::Review);
        assert_eq!(machine.session().tables[0].columns[1].name, "title");

        // a different file installs a fresh stand-in schema
        machine.handle(WizardEvent::Back).unwrap();
        machine.handle(WizardEvent::Back).unwrap();
        machine
            .handle(WizardEvent::SelectFile(SourceFile::new("other.db", vec![1u8; 4])))
            .unwrap();
        machine.handle(WizardEvent::Next).unwrap();
        assert_eq!(machine.session().tables[0].columns[1].name, "name");
    }

    #[test]
    fn test_submit_requires_signed_in_caller() {
        let mut machine = machine();
        let (token, request) = inference_of(to_configure(&mut machine));
        machine
            .handle(WizardEvent::InferenceFinished {
                token,
                key: request.key(),
                result: Ok(people()),
            })
            .unwrap();
        machine.handle(WizardEvent::Next).unwrap();

        let err = machine
            .handle(WizardEvent::Submit { signed_in: false })
            .unwrap_err();
        assert!(matches!(err, ImportError::Unauthorized));
        assert_eq!(
            machine.session().last_error.as_deref(),
            Some("You must be signed in to import data")
        );
        assert_eq!(machine.session().current_step, ImportStep::Review);

        let effects = machine.handle(WizardEvent::Submit { signed_in: true }).unwrap();
        assert!(matches!(effects.as_slice(), [Effect::StartSubmission { .. }]));
        assert_eq!(machine.session().current_step, ImportStep::Processing);
        assert!(machine.session().is_busy);
    }

    #[test]
    fn test_submission_failure_and_success() {
        let mut machine = machine();
        let (token, request) = inference_of(to_configure(&mut machine));
        machine
            .handle(WizardEvent::InferenceFinished {
                token,
                key: request.key(),
                result: Ok(people()),
            })
            .unwrap();
        machine.handle(WizardEvent::Next).unwrap();
        machine.handle(WizardEvent::Submit { signed_in: true }).unwrap();

        machine
            .handle(WizardEvent::SubmissionFinished {
                token,
                outcome: Err(ImportError::Rejected("Invalid CSV".into())),
            })
            .unwrap();
        assert_eq!(machine.session().current_step, ImportStep::Processing);
        assert_eq!(machine.session().last_error.as_deref(), Some("Invalid CSV"));
        assert!(!machine.session().is_busy);
        assert_eq!(machine.session().tables, people());

        // retry from processing
        machine.handle(WizardEvent::Submit { signed_in: true }).unwrap();
        let effects = machine
            .handle(WizardEvent::SubmissionFinished {
                token,
                outcome: Ok(UploadResponse::default()),
            })
            .unwrap();
        let close_token = match effects.as_slice() {
            [Effect::ClearTempFiles, Effect::ScheduleClose { token, delay }] => {
                assert_eq!(*delay, Duration::from_millis(1500));
                *token
            }
            other => panic!("unexpected effects {:?}", other),
        };

        machine.handle(WizardEvent::CloseTimerFired { token: close_token }).unwrap();
        assert!(!machine.is_open());
        assert!(machine.session().file.is_none());
        assert_eq!(machine.session().current_step, ImportStep::Name);
    }

    #[test]
    fn test_back_from_processing_keeps_tables() {
        let mut machine = machine();
        let (token, request) = inference_of(to_configure(&mut machine));
        machine
            .handle(WizardEvent::InferenceFinished {
                token,
                key: request.key(),
                result: Ok(people()),
            })
            .unwrap();
        machine.handle(WizardEvent::Next).unwrap();
        machine.handle(WizardEvent::Submit { signed_in: true }).unwrap();
        machine
            .handle(WizardEvent::SubmissionFinished {
                token,
                outcome: Err(ImportError::Service("connection reset".into())),
            })
            .unwrap();

        machine.handle(WizardEvent::Back).unwrap();
        assert_eq!(machine.session().current_step, ImportStep::Review);
        assert_eq!(machine.session().last_error, None);
        assert_eq!(machine.session().tables, people());
        assert!(machine.session().file.is_some());
    }

    /// Drive a CSV import through a successful inference and submit it
    fn to_processing(machine: &mut ImportMachine) -> Generation {
        let (token, request) = inference_of(to_configure(machine));
        machine
            .handle(WizardEvent::InferenceFinished {
                token,
                key: request.key(),
                result: Ok(people()),
            })
            .unwrap();
        machine.handle(WizardEvent::Next).unwrap();
        match machine.handle(WizardEvent::Submit { signed_in: true }).unwrap().as_slice() {
            [Effect::StartSubmission { token, .. }] => *token,
            other => panic!("expected one submission effect, got {:?}", other),
        }
    }

    #[test]
    fn test_stale_submission_is_dropped_after_reopen() {
        let mut machine = machine();
        let token = to_processing(&mut machine);

        machine.handle(WizardEvent::Close).unwrap();
        machine.handle(WizardEvent::Open).unwrap();
        machine.handle(WizardEvent::SetName("Fresh".into())).unwrap();

        let effects = machine
            .handle(WizardEvent::SubmissionFinished {
                token,
                outcome: Ok(UploadResponse::default()),
            })
            .unwrap();
        assert!(effects.is_empty());

        machine
            .handle(WizardEvent::SubmissionFinished {
                token,
                outcome: Err(ImportError::Rejected("Invalid CSV".into())),
            })
            .unwrap();

        let session = machine.session();
        assert!(machine.is_open());
        assert_eq!(session.current_step, ImportStep::Name);
        assert_eq!(session.display_name, "Fresh");
        assert_eq!(session.last_error, None);
        assert!(!session.is_busy);
    }

    #[test]
    fn test_stale_close_timer_keeps_reopened_wizard() {
        let mut machine = machine();
        let token = to_processing(&mut machine);
        let effects = machine
            .handle(WizardEvent::SubmissionFinished {
                token,
                outcome: Ok(UploadResponse::default()),
            })
            .unwrap();
        let close_token = match effects.as_slice() {
            [Effect::ClearTempFiles, Effect::ScheduleClose { token, .. }] => *token,
            other => panic!("unexpected effects {:?}", other),
        };

        machine.handle(WizardEvent::Close).unwrap();
        machine.handle(WizardEvent::Open).unwrap();
        machine.handle(WizardEvent::SetName("Second".into())).unwrap();
        machine.handle(WizardEvent::Next).unwrap();

        machine.handle(WizardEvent::CloseTimerFired { token: close_token }).unwrap();
        assert!(machine.is_open());
        assert_eq!(machine.session().current_step, ImportStep::Type);
        assert_eq!(machine.session().display_name, "Second");
    }

    #[test]
    fn test_events_ignored_while_closed() {
        let mut machine = ImportMachine::new(ImportConfig::default());
        let effects = machine.handle(WizardEvent::SetName("Closed".into())).unwrap();
        assert!(effects.is_empty());
        assert_eq!(machine.session().display_name, "");
    }
}
