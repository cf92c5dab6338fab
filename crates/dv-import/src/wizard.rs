//! Async driver for the import state machine

use std::sync::Arc;

use dv_core::events::events::{ImportCompleted, ImportFailed, ImportStepChanged, SchemaInferred};
use dv_core::{EventBus, SemanticType, SourceKind};
use dv_data::{infer_tables_blocking, ImportConfig, SourceFile};
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::machine::{Effect, ImportMachine, WizardEvent};
use crate::service::{submit_payload, AuthProvider, ConversionService};
use crate::session::ImportSession;
use crate::ImportError;

/// Runs the import wizard on tokio.
///
/// User actions apply synchronously; inference, submission and the close
/// timer run as spawned tasks that feed their results back into the machine.
/// The session lock is never held across an await.
#[derive(Clone)]
pub struct ImportWizard {
    inner: Arc<Inner>,
}

struct Inner {
    machine: Mutex<ImportMachine>,
    service: Arc<dyn ConversionService>,
    auth: Arc<dyn AuthProvider>,
    events: EventBus,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl ImportWizard {
    pub fn new(
        config: ImportConfig,
        service: Arc<dyn ConversionService>,
        auth: Arc<dyn AuthProvider>,
        events: EventBus,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                machine: Mutex::new(ImportMachine::new(config)),
                service,
                auth,
                events,
                tasks: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Snapshot of the current session
    pub fn session(&self) -> ImportSession {
        self.inner.machine.lock().session().clone()
    }

    pub fn is_open(&self) -> bool {
        self.inner.machine.lock().is_open()
    }

    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }

    pub fn open(&self) -> Result<(), ImportError> {
        self.dispatch(WizardEvent::Open)
    }

    pub fn close(&self) -> Result<(), ImportError> {
        self.dispatch(WizardEvent::Close)
    }

    pub fn set_name(&self, name: impl Into<String>) -> Result<(), ImportError> {
        self.dispatch(WizardEvent::SetName(name.into()))
    }

    pub fn select_source_kind(&self, kind: SourceKind) -> Result<(), ImportError> {
        self.dispatch(WizardEvent::SelectSourceKind(kind))
    }

    pub fn select_file(&self, file: SourceFile) -> Result<(), ImportError> {
        self.dispatch(WizardEvent::SelectFile(file))
    }

    pub fn set_header_present(&self, present: bool) -> Result<(), ImportError> {
        self.dispatch(WizardEvent::SetHeaderPresent(present))
    }

    pub fn set_manual_column_names(&self, names: Vec<String>) -> Result<(), ImportError> {
        self.dispatch(WizardEvent::SetManualColumnNames(names))
    }

    pub fn rename_column(
        &self,
        table: usize,
        column: usize,
        name: impl Into<String>,
    ) -> Result<(), ImportError> {
        self.dispatch(WizardEvent::RenameColumn {
            table,
            column,
            name: name.into(),
        })
    }

    pub fn retype_column(
        &self,
        table: usize,
        column: usize,
        semantic_type: SemanticType,
    ) -> Result<(), ImportError> {
        self.dispatch(WizardEvent::RetypeColumn {
            table,
            column,
            semantic_type,
        })
    }

    pub fn next(&self) -> Result<(), ImportError> {
        self.dispatch(WizardEvent::Next)
    }

    pub fn back(&self) -> Result<(), ImportError> {
        self.dispatch(WizardEvent::Back)
    }

    pub fn submit(&self) -> Result<(), ImportError> {
        let signed_in = self.inner.auth.is_signed_in();
        self.dispatch(WizardEvent::Submit { signed_in })
    }

    /// Wait until no spawned operation is left, including ones spawned by
    /// operations that finished while waiting
    pub async fn settle(&self) {
        loop {
            let pending: Vec<JoinHandle<()>> = std::mem::take(&mut *self.inner.tasks.lock());
            if pending.is_empty() {
                return;
            }
            for handle in pending {
                if let Err(err) = handle.await {
                    tracing::error!("Import task failed: {}", err);
                }
            }
        }
    }

    fn dispatch(&self, event: WizardEvent) -> Result<(), ImportError> {
        let (result, before, after, notice) = {
            let mut machine = self.inner.machine.lock();
            let notice = Notice::of(&event, &machine);
            let before = (machine.session().current_step, machine.session().last_error.clone());
            let result = machine.handle(event);
            let after = (machine.session().current_step, machine.session().last_error.clone());
            (result, before, after, notice)
        };

        if before.0 != after.0 {
            tracing::debug!("Import step {} -> {}", before.0, after.0);
            self.inner.events.publish(ImportStepChanged {
                from: before.0.to_string(),
                to: after.0.to_string(),
            });
        }
        if let (Some(error), true) = (&after.1, before.1 != after.1) {
            self.inner.events.publish(ImportFailed {
                step: after.0.to_string(),
                error: error.clone(),
            });
        }
        match notice {
            Some(Notice::Schema(event)) => self.inner.events.publish(event),
            Some(Notice::Completed(event)) => self.inner.events.publish(event),
            None => {}
        }

        for effect in result? {
            self.run(effect);
        }
        Ok(())
    }

    fn run(&self, effect: Effect) {
        let wizard = self.clone();
        let handle = match effect {
            Effect::StartInference { token, request } => {
                let config = self.inner.machine.lock().config().clone();
                tokio::spawn(async move {
                    let key = request.key();
                    let result = infer_tables_blocking(request, config).await;
                    wizard.complete(WizardEvent::InferenceFinished { token, key, result });
                })
            }
            Effect::StartSubmission { token, payload } => tokio::spawn(async move {
                let outcome = submit_payload(wizard.inner.service.as_ref(), &payload).await;
                wizard.complete(WizardEvent::SubmissionFinished { token, outcome });
            }),
            Effect::ClearTempFiles => tokio::spawn(async move {
                match wizard.inner.service.clear_temp_files().await {
                    Ok(response) if response.success => {
                        tracing::debug!("Cleared temporary files: {}", response.message)
                    }
                    Ok(response) => {
                        tracing::warn!("Failed to clear temporary files: {}", response.message)
                    }
                    Err(err) => tracing::warn!("Failed to clear temporary files: {}", err),
                }
            }),
            Effect::ScheduleClose { token, delay } => tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                wizard.complete(WizardEvent::CloseTimerFired { token });
            }),
        };
        let mut tasks = self.inner.tasks.lock();
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle);
    }

    /// Feed a finished operation back into the machine
    fn complete(&self, event: WizardEvent) {
        if let Err(err) = self.dispatch(event) {
            tracing::warn!("Could not apply import result: {}", err);
        }
    }
}

/// Event to publish once a finished operation is applied to the current session
enum Notice {
    Schema(SchemaInferred),
    Completed(ImportCompleted),
}

impl Notice {
    fn of(event: &WizardEvent, machine: &ImportMachine) -> Option<Self> {
        let session = machine.session();
        match event {
            WizardEvent::InferenceFinished {
                token,
                key,
                result: Ok(tables),
            } if machine.expects_inference(*token, key) => Some(Notice::Schema(SchemaInferred {
                file_name: session
                    .file
                    .as_ref()
                    .map(|file| file.name().to_string())
                    .unwrap_or_default(),
                table_count: tables.len(),
                column_count: tables.iter().map(|t| t.columns.len()).sum(),
            })),
            WizardEvent::SubmissionFinished {
                token,
                outcome: Ok(response),
            } if *token == machine.generation() => Some(Notice::Completed(ImportCompleted {
                display_name: session.display_name.clone(),
                dataset_key: response.key.clone(),
            })),
            _ => None,
        }
    }
}
