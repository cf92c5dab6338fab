//! Import wizard for tabular datasets
//!
//! The wizard walks a user from naming a dataset to submitting it for
//! conversion. [`ImportMachine`] holds the step logic as a pure transition
//! function; [`ImportWizard`] drives it on tokio, running schema inference and
//! submissions and reporting progress on the [`dv_core::EventBus`].

pub mod machine;
pub mod service;
pub mod session;
pub mod step;
pub mod wizard;

use dv_data::DataError;
use thiserror::Error;

// Re-exports
pub use machine::{Effect, Generation, ImportMachine, SubmissionOutcome, WizardEvent};
pub use service::{
    submit_payload, AuthProvider, ClearTempResponse, ConversionService, Dataset, UploadResponse,
};
pub use session::{parse_column_names, ImportSession};
pub use step::{ImportStep, ValidationError};
pub use wizard::ImportWizard;

/// Errors raised by the import wizard and its collaborators
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Error processing file: {0}")]
    Processing(DataError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("Conversion service error: {0}")]
    Service(String),

    #[error("{0}")]
    Rejected(String),

    #[error("You must be signed in to import data")]
    Unauthorized,

    #[error("Another import operation is still running")]
    Busy,
}
