//! Wizard steps and their validation gates

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Steps of the import wizard, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStep {
    Name,
    Type,
    Upload,
    Configure,
    Review,
    Processing,
}

impl ImportStep {
    pub const ALL: [ImportStep; 6] = [
        ImportStep::Name,
        ImportStep::Type,
        ImportStep::Upload,
        ImportStep::Configure,
        ImportStep::Review,
        ImportStep::Processing,
    ];

    /// Step reached with Next. Review and Processing advance only through a submission.
    pub fn next(self) -> Option<ImportStep> {
        match self {
            ImportStep::Name => Some(ImportStep::Type),
            ImportStep::Type => Some(ImportStep::Upload),
            ImportStep::Upload => Some(ImportStep::Configure),
            ImportStep::Configure => Some(ImportStep::Review),
            ImportStep::Review | ImportStep::Processing => None,
        }
    }

    /// Step reached with Back
    pub fn previous(self) -> Option<ImportStep> {
        match self {
            ImportStep::Name => None,
            ImportStep::Type => Some(ImportStep::Name),
            ImportStep::Upload => Some(ImportStep::Type),
            ImportStep::Configure => Some(ImportStep::Upload),
            ImportStep::Review => Some(ImportStep::Configure),
            ImportStep::Processing => Some(ImportStep::Review),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportStep::Name => "name",
            ImportStep::Type => "type",
            ImportStep::Upload => "upload",
            ImportStep::Configure => "configure",
            ImportStep::Review => "review",
            ImportStep::Processing => "processing",
        }
    }
}

impl fmt::Display for ImportStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A step's input is incomplete
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill name with at least {min} characters")]
    NameTooShort { min: usize },

    #[error("Please select a data source type")]
    MissingSourceKind,

    #[error("Please select a file to upload")]
    MissingFile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_and_previous_are_inverse() {
        for step in ImportStep::ALL {
            if let Some(next) = step.next() {
                assert_eq!(next.previous(), Some(step));
                assert_eq!(next.index(), step.index() + 1);
            }
        }
        assert_eq!(ImportStep::Name.previous(), None);
        assert_eq!(ImportStep::Review.next(), None);
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::NameTooShort { min: 3 }.to_string(),
            "Please fill name with at least 3 characters"
        );
        assert_eq!(
            ValidationError::MissingSourceKind.to_string(),
            "Please select a data source type"
        );
        assert_eq!(
            ValidationError::MissingFile.to_string(),
            "Please select a file to upload"
        );
    }
}
