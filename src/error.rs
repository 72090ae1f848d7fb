// ABOUTME: Application-wide error types for stagehand.
// ABOUTME: Uses thiserror for ergonomic error handling.

use crate::release::{ReleaseError, ReleaseErrorKind};
use crate::rollback::{PromptError, SelectorError};
use crate::stack::StackError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} is required; set it in the environment or stagehand.yml")]
    MissingConfig(&'static str),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("rollback is only available for versioned stages ({0} has no versioning)")]
    UnversionedStage(String),

    #[error("input closed before the rollback was confirmed")]
    InputClosed,

    #[error(transparent)]
    Stack(#[from] StackError),

    #[error(transparent)]
    Release(#[from] ReleaseError),

    #[error(transparent)]
    Selector(#[from] SelectorError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<PromptError> for Error {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::InputClosed => Error::InputClosed,
            PromptError::Io(e) => Error::Io(e),
        }
    }
}

impl Error {
    /// True when the run stopped before any remote mutation because an input
    /// was missing or invalid.
    pub fn is_precondition(&self) -> bool {
        match self {
            Error::MissingConfig(_)
            | Error::MissingEnvVar(_)
            | Error::InvalidConfig(_)
            | Error::UnversionedStage(_)
            | Error::Yaml(_) => true,
            Error::Stack(e) => e.is_precondition(),
            Error::Release(e) => e.kind() == ReleaseErrorKind::Precondition,
            Error::InputClosed | Error::Selector(_) | Error::Io(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
