// ABOUTME: Error types for release and rollback operations.
// ABOUTME: Classifies failures as precondition, remote call, or concurrency conflict.

use crate::cloud::{CdnError, FunctionError, ObjectStoreError, ParameterError};
use crate::types::DeployVersion;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ReleaseError {
    /// Local build output directory does not exist.
    #[error("build output not found at {}; build the frontend first", .0.display())]
    BuildOutputMissing(PathBuf),

    /// Build output exists but holds no files to publish.
    #[error("build output at {} contains no files", .0.display())]
    BuildOutputEmpty(PathBuf),

    /// The allocated version already has artifacts in storage, which happens
    /// when the pointer was rolled back below the newest stored version.
    #[error(
        "{0} already exists in storage; the version pointer is behind the newest \
         stored version, roll forward or remove {0} before deploying"
    )]
    VersionExists(DeployVersion),

    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Objects(#[from] ObjectStoreError),

    #[error(transparent)]
    Parameters(#[from] ParameterError),

    #[error(transparent)]
    Cdn(#[from] CdnError),

    #[error(transparent)]
    Functions(#[from] FunctionError),
}

/// Broad failure class, for reporting and exit handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseErrorKind {
    /// Detected before any remote mutation; fix the input and re-run.
    Precondition,
    /// A remote service call failed; state is as of the last completed step.
    RemoteCall,
    /// The distribution changed between read and conditional write.
    Conflict,
}

impl ReleaseError {
    pub fn kind(&self) -> ReleaseErrorKind {
        match self {
            ReleaseError::BuildOutputMissing(_)
            | ReleaseError::BuildOutputEmpty(_)
            | ReleaseError::ReadFile { .. }
            | ReleaseError::VersionExists(_)
            | ReleaseError::Cdn(CdnError::NoOrigin(_)) => ReleaseErrorKind::Precondition,
            ReleaseError::Cdn(CdnError::PreconditionFailed(_)) => ReleaseErrorKind::Conflict,
            _ => ReleaseErrorKind::RemoteCall,
        }
    }
}
