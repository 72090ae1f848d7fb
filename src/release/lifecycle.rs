// ABOUTME: Generic frontend release parameterized by state marker.
// ABOUTME: Deploys start at Planned; rollbacks re-enter at Published for an existing version.

use super::state::{Planned, Published, Versioned};
use super::target::FrontendTarget;
use crate::types::DeployVersion;
use serde::Serialize;

/// A frontend release in progress.
///
/// Transitions consume the release and return the next state, so the version
/// pointer can only be committed after the origin switch and invalidation
/// have succeeded.
#[derive(Debug)]
pub struct Release<S> {
    pub(crate) target: FrontendTarget,
    pub(crate) state: S,
}

impl Release<Planned> {
    /// Start a new deploy.
    pub fn new(target: FrontendTarget) -> Self {
        Release {
            target,
            state: Planned,
        }
    }
}

impl Release<Published> {
    /// Re-activate a version whose artifacts are already in storage.
    pub fn restore(
        target: FrontendTarget,
        version: DeployVersion,
        current: Option<DeployVersion>,
    ) -> Self {
        Release {
            target,
            state: Published {
                version,
                previous: current,
                uploaded: 0,
            },
        }
    }
}

impl<S> Release<S> {
    pub fn target(&self) -> &FrontendTarget {
        &self.target
    }
}

impl<S: Versioned> Release<S> {
    pub fn version(&self) -> DeployVersion {
        self.state.version()
    }
}

/// Record of a completed release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseSummary {
    pub version: DeployVersion,
    pub previous: Option<DeployVersion>,
    pub uploaded: usize,
    pub origin_path: String,
    pub previous_origin: Option<String>,
    pub invalidation: String,
    pub url: Option<String>,
}
