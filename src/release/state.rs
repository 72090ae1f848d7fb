// ABOUTME: Release state markers for the type state pattern.
// ABOUTME: Each state carries the data that exists once that step has succeeded.

use crate::types::DeployVersion;

/// Nothing read yet.
/// Available actions: `allocate()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Planned;

/// Next version number chosen from the pointer.
/// Available actions: `publish()`
#[derive(Debug, Clone, Copy)]
pub struct Allocated {
    pub(crate) version: DeployVersion,
    pub(crate) previous: Option<DeployVersion>,
}

/// Artifacts for `version` exist in storage.
/// Available actions: `switch_origin()`
#[derive(Debug, Clone)]
pub struct Published {
    pub(crate) version: DeployVersion,
    pub(crate) previous: Option<DeployVersion>,
    pub(crate) uploaded: usize,
}

/// CDN origin points at `version`.
/// Available actions: `invalidate()`
#[derive(Debug, Clone)]
pub struct Switched {
    pub(crate) version: DeployVersion,
    pub(crate) previous: Option<DeployVersion>,
    pub(crate) uploaded: usize,
    pub(crate) previous_origin: Option<String>,
}

/// Cache invalidation requested.
/// Available actions: `commit()`
#[derive(Debug, Clone)]
pub struct Live {
    pub(crate) version: DeployVersion,
    pub(crate) previous: Option<DeployVersion>,
    pub(crate) uploaded: usize,
    pub(crate) previous_origin: Option<String>,
    pub(crate) invalidation: String,
}

/// Version pointer written.
/// Available actions: `finish()`
#[derive(Debug, Clone)]
pub struct Committed {
    pub(crate) live: Live,
}

/// States that know which version they are releasing.
pub trait Versioned {
    fn version(&self) -> DeployVersion;
}

impl Versioned for Allocated {
    fn version(&self) -> DeployVersion {
        self.version
    }
}

impl Versioned for Published {
    fn version(&self) -> DeployVersion {
        self.version
    }
}

impl Versioned for Switched {
    fn version(&self) -> DeployVersion {
        self.version
    }
}

impl Versioned for Live {
    fn version(&self) -> DeployVersion {
        self.version
    }
}

impl Versioned for Committed {
    fn version(&self) -> DeployVersion {
        self.live.version
    }
}
