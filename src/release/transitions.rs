// ABOUTME: State transition methods for frontend releases.
// ABOUTME: Each method performs one remote step and returns the next state on success.

use super::Release;
use super::catalog::list_deploy_versions;
use super::error::ReleaseError;
use super::invalidation::CacheInvalidator;
use super::lifecycle::ReleaseSummary;
use super::origin::OriginSwitcher;
use super::publisher::ContentPublisher;
use super::state::{Allocated, Committed, Live, Planned, Published, Switched};
use super::version_store::VersionStore;
use crate::cloud::{DistributionOps, ObjectStore, ParameterStore};
use crate::types::DeployVersion;
use std::path::Path;

// =============================================================================
// Planned -> Allocated
// =============================================================================

impl Release<Planned> {
    /// Read the version pointer and allocate the next version.
    ///
    /// Nothing is written; the pointer only moves in `commit()`.
    pub async fn allocate<P: ParameterStore>(
        self,
        parameters: &P,
    ) -> Result<Release<Allocated>, ReleaseError> {
        let previous = VersionStore::new(parameters, &self.target.version_parameter)
            .read()
            .await?;
        let version = DeployVersion::after(previous);
        tracing::debug!(?previous, %version, "allocated version");

        Ok(Release {
            target: self.target,
            state: Allocated { version, previous },
        })
    }
}

// =============================================================================
// Allocated -> Published
// =============================================================================

impl Release<Allocated> {
    /// Version that was current when this release was allocated.
    pub fn previous(&self) -> Option<DeployVersion> {
        self.state.previous
    }

    /// Upload the build output under this version's prefix.
    ///
    /// Published prefixes are immutable: if the allocated version is already
    /// in storage nothing is uploaded and `VersionExists` is returned.
    pub async fn publish<S: ObjectStore>(
        self,
        objects: &S,
        build_dir: &Path,
    ) -> Result<Release<Published>, ReleaseError> {
        let version = self.state.version;
        if list_deploy_versions(objects, &self.target.bucket)
            .await?
            .contains(version)
        {
            return Err(ReleaseError::VersionExists(version));
        }

        let summary = ContentPublisher::new(objects)
            .publish(&self.target.bucket, build_dir, &self.state.version.prefix())
            .await?;

        Ok(Release {
            target: self.target,
            state: Published {
                version: self.state.version,
                previous: self.state.previous,
                uploaded: summary.keys.len(),
            },
        })
    }
}

// =============================================================================
// Published -> Switched
// =============================================================================

impl Release<Published> {
    /// Number of files uploaded by this release (zero for a restore).
    pub fn uploaded(&self) -> usize {
        self.state.uploaded
    }

    /// Repoint the distribution's origin at this version.
    pub async fn switch_origin<C: DistributionOps>(
        self,
        cdn: &C,
    ) -> Result<Release<Switched>, ReleaseError> {
        let change = OriginSwitcher::new(cdn)
            .repoint(&self.target.distribution, &self.state.version.origin_path())
            .await?;

        Ok(Release {
            target: self.target,
            state: Switched {
                version: self.state.version,
                previous: self.state.previous,
                uploaded: self.state.uploaded,
                previous_origin: change.previous,
            },
        })
    }
}

// =============================================================================
// Switched -> Live
// =============================================================================

impl Release<Switched> {
    /// Invalidate every cached path so the new origin is served.
    pub async fn invalidate<C: DistributionOps>(
        self,
        cdn: &C,
    ) -> Result<Release<Live>, ReleaseError> {
        let invalidation = CacheInvalidator::new(cdn)
            .invalidate_all(&self.target.distribution)
            .await?;

        let Switched {
            version,
            previous,
            uploaded,
            previous_origin,
        } = self.state;

        Ok(Release {
            target: self.target,
            state: Live {
                version,
                previous,
                uploaded,
                previous_origin,
                invalidation,
            },
        })
    }
}

// =============================================================================
// Live -> Committed
// =============================================================================

impl Release<Live> {
    /// Record this version as current in the parameter store.
    pub async fn commit<P: ParameterStore>(
        self,
        parameters: &P,
    ) -> Result<Release<Committed>, ReleaseError> {
        VersionStore::new(parameters, &self.target.version_parameter)
            .write(self.state.version)
            .await?;

        Ok(Release {
            target: self.target,
            state: Committed { live: self.state },
        })
    }
}

// =============================================================================
// Committed (terminal)
// =============================================================================

impl Release<Committed> {
    pub fn finish(self) -> ReleaseSummary {
        let Live {
            version,
            previous,
            uploaded,
            previous_origin,
            invalidation,
        } = self.state.live;

        ReleaseSummary {
            version,
            previous,
            uploaded,
            origin_path: version.origin_path(),
            previous_origin,
            invalidation,
            url: self.target.url,
        }
    }
}
