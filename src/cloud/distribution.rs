// ABOUTME: CDN distribution operations trait.
// ABOUTME: Conditional config updates guarded by an ETag, and cache invalidations.

use crate::types::DistributionId;
use async_trait::async_trait;

/// The parts of a distribution configuration a release needs to touch.
pub trait DistributionConfig: Send {
    /// Path of the first origin, `None` when the distribution has no origins.
    fn primary_origin_path(&self) -> Option<&str>;

    /// Set the first origin's path. Returns `false` when there is no origin.
    fn set_primary_origin_path(&mut self, path: &str) -> bool;
}

/// A configuration together with the concurrency token it was read under.
#[derive(Debug, Clone)]
pub struct TaggedConfig<C> {
    pub config: C,
    pub etag: String,
}

#[async_trait]
pub trait DistributionOps: Send + Sync {
    type Config: DistributionConfig;

    async fn get_distribution_config(
        &self,
        id: &DistributionId,
    ) -> Result<TaggedConfig<Self::Config>, CdnError>;

    /// Replace the configuration if its ETag still equals `if_match`.
    async fn update_distribution(
        &self,
        id: &DistributionId,
        config: Self::Config,
        if_match: &str,
    ) -> Result<(), CdnError>;

    /// Request invalidation of `paths`; returns the invalidation id.
    async fn create_invalidation(
        &self,
        id: &DistributionId,
        paths: &[String],
        caller_reference: &str,
    ) -> Result<String, CdnError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CdnError {
    #[error("distribution {0} was modified concurrently; re-run to retry")]
    PreconditionFailed(String),

    #[error("distribution {0} has no origins")]
    NoOrigin(String),

    #[error("distribution {id} returned an incomplete response: {missing} missing")]
    IncompleteResponse { id: String, missing: &'static str },

    #[error("CDN error: {0}")]
    Remote(String),
}
