// ABOUTME: Full-path CDN cache invalidation after an origin switch.
// ABOUTME: Does not wait for the invalidation to complete.

use super::ReleaseError;
use crate::cloud::DistributionOps;
use crate::types::DistributionId;
use chrono::{DateTime, Utc};

/// Path pattern matching every cached object.
pub const INVALIDATE_ALL: &str = "/*";

/// Uniqueness token for an invalidation request issued at `now`.
pub fn caller_reference(now: DateTime<Utc>) -> String {
    now.timestamp_millis().to_string()
}

pub struct CacheInvalidator<'a, C> {
    cdn: &'a C,
}

impl<'a, C: DistributionOps> CacheInvalidator<'a, C> {
    pub fn new(cdn: &'a C) -> Self {
        Self { cdn }
    }

    /// Request invalidation of `/*`; returns the invalidation id.
    pub async fn invalidate_all(
        &self,
        distribution: &DistributionId,
    ) -> Result<String, ReleaseError> {
        let reference = caller_reference(Utc::now());
        tracing::debug!(%distribution, reference = %reference, "creating invalidation");
        let id = self
            .cdn
            .create_invalidation(distribution, &[INVALIDATE_ALL.to_string()], &reference)
            .await?;
        Ok(id)
    }
}
