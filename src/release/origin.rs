// ABOUTME: Repoints the CDN distribution's origin path at a version prefix.
// ABOUTME: The update is conditioned on the ETag read alongside the config.

use super::ReleaseError;
use crate::cloud::{CdnError, DistributionConfig, DistributionOps, TaggedConfig};
use crate::types::DistributionId;

/// Origin path before and after a switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginChange {
    pub previous: Option<String>,
    pub current: String,
}

pub struct OriginSwitcher<'a, C> {
    cdn: &'a C,
}

impl<'a, C: DistributionOps> OriginSwitcher<'a, C> {
    pub fn new(cdn: &'a C) -> Self {
        Self { cdn }
    }

    /// Point the primary origin at `origin_path`.
    ///
    /// A concurrent modification between read and write surfaces as
    /// `CdnError::PreconditionFailed`; it is not retried.
    pub async fn repoint(
        &self,
        distribution: &DistributionId,
        origin_path: &str,
    ) -> Result<OriginChange, ReleaseError> {
        let TaggedConfig { mut config, etag } =
            self.cdn.get_distribution_config(distribution).await?;

        let previous = config.primary_origin_path().map(str::to_string);
        if !config.set_primary_origin_path(origin_path) {
            return Err(CdnError::NoOrigin(distribution.to_string()).into());
        }

        tracing::debug!(
            %distribution,
            previous = ?previous,
            current = origin_path,
            etag = %etag,
            "updating origin path"
        );
        self.cdn
            .update_distribution(distribution, config, &etag)
            .await?;

        Ok(OriginChange {
            previous,
            current: origin_path.to_string(),
        })
    }
}
