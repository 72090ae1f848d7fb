// ABOUTME: Deletes frontend versions that fall outside the retention window.
// ABOUTME: Keeps the highest-numbered versions; deletes the rest in bounded batches.

use super::ReleaseError;
use super::catalog::{VersionListing, list_deploy_versions};
use crate::cloud::{MAX_DELETE_BATCH, ObjectStore};
use crate::config::Retention;
use crate::types::{BucketName, DeployVersion};
use serde::Serialize;

/// Outcome of one cleanup pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub retained: Vec<DeployVersion>,
    pub deleted: Vec<DeployVersion>,
    pub objects_deleted: usize,
    /// Prefixes that were not recognised as versions and were left alone.
    pub skipped: Vec<String>,
}

/// Split versions (highest first) into those kept and those to delete.
///
/// Does not look at which version is active; the active version is expected
/// to be among the highest.
pub fn split_retained(
    versions_desc: &[DeployVersion],
    retention: Retention,
) -> (&[DeployVersion], &[DeployVersion]) {
    versions_desc.split_at(retention.get().min(versions_desc.len()))
}

pub struct RetentionCleaner<'a, S> {
    store: &'a S,
}

impl<'a, S: ObjectStore> RetentionCleaner<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Delete every version beyond the `retention` highest.
    ///
    /// The first listing or delete error aborts the pass and leaves the
    /// remaining versions untouched. Running it again without a new deploy
    /// deletes nothing.
    pub async fn cleanup(
        &self,
        bucket: &BucketName,
        retention: Retention,
    ) -> Result<CleanupReport, ReleaseError> {
        let VersionListing { versions, skipped } = list_deploy_versions(self.store, bucket).await?;
        let (retained, expired) = split_retained(&versions, retention);

        let mut report = CleanupReport {
            retained: retained.to_vec(),
            skipped,
            ..CleanupReport::default()
        };

        for &version in expired {
            report.objects_deleted += self.delete_version(bucket, version).await?;
            report.deleted.push(version);
        }

        Ok(report)
    }

    /// Delete every object under one version's prefix; returns the object count.
    pub async fn delete_version(
        &self,
        bucket: &BucketName,
        version: DeployVersion,
    ) -> Result<usize, ReleaseError> {
        let prefix = format!("{}/", version.prefix());

        let mut keys = Vec::new();
        let mut continuation = None;
        loop {
            let page = self.store.list_keys(bucket, &prefix, continuation).await?;
            keys.extend(page.items);
            match page.next {
                Some(token) => continuation = Some(token),
                None => break,
            }
        }

        tracing::debug!(%version, objects = keys.len(), "deleting version");
        for batch in keys.chunks(MAX_DELETE_BATCH) {
            self.store.delete_objects(bucket, batch).await?;
        }

        Ok(keys.len())
    }
}
