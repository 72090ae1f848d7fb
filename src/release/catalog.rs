// ABOUTME: Lists the frontend versions present in object storage.
// ABOUTME: Parses deploys/v<N>/ prefixes and sorts them newest first.

use super::ReleaseError;
use crate::cloud::ObjectStore;
use crate::types::{BucketName, DEPLOY_ROOT, DeployVersion};

/// Versions found under the deploy root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionListing {
    /// Parsed versions, highest first.
    pub versions: Vec<DeployVersion>,
    /// Prefixes under the deploy root that are not canonical version prefixes.
    pub skipped: Vec<String>,
}

impl VersionListing {
    pub fn from_prefixes(prefixes: impl IntoIterator<Item = String>) -> Self {
        let mut listing = VersionListing::default();
        for prefix in prefixes {
            match DeployVersion::from_prefix(&prefix) {
                Ok(version) => listing.versions.push(version),
                Err(_) => listing.skipped.push(prefix),
            }
        }
        listing.versions.sort_unstable_by(|a, b| b.cmp(a));
        listing.versions.dedup();
        listing
    }

    pub fn contains(&self, version: DeployVersion) -> bool {
        self.versions.contains(&version)
    }
}

/// List every version prefix in `bucket`, following continuation tokens.
pub async fn list_deploy_versions<S: ObjectStore>(
    store: &S,
    bucket: &BucketName,
) -> Result<VersionListing, ReleaseError> {
    let mut prefixes = Vec::new();
    let mut continuation = None;
    loop {
        let page = store
            .list_prefixes(bucket, DEPLOY_ROOT, continuation)
            .await?;
        prefixes.extend(page.items);
        match page.next {
            Some(token) => continuation = Some(token),
            None => break,
        }
    }

    let listing = VersionListing::from_prefixes(prefixes);
    tracing::debug!(
        bucket = %bucket,
        versions = listing.versions.len(),
        skipped = listing.skipped.len(),
        "listed deploy versions"
    );
    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_descending_and_skips_foreign_prefixes() {
        let listing = VersionListing::from_prefixes(
            ["deploys/v2/", "deploys/v10/", "deploys/tmp/", "deploys/v1/"]
                .into_iter()
                .map(String::from),
        );
        let numbers: Vec<u64> = listing.versions.iter().map(|v| v.get()).collect();
        assert_eq!(numbers, vec![10, 2, 1]);
        assert_eq!(listing.skipped, vec!["deploys/tmp/".to_string()]);
    }
}
