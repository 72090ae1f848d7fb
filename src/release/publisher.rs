// ABOUTME: Uploads a local build output directory under a version prefix.
// ABOUTME: Keys keep the relative path with forward slashes; content type comes from the extension.

use super::ReleaseError;
use crate::cloud::ObjectStore;
use crate::types::BucketName;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// One file scheduled for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedUpload {
    pub path: PathBuf,
    pub key: String,
    pub content_type: String,
}

/// What a publish call wrote.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PublishSummary {
    pub keys: Vec<String>,
    pub bytes: u64,
}

/// Enumerate every regular file under `root` and map it to its storage key.
///
/// Runs entirely locally, so a missing or unreadable build output is reported
/// before any upload starts.
pub fn plan_uploads(root: &Path, prefix: &str) -> Result<Vec<PlannedUpload>, ReleaseError> {
    if !root.is_dir() {
        return Err(ReleaseError::BuildOutputMissing(root.to_path_buf()));
    }

    let prefix = prefix.trim_end_matches('/');
    let mut uploads = Vec::new();

    // walkdir keeps its own stack of open directories, so depth is not bounded
    // by the call stack.
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| ReleaseError::ReadFile {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let relative_key = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        uploads.push(PlannedUpload {
            path: entry.path().to_path_buf(),
            key: format!("{prefix}/{relative_key}"),
            content_type: content_type_for(entry.path()).to_string(),
        });
    }

    if uploads.is_empty() {
        return Err(ReleaseError::BuildOutputEmpty(root.to_path_buf()));
    }
    Ok(uploads)
}

/// MIME type inferred from the file extension.
pub fn content_type_for(path: &Path) -> &'static str {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_CONTENT_TYPE)
}

pub struct ContentPublisher<'a, S> {
    store: &'a S,
}

impl<'a, S: ObjectStore> ContentPublisher<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Upload every file under `local_root` to `remote_prefix/<relative path>`.
    ///
    /// Uploads run one at a time. The first failure aborts; re-running is safe
    /// because each key is simply written again.
    pub async fn publish(
        &self,
        bucket: &BucketName,
        local_root: &Path,
        remote_prefix: &str,
    ) -> Result<PublishSummary, ReleaseError> {
        let uploads = plan_uploads(local_root, remote_prefix)?;
        tracing::debug!(
            files = uploads.len(),
            bucket = %bucket,
            prefix = remote_prefix,
            "uploading build output"
        );

        let mut summary = PublishSummary::default();
        for upload in uploads {
            let body = tokio::fs::read(&upload.path)
                .await
                .map_err(|source| ReleaseError::ReadFile {
                    path: upload.path.clone(),
                    source,
                })?;
            summary.bytes += body.len() as u64;

            tracing::debug!(key = %upload.key, content_type = %upload.content_type, "put object");
            self.store
                .put_object(bucket, &upload.key, body, &upload.content_type)
                .await?;
            summary.keys.push(upload.key);
        }

        Ok(summary)
    }
}
