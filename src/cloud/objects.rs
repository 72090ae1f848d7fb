// ABOUTME: Object storage operations trait.
// ABOUTME: Put, list common prefixes, list keys, and batch delete.

use super::ListPage;
use crate::types::BucketName;
use async_trait::async_trait;

/// Largest number of keys one delete request may carry.
pub const MAX_DELETE_BATCH: usize = 1000;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write one object. Writes are idempotent per key.
    async fn put_object(
        &self,
        bucket: &BucketName,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ObjectStoreError>;

    /// List the `/`-delimited common prefixes directly under `prefix`.
    async fn list_prefixes(
        &self,
        bucket: &BucketName,
        prefix: &str,
        continuation: Option<String>,
    ) -> Result<ListPage<String>, ObjectStoreError>;

    /// List object keys under `prefix`, recursively.
    async fn list_keys(
        &self,
        bucket: &BucketName,
        prefix: &str,
        continuation: Option<String>,
    ) -> Result<ListPage<String>, ObjectStoreError>;

    /// Delete up to [`MAX_DELETE_BATCH`] keys in one request.
    async fn delete_objects(
        &self,
        bucket: &BucketName,
        keys: &[String],
    ) -> Result<(), ObjectStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ObjectStoreError {
    #[error("upload of {key} failed: {message}")]
    Upload { key: String, message: String },

    #[error("listing {prefix} failed: {message}")]
    List { prefix: String, message: String },

    #[error("delete failed for {failed} of {requested} objects: {message}")]
    Delete {
        requested: usize,
        failed: usize,
        message: String,
    },

    #[error("delete batch of {0} objects exceeds the per-request limit")]
    BatchTooLarge(usize),
}
