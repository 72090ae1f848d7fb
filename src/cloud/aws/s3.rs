// ABOUTME: S3-backed object storage.
// ABOUTME: Implements ObjectStore with ListObjectsV2 pagination and batched DeleteObjects.

use super::describe;
use crate::cloud::{ListPage, MAX_DELETE_BATCH, ObjectStore, ObjectStoreError};
use crate::types::BucketName;
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};

#[derive(Clone)]
pub struct S3Objects {
    client: aws_sdk_s3::Client,
}

impl S3Objects {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

fn list_error(prefix: &str, message: String) -> ObjectStoreError {
    ObjectStoreError::List {
        prefix: prefix.to_string(),
        message,
    }
}

fn delete_error(requested: usize, message: String) -> ObjectStoreError {
    ObjectStoreError::Delete {
        requested,
        failed: requested,
        message,
    }
}

#[async_trait]
impl ObjectStore for S3Objects {
    async fn put_object(
        &self,
        bucket: &BucketName,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ObjectStoreError> {
        self.client
            .put_object()
            .bucket(bucket.as_str())
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map(|_| ())
            .map_err(|e| ObjectStoreError::Upload {
                key: key.to_string(),
                message: describe(&e),
            })
    }

    async fn list_prefixes(
        &self,
        bucket: &BucketName,
        prefix: &str,
        continuation: Option<String>,
    ) -> Result<ListPage<String>, ObjectStoreError> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(bucket.as_str())
            .prefix(prefix)
            .delimiter("/")
            .set_continuation_token(continuation)
            .send()
            .await
            .map_err(|e| list_error(prefix, describe(&e)))?;

        let items = output
            .common_prefixes()
            .iter()
            .filter_map(|p| p.prefix().map(str::to_string))
            .collect();

        Ok(ListPage {
            items,
            next: output.next_continuation_token().map(str::to_string),
        })
    }

    async fn list_keys(
        &self,
        bucket: &BucketName,
        prefix: &str,
        continuation: Option<String>,
    ) -> Result<ListPage<String>, ObjectStoreError> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(bucket.as_str())
            .prefix(prefix)
            .set_continuation_token(continuation)
            .send()
            .await
            .map_err(|e| list_error(prefix, describe(&e)))?;

        let items = output
            .contents()
            .iter()
            .filter_map(|o| o.key().map(str::to_string))
            .collect();

        Ok(ListPage {
            items,
            next: output.next_continuation_token().map(str::to_string),
        })
    }

    async fn delete_objects(
        &self,
        bucket: &BucketName,
        keys: &[String],
    ) -> Result<(), ObjectStoreError> {
        if keys.len() > MAX_DELETE_BATCH {
            return Err(ObjectStoreError::BatchTooLarge(keys.len()));
        }

        let objects = keys
            .iter()
            .map(|key| ObjectIdentifier::builder().key(key).build())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| delete_error(keys.len(), e.to_string()))?;
        let delete = Delete::builder()
            .set_objects(Some(objects))
            .quiet(true)
            .build()
            .map_err(|e| delete_error(keys.len(), e.to_string()))?;

        let output = self
            .client
            .delete_objects()
            .bucket(bucket.as_str())
            .delete(delete)
            .send()
            .await
            .map_err(|e| delete_error(keys.len(), describe(&e)))?;

        // Quiet mode only reports the keys that failed.
        match output.errors() {
            [] => Ok(()),
            errors => Err(ObjectStoreError::Delete {
                requested: keys.len(),
                failed: errors.len(),
                message: errors
                    .iter()
                    .map(|e| {
                        format!(
                            "{}: {}",
                            e.key().unwrap_or("<unknown>"),
                            e.message().unwrap_or("unknown error")
                        )
                    })
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }
}
