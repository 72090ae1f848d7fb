// ABOUTME: CloudFront-backed distribution operations.
// ABOUTME: ETag-conditioned config updates and wildcard invalidations.

use super::describe;
use crate::cloud::{CdnError, DistributionConfig, DistributionOps, TaggedConfig};
use crate::types::DistributionId;
use async_trait::async_trait;
use aws_sdk_cloudfront::error::SdkError;
use aws_sdk_cloudfront::operation::update_distribution::UpdateDistributionError;
use aws_sdk_cloudfront::types::{InvalidationBatch, Paths};

#[derive(Clone)]
pub struct CloudFrontDistributions {
    client: aws_sdk_cloudfront::Client,
}

impl CloudFrontDistributions {
    pub fn new(client: aws_sdk_cloudfront::Client) -> Self {
        Self { client }
    }
}

impl DistributionConfig for aws_sdk_cloudfront::types::DistributionConfig {
    fn primary_origin_path(&self) -> Option<&str> {
        self.origins()
            .and_then(|origins| origins.items().first())
            .map(|origin| origin.origin_path().unwrap_or_default())
    }

    fn set_primary_origin_path(&mut self, path: &str) -> bool {
        match self
            .origins
            .as_mut()
            .and_then(|origins| origins.items.first_mut())
        {
            Some(origin) => {
                origin.origin_path = Some(path.to_string());
                true
            }
            None => false,
        }
    }
}

fn map_update_error(e: SdkError<UpdateDistributionError>, id: &DistributionId) -> CdnError {
    match e.as_service_error() {
        Some(err) if err.is_precondition_failed() || err.is_invalid_if_match_version() => {
            CdnError::PreconditionFailed(id.to_string())
        }
        _ => CdnError::Remote(describe(&e)),
    }
}

#[async_trait]
impl DistributionOps for CloudFrontDistributions {
    type Config = aws_sdk_cloudfront::types::DistributionConfig;

    async fn get_distribution_config(
        &self,
        id: &DistributionId,
    ) -> Result<TaggedConfig<Self::Config>, CdnError> {
        let output = self
            .client
            .get_distribution_config()
            .id(id.as_str())
            .send()
            .await
            .map_err(|e| CdnError::Remote(describe(&e)))?;

        let config = output
            .distribution_config()
            .cloned()
            .ok_or_else(|| CdnError::IncompleteResponse {
                id: id.to_string(),
                missing: "DistributionConfig",
            })?;
        let etag = output
            .e_tag()
            .map(str::to_string)
            .ok_or_else(|| CdnError::IncompleteResponse {
                id: id.to_string(),
                missing: "ETag",
            })?;

        Ok(TaggedConfig { config, etag })
    }

    async fn update_distribution(
        &self,
        id: &DistributionId,
        config: Self::Config,
        if_match: &str,
    ) -> Result<(), CdnError> {
        self.client
            .update_distribution()
            .id(id.as_str())
            .distribution_config(config)
            .if_match(if_match)
            .send()
            .await
            .map(|_| ())
            .map_err(|e| map_update_error(e, id))
    }

    async fn create_invalidation(
        &self,
        id: &DistributionId,
        paths: &[String],
        caller_reference: &str,
    ) -> Result<String, CdnError> {
        let quantity = i32::try_from(paths.len()).map_err(|_| {
            CdnError::Remote(format!("too many invalidation paths: {}", paths.len()))
        })?;
        let paths = Paths::builder()
            .quantity(quantity)
            .set_items(Some(paths.to_vec()))
            .build()
            .map_err(|e| CdnError::Remote(e.to_string()))?;
        let batch = InvalidationBatch::builder()
            .caller_reference(caller_reference)
            .paths(paths)
            .build()
            .map_err(|e| CdnError::Remote(e.to_string()))?;

        let output = self
            .client
            .create_invalidation()
            .distribution_id(id.as_str())
            .invalidation_batch(batch)
            .send()
            .await
            .map_err(|e| CdnError::Remote(describe(&e)))?;

        Ok(output
            .invalidation()
            .map(|inv| inv.id().to_string())
            .unwrap_or_default())
    }
}
