// ABOUTME: CloudFormation-backed stack output lookup.
// ABOUTME: Maps a missing stack to StackOpsError::NotFound.

use super::describe;
use crate::cloud::{StackOps, StackOpsError};
use async_trait::async_trait;
use aws_sdk_cloudformation::error::ProvideErrorMetadata;
use std::collections::HashMap;

#[derive(Clone)]
pub struct CloudFormationStacks {
    client: aws_sdk_cloudformation::Client,
}

impl CloudFormationStacks {
    pub fn new(client: aws_sdk_cloudformation::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StackOps for CloudFormationStacks {
    async fn stack_outputs(
        &self,
        stack_name: &str,
    ) -> Result<HashMap<String, String>, StackOpsError> {
        let output = self
            .client
            .describe_stacks()
            .stack_name(stack_name)
            .send()
            .await
            .map_err(|e| {
                // CloudFormation reports an unknown stack as a generic validation error.
                let missing = e
                    .as_service_error()
                    .and_then(|err| err.message())
                    .is_some_and(|msg| msg.contains("does not exist"));
                if missing {
                    StackOpsError::NotFound(stack_name.to_string())
                } else {
                    StackOpsError::Remote(describe(&e))
                }
            })?;

        let stack = output
            .stacks()
            .first()
            .ok_or_else(|| StackOpsError::NotFound(stack_name.to_string()))?;

        Ok(stack
            .outputs()
            .iter()
            .filter_map(|o| Some((o.output_key()?.to_string(), o.output_value()?.to_string())))
            .collect())
    }
}
