// ABOUTME: SSM Parameter Store implementation.
// ABOUTME: Distinguishes a missing parameter from transport failures.

use super::describe;
use crate::cloud::{ParameterError, ParameterStore};
use crate::types::ParameterName;
use async_trait::async_trait;

#[derive(Clone)]
pub struct SsmParameters {
    client: aws_sdk_ssm::Client,
}

impl SsmParameters {
    pub fn new(client: aws_sdk_ssm::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ParameterStore for SsmParameters {
    async fn get_parameter(&self, name: &ParameterName) -> Result<String, ParameterError> {
        let output = self
            .client
            .get_parameter()
            .name(name.as_str())
            .send()
            .await
            .map_err(|e| match e.as_service_error() {
                Some(err) if err.is_parameter_not_found() => {
                    ParameterError::NotFound(name.to_string())
                }
                _ => ParameterError::Remote(describe(&e)),
            })?;

        output
            .parameter()
            .and_then(|p| p.value())
            .map(str::to_string)
            .ok_or_else(|| ParameterError::NotFound(name.to_string()))
    }

    async fn put_parameter(
        &self,
        name: &ParameterName,
        value: &str,
    ) -> Result<(), ParameterError> {
        self.client
            .put_parameter()
            .name(name.as_str())
            .value(value)
            .overwrite(true)
            .send()
            .await
            .map(|_| ())
            .map_err(|e| ParameterError::Remote(describe(&e)))
    }
}
