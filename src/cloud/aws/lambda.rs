// ABOUTME: Lambda-backed function platform operations.
// ABOUTME: Marker-paginated listings plus alias reads and updates.

use super::describe;
use crate::cloud::{FunctionError, FunctionOps, ListPage, PublishedVersion};
use crate::types::{FunctionName, FunctionVersion};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Timestamp layout Lambda uses for `LastModified`, e.g. `2024-03-01T09:15:00.123+0000`.
const LAST_MODIFIED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

#[derive(Clone)]
pub struct LambdaFunctions {
    client: aws_sdk_lambda::Client,
}

impl LambdaFunctions {
    pub fn new(client: aws_sdk_lambda::Client) -> Self {
        Self { client }
    }
}

fn parse_last_modified(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(raw, LAST_MODIFIED_FORMAT)
        .map(|t| t.with_timezone(&Utc))
        .ok()
}

fn parse_version(raw: Option<&str>) -> Result<FunctionVersion, FunctionError> {
    let raw = raw.unwrap_or_default();
    raw.parse()
        .map_err(|_| FunctionError::InvalidVersion(raw.to_string()))
}

#[async_trait]
impl FunctionOps for LambdaFunctions {
    async fn list_functions(
        &self,
        marker: Option<String>,
    ) -> Result<ListPage<FunctionName>, FunctionError> {
        let output = self
            .client
            .list_functions()
            .set_marker(marker)
            .send()
            .await
            .map_err(|e| FunctionError::Remote(describe(&e)))?;

        let items = output
            .functions()
            .iter()
            .filter_map(|f| f.function_name().map(FunctionName::new))
            .collect();

        Ok(ListPage {
            items,
            next: output.next_marker().map(str::to_string),
        })
    }

    async fn list_versions(
        &self,
        function: &FunctionName,
        marker: Option<String>,
    ) -> Result<ListPage<PublishedVersion>, FunctionError> {
        let output = self
            .client
            .list_versions_by_function()
            .function_name(function.as_str())
            .set_marker(marker)
            .send()
            .await
            .map_err(|e| FunctionError::Remote(describe(&e)))?;

        let items = output
            .versions()
            .iter()
            .map(|v| {
                Ok(PublishedVersion {
                    version: parse_version(v.version())?,
                    description: v.description().unwrap_or_default().to_string(),
                    last_modified: v.last_modified().and_then(parse_last_modified),
                })
            })
            .collect::<Result<Vec<_>, FunctionError>>()?;

        Ok(ListPage {
            items,
            next: output.next_marker().map(str::to_string),
        })
    }

    async fn get_alias(
        &self,
        function: &FunctionName,
        alias: &str,
    ) -> Result<FunctionVersion, FunctionError> {
        let output = self
            .client
            .get_alias()
            .function_name(function.as_str())
            .name(alias)
            .send()
            .await
            .map_err(|e| match e.as_service_error() {
                Some(err) if err.is_resource_not_found_exception() => {
                    FunctionError::AliasNotFound {
                        function: function.to_string(),
                        alias: alias.to_string(),
                    }
                }
                _ => FunctionError::Remote(describe(&e)),
            })?;

        parse_version(output.function_version())
    }

    async fn update_alias(
        &self,
        function: &FunctionName,
        alias: &str,
        version: FunctionVersion,
    ) -> Result<(), FunctionError> {
        self.client
            .update_alias()
            .function_name(function.as_str())
            .name(alias)
            .function_version(version.to_platform_string())
            .send()
            .await
            .map(|_| ())
            .map_err(|e| FunctionError::Remote(describe(&e)))
    }
}
