// ABOUTME: Function platform operations trait.
// ABOUTME: Lists functions and versions, reads and repoints stage aliases.

use super::ListPage;
use crate::types::{FunctionName, FunctionVersion};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Listing entry for one function version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedVersion {
    pub version: FunctionVersion,
    pub description: String,
    pub last_modified: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait FunctionOps: Send + Sync {
    async fn list_functions(
        &self,
        marker: Option<String>,
    ) -> Result<ListPage<FunctionName>, FunctionError>;

    /// List versions of one function, including the mutable head.
    async fn list_versions(
        &self,
        function: &FunctionName,
        marker: Option<String>,
    ) -> Result<ListPage<PublishedVersion>, FunctionError>;

    /// Version an alias points at. A missing alias is `FunctionError::AliasNotFound`.
    async fn get_alias(
        &self,
        function: &FunctionName,
        alias: &str,
    ) -> Result<FunctionVersion, FunctionError>;

    async fn update_alias(
        &self,
        function: &FunctionName,
        alias: &str,
        version: FunctionVersion,
    ) -> Result<(), FunctionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FunctionError {
    #[error("alias {alias} not found on {function}")]
    AliasNotFound { function: String, alias: String },

    #[error("unexpected version identifier from platform: {0}")]
    InvalidVersion(String),

    #[error("function platform error: {0}")]
    Remote(String),
}
