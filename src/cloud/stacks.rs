// ABOUTME: Infrastructure stack outputs trait.
// ABOUTME: Reads the key/value outputs a provisioned stack exports.

use async_trait::async_trait;
use std::collections::HashMap;

#[async_trait]
pub trait StackOps: Send + Sync {
    async fn stack_outputs(&self, stack_name: &str)
    -> Result<HashMap<String, String>, StackOpsError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StackOpsError {
    #[error("stack {0} does not exist")]
    NotFound(String),

    #[error("stack service error: {0}")]
    Remote(String),
}
