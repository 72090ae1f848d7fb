// ABOUTME: Parameter store operations trait.
// ABOUTME: Reads and overwrites single string parameters.

use crate::types::ParameterName;
use async_trait::async_trait;

#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Read a parameter. A missing key is `ParameterError::NotFound`.
    async fn get_parameter(&self, name: &ParameterName) -> Result<String, ParameterError>;

    /// Overwrite a parameter unconditionally.
    async fn put_parameter(&self, name: &ParameterName, value: &str)
    -> Result<(), ParameterError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ParameterError {
    #[error("parameter not found: {0}")]
    NotFound(String),

    #[error("parameter {name} holds an invalid version: {value:?}")]
    InvalidValue { name: String, value: String },

    #[error("parameter store error: {0}")]
    Remote(String),
}
