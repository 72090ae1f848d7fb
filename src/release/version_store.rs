// ABOUTME: Current-version pointer kept in the parameter store.
// ABOUTME: A missing parameter means nothing has been deployed yet.

use super::ReleaseError;
use crate::cloud::{ParameterError, ParameterStore};
use crate::types::{DeployVersion, ParameterName};

/// Reads and writes the stage's current frontend version.
///
/// Writes are unconditional (last writer wins); runs against one stage are
/// expected to be serialized by the operator.
pub struct VersionStore<'a, P> {
    store: &'a P,
    key: &'a ParameterName,
}

impl<'a, P: ParameterStore> VersionStore<'a, P> {
    pub fn new(store: &'a P, key: &'a ParameterName) -> Self {
        Self { store, key }
    }

    /// Current version, `None` when nothing has been deployed.
    ///
    /// Only a missing parameter maps to `None`. Any other read failure is
    /// returned, so a transient error can never restart numbering at 1.
    pub async fn read(&self) -> Result<Option<DeployVersion>, ReleaseError> {
        let raw = match self.store.get_parameter(self.key).await {
            Ok(raw) => raw,
            Err(ParameterError::NotFound(_)) => {
                tracing::debug!(
                    parameter = %self.key,
                    "version parameter not found, treating as 0"
                );
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let raw = raw.trim();
        if raw == "0" {
            return Ok(None);
        }
        raw.parse::<DeployVersion>()
            .map(Some)
            .map_err(|_| {
                ParameterError::InvalidValue {
                    name: self.key.to_string(),
                    value: raw.to_string(),
                }
                .into()
            })
    }

    pub async fn write(&self, version: DeployVersion) -> Result<(), ReleaseError> {
        tracing::debug!(parameter = %self.key, %version, "writing version pointer");
        self.store
            .put_parameter(self.key, &version.get().to_string())
            .await?;
        Ok(())
    }
}
