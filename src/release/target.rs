// ABOUTME: The remote resources a frontend release is published through.
// ABOUTME: Resolved once per run from the frontend stack's outputs.

use crate::types::{BucketName, DistributionId, ParameterName};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrontendTarget {
    pub bucket: BucketName,
    pub distribution: DistributionId,
    pub version_parameter: ParameterName,
    /// Public URL, shown to the operator after a deploy.
    pub url: Option<String>,
}
