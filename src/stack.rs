// ABOUTME: Resolves the frontend's remote resources from provisioned stack outputs.
// ABOUTME: Bucket, distribution, and version parameter are required; the URL is optional.

use crate::cloud::{StackOps, StackOpsError};
use crate::release::FrontendTarget;
use crate::types::{BucketName, DistributionId, ParameterName};
use snafu::{ResultExt, Snafu};
use std::collections::HashMap;

pub const BUCKET_OUTPUT: &str = "BucketName";
pub const DISTRIBUTION_OUTPUT: &str = "DistributionId";
pub const VERSION_PARAMETER_OUTPUT: &str = "VersionParameterName";
pub const URL_OUTPUT: &str = "DistributionUrl";

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum StackError {
    #[snafu(display("could not read outputs of stack {stack}: {source}"))]
    Lookup {
        stack: String,
        source: StackOpsError,
    },

    #[snafu(display(
        "stack {stack} is missing outputs: {}; make sure the infrastructure is deployed",
        missing.join(", ")
    ))]
    MissingOutputs {
        stack: String,
        missing: Vec<&'static str>,
    },
}

impl StackError {
    /// Missing outputs mean the infrastructure is not in place yet, which the
    /// operator must fix before re-running.
    pub fn is_precondition(&self) -> bool {
        match self {
            StackError::MissingOutputs { .. } => true,
            StackError::Lookup { source, .. } => matches!(source, StackOpsError::NotFound(_)),
        }
    }
}

/// Read `stack`'s outputs and build the frontend target from them.
pub async fn resolve_frontend_target<S: StackOps>(
    stacks: &S,
    stack: &str,
) -> Result<FrontendTarget, StackError> {
    tracing::debug!(stack, "reading stack outputs");
    let outputs = stacks.stack_outputs(stack).await.context(LookupSnafu { stack })?;
    from_outputs(stack, &outputs)
}

/// Build the frontend target from an output map, naming every missing key.
pub fn from_outputs(
    stack: &str,
    outputs: &HashMap<String, String>,
) -> Result<FrontendTarget, StackError> {
    let get = |key: &str| outputs.get(key).filter(|v| !v.is_empty()).cloned();

    let bucket = get(BUCKET_OUTPUT);
    let distribution = get(DISTRIBUTION_OUTPUT);
    let version_parameter = get(VERSION_PARAMETER_OUTPUT);

    match (bucket, distribution, version_parameter) {
        (Some(bucket), Some(distribution), Some(version_parameter)) => Ok(FrontendTarget {
            bucket: BucketName::new(bucket),
            distribution: DistributionId::new(distribution),
            version_parameter: ParameterName::new(version_parameter),
            url: get(URL_OUTPUT),
        }),
        (bucket, distribution, version_parameter) => {
            let missing = [
                (BUCKET_OUTPUT, bucket.is_none()),
                (DISTRIBUTION_OUTPUT, distribution.is_none()),
                (VERSION_PARAMETER_OUTPUT, version_parameter.is_none()),
            ]
            .into_iter()
            .filter_map(|(key, absent)| absent.then_some(key))
            .collect::<Vec<_>>();
            MissingOutputsSnafu { stack, missing }.fail()
        }
    }
}
