// ABOUTME: Validated domain types and typed resource identifiers.
// ABOUTME: Deploy versions, function versions, app and stage names.

mod id;
mod names;
mod version;

pub use id::{BucketName, DistributionId, FunctionName, Id, ParameterName};
pub use names::{AppName, NameError, Stage};
pub use version::{
    DEPLOY_ROOT, DeployVersion, FunctionVersion, LATEST_FUNCTION_VERSION, VersionError,
};
