// ABOUTME: AWS SDK implementations of the cloud capability traits.
// ABOUTME: S3, CloudFront, SSM, Lambda, and CloudFormation clients built from one shared config.

mod cloudformation;
mod cloudfront;
mod lambda;
mod s3;
mod ssm;

pub use cloudformation::CloudFormationStacks;
pub use cloudfront::CloudFrontDistributions;
pub use lambda::LambdaFunctions;
pub use s3::S3Objects;
pub use ssm::SsmParameters;

use super::Cloud;
use aws_config::{BehaviorVersion, Region};

/// Where and as whom to talk to AWS.
#[derive(Debug, Clone)]
pub struct AwsTarget {
    pub region: String,
    pub profile: Option<String>,
}

/// Every client a deploy or rollback run needs, built once per run.
#[derive(Clone)]
pub struct AwsClients {
    pub objects: S3Objects,
    pub distributions: CloudFrontDistributions,
    pub parameters: SsmParameters,
    pub functions: LambdaFunctions,
    pub stacks: CloudFormationStacks,
}

impl AwsClients {
    /// Load the shared SDK configuration and construct the service clients.
    ///
    /// Credentials are resolved lazily by the SDK, so this never touches the
    /// network; the first remote call does.
    pub async fn connect(target: &AwsTarget) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(target.region.clone()));
        if let Some(profile) = &target.profile {
            loader = loader.profile_name(profile);
        }
        let shared = loader.load().await;
        tracing::debug!(
            region = %target.region,
            profile = ?target.profile,
            "loaded AWS configuration"
        );

        Self {
            objects: S3Objects::new(aws_sdk_s3::Client::new(&shared)),
            distributions: CloudFrontDistributions::new(aws_sdk_cloudfront::Client::new(&shared)),
            parameters: SsmParameters::new(aws_sdk_ssm::Client::new(&shared)),
            functions: LambdaFunctions::new(aws_sdk_lambda::Client::new(&shared)),
            stacks: CloudFormationStacks::new(aws_sdk_cloudformation::Client::new(&shared)),
        }
    }
}

/// Render an SDK error with its full source chain.
pub(crate) fn describe(err: &(impl std::error::Error + 'static)) -> String {
    aws_sdk_s3::error::DisplayErrorContext(err).to_string()
}

impl Cloud for AwsClients {
    type Objects = S3Objects;
    type Parameters = SsmParameters;
    type Cdn = CloudFrontDistributions;
    type Functions = LambdaFunctions;
    type Stacks = CloudFormationStacks;

    fn objects(&self) -> &S3Objects {
        &self.objects
    }

    fn parameters(&self) -> &SsmParameters {
        &self.parameters
    }

    fn cdn(&self) -> &CloudFrontDistributions {
        &self.distributions
    }

    fn functions(&self) -> &LambdaFunctions {
        &self.functions
    }

    fn stacks(&self) -> &CloudFormationStacks {
        &self.stacks
    }
}
