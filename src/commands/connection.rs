// ABOUTME: Shared setup for commands that talk to AWS.
// ABOUTME: Builds the clients and resolves the frontend stack for the configured stage.

use stagehand::cloud::Cloud;
use stagehand::cloud::aws::AwsClients;
use stagehand::config::Config;
use stagehand::error::Result;
use stagehand::output::Output;
use stagehand::release::FrontendTarget;
use stagehand::stack::resolve_frontend_target;

/// Build the AWS clients for this run.
pub async fn connect(config: &Config, output: &Output) -> AwsClients {
    output.progress(&format!(
        "  → Using account {} in {}",
        config.account, config.region
    ));
    AwsClients::connect(&config.aws_target()).await
}

/// Read the frontend stack outputs.
pub async fn frontend_target<C: Cloud>(
    cloud: &C,
    config: &Config,
    output: &Output,
) -> Result<FrontendTarget> {
    output.progress(&format!(
        "  → Reading outputs of {}...",
        config.frontend_stack
    ));
    Ok(resolve_frontend_target(cloud.stacks(), &config.frontend_stack).await?)
}
