// ABOUTME: Status command implementation.
// ABOUTME: Shows the active frontend version and every version kept in storage.

use super::connection::{connect, frontend_target};
use serde::Serialize;
use stagehand::cloud::Cloud;
use stagehand::config::Config;
use stagehand::diagnostics::{Diagnostics, Warning};
use stagehand::error::Result;
use stagehand::output::Output;
use stagehand::release::{VersionStore, list_deploy_versions};
use stagehand::types::DeployVersion;

#[derive(Serialize)]
struct StatusReport<'a> {
    stage: &'a str,
    current: Option<DeployVersion>,
    versions: &'a [DeployVersion],
    url: Option<&'a str>,
}

pub async fn status(config: Config, output: Output) -> Result<()> {
    let mut diag = Diagnostics::default();
    let cloud = connect(&config, &output).await;
    let target = frontend_target(&cloud, &config, &output).await?;

    let current = VersionStore::new(cloud.parameters(), &target.version_parameter)
        .read()
        .await?;
    let listing = list_deploy_versions(cloud.objects(), &target.bucket).await?;
    for prefix in &listing.skipped {
        diag.warn(Warning::skipped_prefix(prefix));
    }

    output.progress(&format!("\nAvailable frontend versions ({}):", config.stage));
    for version in &listing.versions {
        let marker = if Some(*version) == current { " (current)" } else { "" };
        output.progress(&format!("  {version}{marker}"));
    }
    if let Some(url) = &target.url {
        output.progress(&format!("URL: {url}"));
    }

    diag.report(&output);

    let message = match current {
        Some(version) => format!(
            "Current frontend version: {version} ({} available)",
            listing.versions.len()
        ),
        None => "No frontend version deployed".to_string(),
    };
    let report = StatusReport {
        stage: config.stage.as_str(),
        current,
        versions: &listing.versions,
        url: target.url.as_deref(),
    };
    output.success_with(&message, Some(&report));
    Ok(())
}
