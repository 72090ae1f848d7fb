// ABOUTME: Deploy command implementation.
// ABOUTME: Checks the build output, resolves the stack, and runs the release pipeline.

use super::connection::{connect, frontend_target};
use stagehand::config::Config;
use stagehand::diagnostics::Diagnostics;
use stagehand::error::Result;
use stagehand::output::Output;
use stagehand::release::{deploy_frontend, ensure_build_output};

/// Publish the frontend build for the configured stage.
pub async fn deploy(config: Config, mut output: Output) -> Result<()> {
    output.start_timer();
    let mut diag = Diagnostics::default();

    output.progress(&format!(
        "Deploying {} frontend to {}",
        config.app, config.stage
    ));

    // Local check first so a missing build never reaches the network.
    let files = ensure_build_output(&config.build_dir)?;
    output.progress(&format!(
        "  → Found {files} files in {}",
        config.build_dir.display()
    ));

    let cloud = connect(&config, &output).await;
    let target = frontend_target(&cloud, &config, &output).await?;

    let result = deploy_frontend(
        &cloud,
        target,
        &config.build_dir,
        config.retention,
        &output,
        &mut diag,
    )
    .await;
    // Reported on failure too.
    diag.report(&output);
    let report = result?;

    if let Some(url) = &report.release.url {
        output.progress(&format!("  ✓ URL: {url}"));
    }
    output.success_with(
        &format!(
            "Deployed frontend {} to {}",
            report.release.version, config.stage
        ),
        Some(&report),
    );
    Ok(())
}
