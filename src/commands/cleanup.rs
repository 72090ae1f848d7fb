// ABOUTME: Cleanup command implementation.
// ABOUTME: Applies the retention window to stored frontend versions outside of a deploy.

use super::connection::{connect, frontend_target};
use stagehand::cloud::Cloud;
use stagehand::config::Config;
use stagehand::diagnostics::{Diagnostics, Warning};
use stagehand::error::Result;
use stagehand::output::Output;
use stagehand::release::RetentionCleaner;

pub async fn cleanup(config: Config, mut output: Output) -> Result<()> {
    output.start_timer();
    let mut diag = Diagnostics::default();
    let cloud = connect(&config, &output).await;
    let target = frontend_target(&cloud, &config, &output).await?;

    output.progress(&format!(
        "  → Keeping the {} most recent versions...",
        config.retention
    ));
    let report = RetentionCleaner::new(cloud.objects())
        .cleanup(&target.bucket, config.retention)
        .await?;
    for prefix in &report.skipped {
        diag.warn(Warning::skipped_prefix(prefix));
    }
    for version in &report.deleted {
        output.progress(&format!("    Deleted {version}"));
    }

    diag.report(&output);

    output.success_with(
        &format!(
            "Deleted {} versions ({} objects), kept {}",
            report.deleted.len(),
            report.objects_deleted,
            report.retained.len()
        ),
        Some(&report),
    );
    Ok(())
}
