// ABOUTME: Runs a full frontend deploy through the release state machine.
// ABOUTME: Allocate, publish, switch origin, invalidate, commit, then prune old versions.

use super::error::ReleaseError;
use super::lifecycle::{Release, ReleaseSummary};
use super::publisher::plan_uploads;
use super::retention::{CleanupReport, RetentionCleaner};
use super::target::FrontendTarget;
use crate::cloud::Cloud;
use crate::config::Retention;
use crate::diagnostics::{Diagnostics, Warning};
use crate::output::Output;
use crate::types::DEPLOY_ROOT;
use serde::Serialize;
use std::path::Path;

/// Everything a finished deploy did.
#[derive(Debug, Clone, Serialize)]
pub struct DeployReport {
    #[serde(flatten)]
    pub release: ReleaseSummary,
    pub cleanup: CleanupReport,
}

/// Check the build output locally; returns the number of files to publish.
///
/// Call this before resolving any remote resource so a missing build fails
/// without a network round trip.
pub fn ensure_build_output(build_dir: &Path) -> Result<usize, ReleaseError> {
    plan_uploads(build_dir, DEPLOY_ROOT).map(|uploads| uploads.len())
}

/// Publish `build_dir` as the next version and make it live.
///
/// Steps run strictly in order. The version pointer is written only after
/// the origin switch and invalidation succeed; cleanup runs last and a
/// cleanup failure still fails the run, with the new version already live.
pub async fn deploy_frontend<C: Cloud>(
    cloud: &C,
    target: FrontendTarget,
    build_dir: &Path,
    retention: Retention,
    output: &Output,
    diag: &mut Diagnostics,
) -> Result<DeployReport, ReleaseError> {
    if target.url.is_none() {
        diag.warn(Warning::missing_url(&target.distribution));
    }

    let release = Release::new(target).allocate(cloud.parameters()).await?;
    match release.previous() {
        Some(previous) => output.progress(&format!("  → Current version: {previous}")),
        None => output.progress("  → No previous version (first deploy)"),
    }
    output.progress(&format!("  → New version: {}", release.version()));

    output.progress(&format!(
        "  → Uploading build output to s3://{}/{}/",
        release.target().bucket,
        release.version().prefix()
    ));
    let release = release.publish(cloud.objects(), build_dir).await?;
    output.progress(&format!("  ✓ Uploaded {} files", release.uploaded()));

    output.progress("  → Switching CDN origin...");
    let release = release.switch_origin(cloud.cdn()).await?;

    output.progress("  → Invalidating cache...");
    let release = release.invalidate(cloud.cdn()).await?;

    output.progress("  → Recording version...");
    let bucket = release.target().bucket.clone();
    let release = release.commit(cloud.parameters()).await?.finish();
    output.progress(&format!("  ✓ {} is live", release.version));

    output.progress(&format!("  → Keeping the {retention} most recent versions..."));
    let cleanup = RetentionCleaner::new(cloud.objects())
        .cleanup(&bucket, retention)
        .await?;
    for prefix in &cleanup.skipped {
        diag.warn(Warning::skipped_prefix(prefix));
    }
    for version in &cleanup.deleted {
        output.progress(&format!("    Deleted {version}"));
    }

    Ok(DeployReport { release, cleanup })
}
