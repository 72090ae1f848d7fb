// ABOUTME: Tests for release state transitions.
// ABOUTME: Checks transition signatures and the remote calls each step makes.

mod support;

use stagehand::release::{
    Allocated, Committed, Live, Planned, Published, Release, ReleaseError, ReleaseSummary,
    Switched,
};
use stagehand::types::DeployVersion;
use support::{Call, FakeCloud};

// =============================================================================
// Transition Type Signature Tests
// =============================================================================

/// Test: Verifies the type signatures of all transition methods compile correctly.
#[test]
fn transition_type_signatures_compile() {
    use stagehand::cloud::{DistributionOps, ObjectStore, ParameterStore};
    use stagehand::release::FrontendTarget;
    use std::path::Path;

    // This function is never called, but it must compile.
    #[allow(dead_code)]
    async fn check_signatures<S: ObjectStore, P: ParameterStore, C: DistributionOps>(
        objects: &S,
        parameters: &P,
        cdn: &C,
        target: FrontendTarget,
    ) {
        // Planned -> Allocated
        let r1: Release<Planned> = Release::new(target);
        let r2: Result<Release<Allocated>, ReleaseError> = r1.allocate(parameters).await;

        // Allocated -> Published
        let r3: Result<Release<Published>, ReleaseError> =
            r2.unwrap().publish(objects, Path::new("dist")).await;

        // Published -> Switched
        let r4: Result<Release<Switched>, ReleaseError> = r3.unwrap().switch_origin(cdn).await;

        // Switched -> Live
        let r5: Result<Release<Live>, ReleaseError> = r4.unwrap().invalidate(cdn).await;

        // Live -> Committed
        let r6: Result<Release<Committed>, ReleaseError> = r5.unwrap().commit(parameters).await;

        // Committed - terminal state
        let _summary: ReleaseSummary = r6.unwrap().finish();
    }
}

/// Test: Restore enters at Published with the chosen version.
#[test]
fn restore_starts_published() {
    let version = DeployVersion::new(4).unwrap();
    let release: Release<Published> =
        Release::restore(FakeCloud::target(), version, DeployVersion::new(6));

    assert_eq!(release.version(), version);
    assert_eq!(release.uploaded(), 0);
    assert_eq!(release.target().bucket.as_str(), support::BUCKET);
}

/// Test: A restored release runs switch, invalidate, commit and nothing else.
#[tokio::test]
async fn restore_touches_only_cdn_and_pointer() {
    let cloud = FakeCloud::with_versions(&[4, 5, 6], 6);
    let version = DeployVersion::new(4).unwrap();

    let summary = Release::restore(FakeCloud::target(), version, DeployVersion::new(6))
        .switch_origin(&cloud)
        .await
        .unwrap()
        .invalidate(&cloud)
        .await
        .unwrap()
        .commit(&cloud)
        .await
        .unwrap()
        .finish();

    assert_eq!(summary.version, version);
    assert_eq!(summary.previous, DeployVersion::new(6));
    assert_eq!(summary.origin_path, "/deploys/v4");
    assert_eq!(summary.previous_origin.as_deref(), Some("/deploys/v6"));
    assert!(!summary.invalidation.is_empty());
    assert_eq!(
        cloud.calls(),
        vec![
            Call::GetDistributionConfig,
            Call::UpdateDistribution("/deploys/v4".to_string()),
            Call::CreateInvalidation(vec!["/*".to_string()]),
            Call::PutParameter("4".to_string()),
        ]
    );
    assert_eq!(cloud.stored_versions(), vec![4, 5, 6]);
}

/// Test: Allocation reads the pointer but never writes it.
#[tokio::test]
async fn allocate_is_read_only() {
    let cloud = FakeCloud::with_versions(&[1, 2], 2);

    let release = Release::new(FakeCloud::target())
        .allocate(&cloud)
        .await
        .unwrap();

    assert_eq!(release.version().get(), 3);
    assert_eq!(release.previous(), DeployVersion::new(2));
    assert_eq!(cloud.calls(), vec![Call::GetParameter]);
}
