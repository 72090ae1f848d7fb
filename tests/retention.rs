// ABOUTME: Integration tests for version retention cleanup.
// ABOUTME: Checks which versions survive, batching of deletes, and idempotence.

mod support;

use proptest::prelude::*;
use stagehand::config::Retention;
use stagehand::release::RetentionCleaner;
use stagehand::types::BucketName;
use support::{Call, FakeCloud};

fn bucket() -> BucketName {
    BucketName::new(support::BUCKET)
}

fn numbers(versions: &[stagehand::types::DeployVersion]) -> Vec<u64> {
    versions.iter().map(|v| v.get()).collect()
}

#[tokio::test]
async fn seven_versions_retain_five() {
    let cloud = FakeCloud::with_versions(&[1, 2, 3, 4, 5, 6, 7], 7);

    let report = RetentionCleaner::new(&cloud)
        .cleanup(&bucket(), Retention::new(5).unwrap())
        .await
        .unwrap();

    assert_eq!(numbers(&report.deleted), vec![2, 1]);
    assert_eq!(numbers(&report.retained), vec![7, 6, 5, 4, 3]);
    assert_eq!(report.objects_deleted, 6);
    assert_eq!(cloud.stored_versions(), vec![3, 4, 5, 6, 7]);
}

#[tokio::test]
async fn second_run_deletes_nothing() {
    let cloud = FakeCloud::with_versions(&[1, 2, 3, 4], 4);
    let cleaner = RetentionCleaner::new(&cloud);
    let retention = Retention::new(2).unwrap();

    cleaner.cleanup(&bucket(), retention).await.unwrap();
    cloud.clear_calls();
    let second = cleaner.cleanup(&bucket(), retention).await.unwrap();

    assert!(second.deleted.is_empty());
    assert!(cloud.mutations().is_empty());
}

#[tokio::test]
async fn ordering_is_numeric_not_lexical() {
    let cloud = FakeCloud::with_versions(&[9, 10, 11], 11);

    let report = RetentionCleaner::new(&cloud)
        .cleanup(&bucket(), Retention::new(2).unwrap())
        .await
        .unwrap();

    assert_eq!(numbers(&report.deleted), vec![9]);
    assert_eq!(cloud.stored_versions(), vec![10, 11]);
}

#[tokio::test]
async fn large_versions_are_deleted_in_bounded_batches() {
    let cloud = FakeCloud::with_versions(&[2], 2);
    cloud.with(|w| {
        for i in 0..2500 {
            w.objects.insert(
                format!("deploys/v1/chunk-{i:04}.js"),
                (Vec::new(), "text/javascript".to_string()),
            );
        }
    });

    let report = RetentionCleaner::new(&cloud)
        .cleanup(&bucket(), Retention::new(1).unwrap())
        .await
        .unwrap();

    assert_eq!(report.objects_deleted, 2500);
    let batches: Vec<usize> = cloud
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::DeleteObjects(n) => Some(n),
            _ => None,
        })
        .collect();
    assert_eq!(batches, vec![1000, 1000, 500]);
    assert_eq!(cloud.stored_versions(), vec![2]);
}

#[tokio::test]
async fn delete_lists_only_the_version_prefix() {
    let cloud = FakeCloud::with_versions(&[1, 10], 10);

    RetentionCleaner::new(&cloud)
        .cleanup(&bucket(), Retention::new(1).unwrap())
        .await
        .unwrap();

    // `deploys/v1` must not match `deploys/v10/...`.
    assert!(
        cloud
            .calls()
            .contains(&Call::ListKeys("deploys/v1/".to_string()))
    );
    assert_eq!(cloud.stored_versions(), vec![10]);
}

proptest! {
    #[test]
    fn keeps_min_of_count_and_retention_highest(
        count in 0u64..12,
        keep in 1usize..8,
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let all: Vec<u64> = (1..=count).collect();
        let cloud = FakeCloud::with_versions(&all, count.max(1));

        runtime
            .block_on(
                RetentionCleaner::new(&cloud).cleanup(&bucket(), Retention::new(keep).unwrap()),
            )
            .unwrap();

        let expected: Vec<u64> = all.iter().copied().skip(all.len().saturating_sub(keep)).collect();
        prop_assert_eq!(cloud.stored_versions(), expected);
    }
}
