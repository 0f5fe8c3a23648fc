// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use lectern_core::test_support::{pending_job, FIXTURE_EPOCH_MS};
use lectern_core::JobType;

fn temp_queue() -> (tempfile::TempDir, FileQueue) {
    let dir = tempfile::tempdir().unwrap();
    let queue = FileQueue::new(dir.path().join("jobs.json"));
    (dir, queue)
}

#[tokio::test]
async fn missing_file_reads_as_empty() {
    let (_dir, queue) = temp_queue();
    assert!(queue
        .find_eligible_pending(FIXTURE_EPOCH_MS)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn rows_survive_a_new_handle() {
    let (_dir, queue) = temp_queue();
    let job = pending_job("job-1", JobType::Summarize);
    queue.insert(job.clone()).await.unwrap();

    // A second handle over the same path sees the same durable state, the
    // way a separate sweep process would.
    let other = FileQueue::new(queue.path());
    let found = other.get(&job.id).await.unwrap().unwrap();
    assert_eq!(found, job);
}

#[tokio::test]
async fn claim_round_trips_through_disk() {
    let (_dir, queue) = temp_queue();
    let job = pending_job("job-1", JobType::Quiz);
    queue.insert(job.clone()).await.unwrap();

    assert_eq!(
        queue
            .conditional_claim(&job.id, FIXTURE_EPOCH_MS + 5)
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        queue
            .conditional_claim(&job.id, FIXTURE_EPOCH_MS + 6)
            .await
            .unwrap(),
        0
    );

    let claimed = queue.get(&job.id).await.unwrap().unwrap();
    assert_eq!(claimed.status, lectern_core::JobStatus::Processing);
    assert_eq!(claimed.attempts, 1);
    assert_eq!(claimed.started_at_ms, Some(FIXTURE_EPOCH_MS + 5));
}

#[tokio::test]
async fn concurrent_handles_race_one_winner() {
    let (_dir, queue) = temp_queue();
    let job = pending_job("job-contended", JobType::Summarize);
    queue.insert(job.clone()).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = FileQueue::new(queue.path());
        let id = job.id.clone();
        handles.push(tokio::spawn(async move {
            store.conditional_claim(&id, FIXTURE_EPOCH_MS).await
        }));
    }

    let mut winners = 0u64;
    for handle in handles {
        winners += handle.await.unwrap().unwrap();
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn update_missing_job_errors() {
    let (_dir, queue) = temp_queue();
    let err = queue
        .update(&"ghost".into(), Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::JobNotFound(_)));
}

#[tokio::test]
async fn corrupt_file_surfaces_as_unavailable() {
    let (_dir, queue) = temp_queue();
    std::fs::write(queue.path(), b"not json").unwrap();

    let err = queue
        .find_eligible_pending(FIXTURE_EPOCH_MS)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));
}
