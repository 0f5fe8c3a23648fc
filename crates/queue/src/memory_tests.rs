// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use lectern_core::test_support::{claimed_job, pending_job, FIXTURE_EPOCH_MS};
use lectern_core::JobType;

#[tokio::test]
async fn insert_is_idempotent() {
    let queue = MemoryQueue::new();
    let job = pending_job("job-1", JobType::Summarize);
    let mut replay = job.clone();
    replay.attempts = 9;

    queue.insert(job.clone()).await.unwrap();
    queue.insert(replay).await.unwrap();

    assert_eq!(queue.len(), 1);
    assert_eq!(queue.get(&job.id).await.unwrap().unwrap().attempts, 0);
}

#[tokio::test]
async fn eligibility_respects_schedule_and_order() {
    let queue = MemoryQueue::new();
    let mut early = pending_job("job-early", JobType::Summarize);
    early.scheduled_at_ms = FIXTURE_EPOCH_MS - 500;
    let late = {
        let mut j = pending_job("job-late", JobType::Quiz);
        j.scheduled_at_ms = FIXTURE_EPOCH_MS + 60_000;
        j
    };
    queue.insert(late).await.unwrap();
    queue.insert(early.clone()).await.unwrap();

    let picked = queue
        .find_eligible_pending(FIXTURE_EPOCH_MS)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(picked.id, early.id);

    // Nothing due yet at an earlier instant.
    assert!(queue
        .find_eligible_pending(FIXTURE_EPOCH_MS - 1_000)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn eligible_ties_break_deterministically() {
    let queue = MemoryQueue::new();
    queue
        .insert(pending_job("job-b", JobType::Quiz))
        .await
        .unwrap();
    queue
        .insert(pending_job("job-a", JobType::Summarize))
        .await
        .unwrap();

    let picked = queue
        .find_eligible_pending(FIXTURE_EPOCH_MS)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(picked.id.as_str(), "job-a");
}

#[tokio::test]
async fn claim_transitions_and_increments_once() {
    let queue = MemoryQueue::new();
    let job = pending_job("job-1", JobType::Summarize);
    queue.insert(job.clone()).await.unwrap();

    let affected = queue
        .conditional_claim(&job.id, FIXTURE_EPOCH_MS + 10)
        .await
        .unwrap();
    assert_eq!(affected, 1);

    let claimed = queue.get(&job.id).await.unwrap().unwrap();
    assert_eq!(claimed.status, lectern_core::JobStatus::Processing);
    assert_eq!(claimed.attempts, 1);
    assert_eq!(claimed.started_at_ms, Some(FIXTURE_EPOCH_MS + 10));
}

#[tokio::test]
async fn claim_of_processing_row_affects_zero() {
    let queue = MemoryQueue::new();
    let job = claimed_job("job-1", 1);
    queue.insert(job.clone()).await.unwrap();

    let affected = queue
        .conditional_claim(&job.id, FIXTURE_EPOCH_MS)
        .await
        .unwrap();
    assert_eq!(affected, 0);
    // No side effects on the losing path.
    assert_eq!(queue.get(&job.id).await.unwrap().unwrap().attempts, 1);
}

#[tokio::test]
async fn claim_of_missing_row_affects_zero() {
    let queue = MemoryQueue::new();
    let affected = queue
        .conditional_claim(&"ghost".into(), FIXTURE_EPOCH_MS)
        .await
        .unwrap();
    assert_eq!(affected, 0);
}

#[tokio::test]
async fn concurrent_claims_exactly_one_wins() {
    let queue = MemoryQueue::new();
    let job = pending_job("job-contended", JobType::Summarize);
    queue.insert(job.clone()).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let queue = queue.clone();
        let id = job.id.clone();
        handles.push(tokio::spawn(async move {
            queue.conditional_claim(&id, FIXTURE_EPOCH_MS).await
        }));
    }

    let mut winners = 0u64;
    for handle in handles {
        winners += handle.await.unwrap().unwrap();
    }
    assert_eq!(winners, 1);
    assert_eq!(queue.get(&job.id).await.unwrap().unwrap().attempts, 1);
}

#[tokio::test]
async fn update_missing_job_errors() {
    let queue = MemoryQueue::new();
    let err = queue
        .update(&"ghost".into(), Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::JobNotFound(_)));
}

#[tokio::test]
async fn processing_older_than_requires_started_at() {
    let queue = MemoryQueue::new();
    let stale = lectern_core::test_support::stale_processing_job("job-stale", 1, 100);
    let fresh = claimed_job("job-fresh", 1);
    queue.insert(stale.clone()).await.unwrap();
    queue.insert(fresh).await.unwrap();

    let found = queue.find_processing_older_than(1_000).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, stale.id);
}

#[tokio::test]
async fn pending_at_ceiling_filters_status_and_attempts() {
    let queue = MemoryQueue::new();
    let mut exhausted = pending_job("job-exhausted", JobType::Quiz);
    exhausted.attempts = 5;
    queue.insert(exhausted.clone()).await.unwrap();
    queue
        .insert(pending_job("job-fresh", JobType::Quiz))
        .await
        .unwrap();
    queue.insert(claimed_job("job-busy", 5)).await.unwrap();

    let found = queue.find_pending_at_attempt_ceiling(5).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, exhausted.id);
}
