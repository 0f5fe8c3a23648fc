// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::MemoryQueue;
use lectern_core::test_support::{claimed_job, pending_job, FIXTURE_EPOCH_MS};
use lectern_core::{FakeClock, JobStatus, JobType};

#[tokio::test]
async fn claims_earliest_eligible_job() {
    let queue = MemoryQueue::new();
    let clock = FakeClock::at(FIXTURE_EPOCH_MS);

    let mut first = pending_job("job-1", JobType::Summarize);
    first.scheduled_at_ms = FIXTURE_EPOCH_MS - 10_000;
    queue.insert(first.clone()).await.unwrap();
    queue
        .insert(pending_job("job-2", JobType::Quiz))
        .await
        .unwrap();

    let claimed = claim_next(&queue, &clock).await.unwrap().unwrap();
    assert_eq!(claimed.id, first.id);
    assert_eq!(claimed.status, JobStatus::Processing);
    assert_eq!(claimed.attempts, 1);
    assert_eq!(claimed.started_at_ms, Some(FIXTURE_EPOCH_MS));
}

#[tokio::test]
async fn empty_queue_claims_nothing() {
    let queue = MemoryQueue::new();
    let clock = FakeClock::at(FIXTURE_EPOCH_MS);
    assert!(claim_next(&queue, &clock).await.unwrap().is_none());
}

#[tokio::test]
async fn future_jobs_are_not_claimed() {
    let queue = MemoryQueue::new();
    let clock = FakeClock::at(FIXTURE_EPOCH_MS);

    let mut job = pending_job("job-1", JobType::Summarize);
    job.scheduled_at_ms = FIXTURE_EPOCH_MS + 60_000;
    queue.insert(job.clone()).await.unwrap();

    assert!(claim_next(&queue, &clock).await.unwrap().is_none());

    clock.advance_ms(60_000);
    assert!(claim_next(&queue, &clock).await.unwrap().is_some());
}

#[tokio::test]
async fn lost_race_returns_none_without_side_effects() {
    let queue = MemoryQueue::new();
    let clock = FakeClock::at(FIXTURE_EPOCH_MS);

    // Row is already PROCESSING by the time we get to the guard.
    let busy = claimed_job("job-1", 1);
    queue.insert(busy.clone()).await.unwrap();

    assert!(claim_next(&queue, &clock).await.unwrap().is_none());
    assert_eq!(queue.get(&busy.id).await.unwrap().unwrap().attempts, 1);
}

#[tokio::test]
async fn successive_claims_drain_in_schedule_order() {
    let queue = MemoryQueue::new();
    let clock = FakeClock::at(FIXTURE_EPOCH_MS);

    for (id, offset) in [("job-c", 300u64), ("job-a", 100), ("job-b", 200)] {
        let mut job = pending_job(id, JobType::Summarize);
        job.scheduled_at_ms = FIXTURE_EPOCH_MS - offset;
        queue.insert(job).await.unwrap();
    }

    let mut order = Vec::new();
    while let Some(job) = claim_next(&queue, &clock).await.unwrap() {
        order.push(job.id.as_str().to_string());
    }
    assert_eq!(order, vec!["job-c", "job-b", "job-a"]);
}
