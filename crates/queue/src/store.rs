// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queue-store contract consumed by the worker loop and the recovery sweep.

use async_trait::async_trait;
use lectern_core::{JobId, JobRun, JobUpdate};
use thiserror::Error;

/// Errors surfaced by a queue-store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("job not found: {0}")]
    JobNotFound(JobId),
    /// Backend unreachable or rejected the operation. The worker loop logs
    /// this and backs off rather than terminating.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistent job-queue store.
///
/// The contract every backend must preserve: `conditional_claim` is a single
/// atomic conditional write (`UPDATE ... WHERE id = ? AND status = 'PENDING'`
/// or an equivalent compare-and-swap), and `update` applies its whole field
/// set in one round trip so no other worker observes it half-applied.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Enqueue a new row. Inserting an id that already exists is a no-op so
    /// trigger-side retries stay idempotent.
    async fn insert(&self, job: JobRun) -> Result<(), StoreError>;

    /// The PENDING job with the earliest `scheduled_at_ms <= now_ms`, if any.
    async fn find_eligible_pending(&self, now_ms: u64) -> Result<Option<JobRun>, StoreError>;

    /// Attempt the PENDING→PROCESSING transition for one specific row,
    /// setting `started_at_ms = now_ms` and incrementing `attempts`, guarded
    /// by the precondition that the status is still PENDING at update time.
    ///
    /// Returns the affected-row count: 1 when this caller won the claim,
    /// 0 when another worker got there first. Zero is not an error.
    async fn conditional_claim(&self, id: &JobId, now_ms: u64) -> Result<u64, StoreError>;

    async fn get(&self, id: &JobId) -> Result<Option<JobRun>, StoreError>;

    /// Apply a resolution/reschedule field set to one row.
    async fn update(&self, id: &JobId, update: JobUpdate) -> Result<(), StoreError>;

    /// PROCESSING jobs whose claim happened before `threshold_ms`, the
    /// candidates for stuck-job recovery.
    async fn find_processing_older_than(&self, threshold_ms: u64)
        -> Result<Vec<JobRun>, StoreError>;

    /// PENDING jobs whose attempt counter already reached `max`: the sweep's
    /// safety net for claims that died before reaching PROCESSING durability.
    async fn find_pending_at_attempt_ceiling(&self, max: u32) -> Result<Vec<JobRun>, StoreError>;
}
