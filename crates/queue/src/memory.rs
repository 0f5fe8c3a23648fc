// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory reference implementation of the queue-store contract.

use crate::store::{QueueStore, StoreError};
use async_trait::async_trait;
use lectern_core::{JobId, JobRun, JobStatus, JobUpdate};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// HashMap-backed queue store.
///
/// Every trait method holds the map lock for the duration of its read or
/// read-modify-write, which gives `conditional_claim` genuine
/// compare-and-swap semantics, the same guarantee a relational backend gets
/// from a guarded `UPDATE` and its affected-row count. The mutex is an
/// implementation detail of this backend, not part of the worker
/// coordination model.
#[derive(Debug, Clone, Default)]
pub struct MemoryQueue {
    jobs: Arc<Mutex<HashMap<String, JobRun>>>,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows, terminal or not.
    pub fn len(&self) -> usize {
        self.jobs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.lock().is_empty()
    }

    /// Snapshot of every row, for assertions and operator-style listings.
    pub fn all(&self) -> Vec<JobRun> {
        let mut jobs: Vec<JobRun> = self.jobs.lock().values().cloned().collect();
        jobs.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        jobs
    }
}

#[async_trait]
impl QueueStore for MemoryQueue {
    async fn insert(&self, job: JobRun) -> Result<(), StoreError> {
        let mut jobs = self.jobs.lock();
        // Idempotency: re-enqueueing an existing id keeps the original row.
        jobs.entry(job.id.as_str().to_string()).or_insert(job);
        Ok(())
    }

    async fn find_eligible_pending(&self, now_ms: u64) -> Result<Option<JobRun>, StoreError> {
        let jobs = self.jobs.lock();
        Ok(jobs
            .values()
            .filter(|job| job.is_eligible(now_ms))
            .min_by(|a, b| {
                a.scheduled_at_ms
                    .cmp(&b.scheduled_at_ms)
                    .then_with(|| a.id.as_str().cmp(b.id.as_str()))
            })
            .cloned())
    }

    async fn conditional_claim(&self, id: &JobId, now_ms: u64) -> Result<u64, StoreError> {
        let mut jobs = self.jobs.lock();
        match jobs.get_mut(id.as_str()) {
            Some(job) if job.status == JobStatus::Pending => {
                job.status = JobStatus::Processing;
                job.started_at_ms = Some(now_ms);
                job.attempts += 1;
                Ok(1)
            }
            // Row gone or already claimed: the guard failed, nothing changed.
            _ => Ok(0),
        }
    }

    async fn get(&self, id: &JobId) -> Result<Option<JobRun>, StoreError> {
        Ok(self.jobs.lock().get(id.as_str()).cloned())
    }

    async fn update(&self, id: &JobId, update: JobUpdate) -> Result<(), StoreError> {
        let mut jobs = self.jobs.lock();
        let job = jobs
            .get_mut(id.as_str())
            .ok_or_else(|| StoreError::JobNotFound(id.clone()))?;
        update.apply(job);
        Ok(())
    }

    async fn find_processing_older_than(
        &self,
        threshold_ms: u64,
    ) -> Result<Vec<JobRun>, StoreError> {
        let jobs = self.jobs.lock();
        Ok(jobs
            .values()
            .filter(|job| {
                job.status == JobStatus::Processing
                    && matches!(job.started_at_ms, Some(started) if started < threshold_ms)
            })
            .cloned()
            .collect())
    }

    async fn find_pending_at_attempt_ceiling(&self, max: u32) -> Result<Vec<JobRun>, StoreError> {
        let jobs = self.jobs.lock();
        Ok(jobs
            .values()
            .filter(|job| job.status == JobStatus::Pending && job.attempts >= max)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
