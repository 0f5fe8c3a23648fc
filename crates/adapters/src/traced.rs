// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced queue-store wrapper for consistent observability

use async_trait::async_trait;
use lectern_core::{JobId, JobRun, JobUpdate};
use lectern_queue::{QueueStore, StoreError};
use tracing::Instrument;

/// Wrapper that adds tracing to any QueueStore
#[derive(Clone)]
pub struct TracedQueue<S> {
    inner: S,
}

impl<S> TracedQueue<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: QueueStore> QueueStore for TracedQueue<S> {
    async fn insert(&self, job: JobRun) -> Result<(), StoreError> {
        let span = tracing::info_span!("queue.insert", job_id = %job.id, job_type = %job.job_type);
        async {
            let result = self.inner.insert(job).await;
            if let Err(ref e) = result {
                tracing::error!(error = %e, "insert failed");
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn find_eligible_pending(&self, now_ms: u64) -> Result<Option<JobRun>, StoreError> {
        let result = self.inner.find_eligible_pending(now_ms).await;
        if let Err(ref e) = result {
            tracing::error!(error = %e, "eligibility query failed");
        }
        result
    }

    async fn conditional_claim(&self, id: &JobId, now_ms: u64) -> Result<u64, StoreError> {
        async {
            let start = std::time::Instant::now();
            let result = self.inner.conditional_claim(id, now_ms).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(1) => tracing::debug!(elapsed_ms, "claim won"),
                Ok(_) => tracing::debug!(elapsed_ms, "claim lost"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "claim failed"),
            }
            result
        }
        .instrument(tracing::info_span!("queue.claim", job_id = %id))
        .await
    }

    async fn get(&self, id: &JobId) -> Result<Option<JobRun>, StoreError> {
        self.inner.get(id).await
    }

    async fn update(&self, id: &JobId, update: JobUpdate) -> Result<(), StoreError> {
        let span = tracing::info_span!("queue.update", job_id = %id, status = ?update.status);
        async {
            let result = self.inner.update(id, update).await;
            if let Err(ref e) = result {
                tracing::error!(error = %e, "update failed");
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn find_processing_older_than(
        &self,
        threshold_ms: u64,
    ) -> Result<Vec<JobRun>, StoreError> {
        let result = self.inner.find_processing_older_than(threshold_ms).await;
        if let Ok(ref jobs) = result {
            tracing::debug!(count = jobs.len(), threshold_ms, "stuck-job query");
        }
        result
    }

    async fn find_pending_at_attempt_ceiling(&self, max: u32) -> Result<Vec<JobRun>, StoreError> {
        let result = self.inner.find_pending_at_attempt_ceiling(max).await;
        if let Ok(ref jobs) = result {
            tracing::debug!(count = jobs.len(), max, "attempt-ceiling query");
        }
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
