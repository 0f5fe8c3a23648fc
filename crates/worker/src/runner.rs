// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The worker loop: claim, dispatch, resolve.

use crate::classify::failure_from;
use crate::handlers::{self, HandlerContext};
use lectern_adapters::{ArtifactStore, ContentStore};
use lectern_core::{retry, Clock, FailureKind, JobId, JobRun, Outcome, Resolution};
use lectern_genai::Generator;
use lectern_queue::{claim_next, QueueStore, StoreError};
use std::sync::Arc;

/// What one loop iteration did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// Nothing eligible; the loop sleeps one poll interval.
    Idle,
    Processed {
        job_id: JobId,
        terminal: bool,
    },
}

/// One worker instance. Many of these run concurrently, in this process and
/// others; the only coordination between them is the store's conditional
/// claim.
pub struct Worker<S, C, A, G, K> {
    store: Arc<S>,
    ctx: Arc<HandlerContext<C, A, G>>,
    clock: K,
    worker_id: String,
}

impl<S, C, A, G, K> Worker<S, C, A, G, K>
where
    S: QueueStore,
    C: ContentStore,
    A: ArtifactStore,
    G: Generator,
    K: Clock,
{
    pub fn new(
        store: Arc<S>,
        ctx: Arc<HandlerContext<C, A, G>>,
        clock: K,
        worker_id: impl Into<String>,
    ) -> Self {
        Self {
            store,
            ctx,
            clock,
            worker_id: worker_id.into(),
        }
    }

    /// Run forever. Store-level errors are logged and backed off; they never
    /// terminate the worker.
    pub async fn run(&self) {
        tracing::info!(
            worker_id = %self.worker_id,
            poll_interval_ms = self.ctx.config.poll_interval.as_millis() as u64,
            max_attempts = self.ctx.config.max_attempts,
            "worker started"
        );
        loop {
            match self.tick().await {
                Ok(Tick::Processed { .. }) => {
                    // Look for more work immediately.
                }
                Ok(Tick::Idle) => {
                    tokio::time::sleep(self.ctx.config.poll_interval).await;
                }
                Err(error) => {
                    tracing::error!(worker_id = %self.worker_id, error = %error, "worker loop error");
                    tokio::time::sleep(self.ctx.config.poll_interval).await;
                }
            }
        }
    }

    /// Claim and fully process at most one job.
    pub async fn tick(&self) -> Result<Tick, StoreError> {
        let Some(job) = claim_next(self.store.as_ref(), &self.clock).await? else {
            return Ok(Tick::Idle);
        };

        tracing::info!(
            worker_id = %self.worker_id,
            job_id = %job.id,
            lecture_id = %job.lecture_id,
            job_type = %job.job_type,
            attempts = job.attempts,
            "job claimed"
        );

        let terminal = self.process(&job).await?;
        Ok(Tick::Processed {
            job_id: job.id,
            terminal,
        })
    }

    async fn process(&self, job: &JobRun) -> Result<bool, StoreError> {
        let outcome = match handlers::execute(job, self.ctx.as_ref()).await {
            Ok(result) => Outcome::Success(result),
            Err(error) => {
                let failure = failure_from(&error);
                match failure.kind {
                    FailureKind::Transient => tracing::warn!(
                        job_id = %job.id,
                        lecture_id = %job.lecture_id,
                        attempts = job.attempts,
                        error = %error,
                        "job failed (retryable)"
                    ),
                    FailureKind::Unknown => tracing::error!(
                        job_id = %job.id,
                        lecture_id = %job.lecture_id,
                        attempts = job.attempts,
                        error = %error,
                        unclassified = true,
                        "job failed (unclassified)"
                    ),
                    FailureKind::Fatal => tracing::error!(
                        job_id = %job.id,
                        lecture_id = %job.lecture_id,
                        attempts = job.attempts,
                        error = %error,
                        "job failed (fatal)"
                    ),
                }
                Outcome::Failure(failure)
            }
        };

        let policy = self.ctx.config.retry_policy_for(job.job_type);
        let resolution = retry::resolve(job, outcome, &policy, self.clock.epoch_ms());

        match &resolution {
            Resolution::Succeeded { .. } => {
                tracing::info!(job_id = %job.id, lecture_id = %job.lecture_id, "job succeeded");
            }
            Resolution::Rescheduled { delay_ms, .. } => {
                tracing::warn!(
                    job_id = %job.id,
                    attempts = job.attempts,
                    retry_in_ms = delay_ms,
                    "job rescheduled"
                );
            }
            Resolution::Escalated { kind, .. } => {
                tracing::error!(
                    job_id = %job.id,
                    attempts = job.attempts,
                    kind = %kind,
                    "job escalated to NEEDS_ATTENTION"
                );
            }
        }

        let terminal = resolution.is_terminal();
        self.store
            .update(&job.id, resolution.update().clone())
            .await?;
        Ok(terminal)
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
