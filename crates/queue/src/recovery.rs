// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Out-of-band sweep that reclaims jobs abandoned mid-processing.

use crate::store::{QueueStore, StoreError};
use lectern_core::{Clock, JobStatus, JobUpdate};

const TIMEOUT_ERROR: &str = "Auto-rescheduled by recovery sweep: processing timeout exceeded.";
const PROCESSING_CEILING_ERROR: &str =
    "Escalated by recovery sweep: max attempts reached while processing.";
const PENDING_CEILING_ERROR: &str = "Escalated by recovery sweep: max attempts exceeded.";

/// Thresholds for one sweep pass.
///
/// `max_attempts` is the sweep's own escalation ceiling, configured
/// independently from the worker's retry budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepConfig {
    /// How long a job may sit in PROCESSING before it is presumed abandoned.
    pub processing_timeout_ms: u64,
    /// Delay applied when requeueing a reclaimed job.
    pub reschedule_delay_ms: u64,
    pub max_attempts: u32,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            processing_timeout_ms: 15 * 60 * 1_000,
            reschedule_delay_ms: 60 * 1_000,
            max_attempts: 5,
        }
    }
}

/// Counts reported by one sweep pass, for observability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub requeued: usize,
    pub escalated_from_processing: usize,
    pub escalated_from_pending: usize,
}

impl SweepSummary {
    pub fn is_quiet(&self) -> bool {
        *self == Self::default()
    }
}

/// Run one recovery pass.
///
/// Idempotent and safe to run concurrently with workers: every mutation is a
/// single-row update, and a job requeued here is handed back through the
/// normal claim protocol. Zero matches is the healthy outcome, not an error.
pub async fn sweep<S>(
    store: &S,
    config: &SweepConfig,
    clock: &impl Clock,
) -> Result<SweepSummary, StoreError>
where
    S: QueueStore + ?Sized,
{
    let now_ms = clock.epoch_ms();
    let threshold_ms = now_ms.saturating_sub(config.processing_timeout_ms);
    let mut summary = SweepSummary::default();

    let stuck = store.find_processing_older_than(threshold_ms).await?;
    let reschedule_at_ms = now_ms + config.reschedule_delay_ms;

    for job in &stuck {
        if job.attempts < config.max_attempts {
            store
                .update(
                    &job.id,
                    JobUpdate {
                        status: Some(JobStatus::Pending),
                        scheduled_at_ms: Some(reschedule_at_ms),
                        last_error: Some(Some(TIMEOUT_ERROR.to_string())),
                        ..Default::default()
                    },
                )
                .await?;
            summary.requeued += 1;
        } else {
            store
                .update(
                    &job.id,
                    JobUpdate {
                        status: Some(JobStatus::NeedsAttention),
                        completed_at_ms: Some(now_ms),
                        last_error: Some(Some(PROCESSING_CEILING_ERROR.to_string())),
                        ..Default::default()
                    },
                )
                .await?;
            summary.escalated_from_processing += 1;
        }
    }

    // Safety net: a claim increments attempts before PROCESSING persistence
    // is guaranteed, so a row can sit PENDING with an exhausted budget.
    let exhausted = store
        .find_pending_at_attempt_ceiling(config.max_attempts)
        .await?;
    for job in &exhausted {
        store
            .update(
                &job.id,
                JobUpdate {
                    status: Some(JobStatus::NeedsAttention),
                    last_error: Some(Some(PENDING_CEILING_ERROR.to_string())),
                    ..Default::default()
                },
            )
            .await?;
        summary.escalated_from_pending += 1;
    }

    if summary.is_quiet() {
        tracing::info!("sweep found nothing to repair");
    } else {
        tracing::info!(
            requeued = summary.requeued,
            escalated_from_processing = summary.escalated_from_processing,
            escalated_from_pending = summary.escalated_from_pending,
            "sweep repaired jobs"
        );
    }

    Ok(summary)
}

#[cfg(test)]
#[path = "recovery_tests.rs"]
mod tests;
