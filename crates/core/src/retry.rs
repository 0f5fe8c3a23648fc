// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retry/backoff engine: the single place where attempt accounting and
//! terminal-state decisions are made.

use crate::failure::{Failure, FailureKind};
use crate::job::{JobRun, JobStatus, JobUpdate};

/// Default exponential backoff base.
pub const DEFAULT_BASE_DELAY_MS: u64 = 1_000;
/// Hard cap on the backoff delay (10 minutes).
pub const DEFAULT_CAP_DELAY_MS: u64 = 600_000;
/// Default attempt ceiling for the worker's own retry accounting.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Retry budget and backoff curve for one job type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub cap_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
            cap_delay_ms: DEFAULT_CAP_DELAY_MS,
        }
    }
}

impl RetryPolicy {
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    /// Backoff delay after the given claim count: `min(cap, base * 2^attempts)`.
    ///
    /// Saturating so absurd attempt counts pin at the cap instead of
    /// wrapping back to short delays.
    pub fn backoff_delay_ms(&self, attempts: u32) -> u64 {
        let factor = match 1u64.checked_shl(attempts) {
            Some(f) => f,
            None => u64::MAX,
        };
        self.base_delay_ms
            .saturating_mul(factor)
            .min(self.cap_delay_ms)
    }
}

/// What a handler produced for a claimed job.
#[derive(Debug, Clone)]
pub enum Outcome {
    Success(serde_json::Value),
    Failure(Failure),
}

/// Resolution of a processed job: the field set to persist, plus enough
/// context for the caller to log what happened.
#[derive(Debug, Clone)]
pub enum Resolution {
    Succeeded {
        update: JobUpdate,
    },
    /// Retryable failure; the job returns to `Pending` after `delay_ms`.
    Rescheduled {
        update: JobUpdate,
        delay_ms: u64,
        kind: FailureKind,
    },
    /// Terminal failure; the job needs operator attention.
    Escalated {
        update: JobUpdate,
        kind: FailureKind,
    },
}

impl Resolution {
    pub fn update(&self) -> &JobUpdate {
        match self {
            Resolution::Succeeded { update }
            | Resolution::Rescheduled { update, .. }
            | Resolution::Escalated { update, .. } => update,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Resolution::Rescheduled { .. })
    }
}

/// Decide how a claimed job resolves.
///
/// On failure the job escalates when the attempt ceiling is reached or the
/// failure is fatal; otherwise it is rescheduled with exponential backoff
/// computed from the current claim count, so successive failures widen the
/// interval monotonically until the cap. `scheduled_at_ms` is left untouched
/// on escalation since the row will not be reconsidered automatically.
pub fn resolve(job: &JobRun, outcome: Outcome, policy: &RetryPolicy, now_ms: u64) -> Resolution {
    match outcome {
        Outcome::Success(result) => Resolution::Succeeded {
            update: JobUpdate {
                status: Some(JobStatus::Succeeded),
                completed_at_ms: Some(now_ms),
                result: Some(result),
                last_error: Some(None),
                ..Default::default()
            },
        },
        Outcome::Failure(failure) => {
            let final_attempt =
                job.attempts >= policy.max_attempts || failure.kind == FailureKind::Fatal;
            if final_attempt {
                Resolution::Escalated {
                    update: JobUpdate {
                        status: Some(JobStatus::NeedsAttention),
                        completed_at_ms: Some(now_ms),
                        last_error: Some(Some(failure.message)),
                        ..Default::default()
                    },
                    kind: failure.kind,
                }
            } else {
                let delay_ms = policy.backoff_delay_ms(job.attempts);
                Resolution::Rescheduled {
                    update: JobUpdate {
                        status: Some(JobStatus::Pending),
                        scheduled_at_ms: Some(now_ms + delay_ms),
                        last_error: Some(Some(failure.message)),
                        ..Default::default()
                    },
                    delay_ms,
                    kind: failure.kind,
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
