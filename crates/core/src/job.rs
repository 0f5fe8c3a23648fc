// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JobRun row and its state machine.

use crate::clock::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

crate::define_id! {
    /// Unique identifier for a job run.
    ///
    /// Assigned when the row is enqueued and used to reference the job in
    /// logs, store updates, and operator queries.
    #[derive(Default)]
    pub struct JobId;
}

/// Kind of asynchronous work a job represents.
///
/// The set is extensible; dispatch treats unlisted values from storage as an
/// unsupported type rather than a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    Summarize,
    Quiz,
    Transcribe,
    /// A kind this worker build does not know. Rows carrying it still claim
    /// and resolve normally; dispatch fails them as non-retryable.
    #[serde(other)]
    Unsupported,
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobType::Summarize => write!(f, "SUMMARIZE"),
            JobType::Quiz => write!(f, "QUIZ"),
            JobType::Transcribe => write!(f, "TRANSCRIBE"),
            JobType::Unsupported => write!(f, "UNSUPPORTED"),
        }
    }
}

/// Lifecycle status of a job run.
///
/// `Pending` and `Processing` are transient; `Succeeded` and
/// `NeedsAttention` are terminal and never transition further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    /// Waiting to become eligible at `scheduled_at_ms`.
    Pending,
    /// Claimed by exactly one worker.
    Processing,
    /// Finished with a stored result.
    Succeeded,
    /// Terminal failure requiring operator intervention.
    NeedsAttention,
}

impl JobStatus {
    /// Terminal states admit no further automatic transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::NeedsAttention)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "PENDING"),
            JobStatus::Processing => write!(f, "PROCESSING"),
            JobStatus::Succeeded => write!(f, "SUCCEEDED"),
            JobStatus::NeedsAttention => write!(f, "NEEDS_ATTENTION"),
        }
    }
}

/// Configuration for enqueueing a new job run.
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub id: JobId,
    pub lecture_id: String,
    pub job_type: JobType,
    pub payload: serde_json::Value,
    /// Earliest eligibility; defaults to "now" when `None`.
    pub scheduled_at_ms: Option<u64>,
}

impl JobConfig {
    pub fn new(lecture_id: impl Into<String>, job_type: JobType, payload: serde_json::Value) -> Self {
        Self {
            id: JobId::random(),
            lecture_id: lecture_id.into(),
            job_type,
            payload,
            scheduled_at_ms: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<JobId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn scheduled_at(mut self, epoch_ms: u64) -> Self {
        self.scheduled_at_ms = Some(epoch_ms);
        self
    }
}

/// The unit of asynchronous work, owned by the queue.
///
/// Only the claim protocol and the resolution paths mutate a row; handlers
/// receive it read-only and communicate through their return value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRun {
    pub id: JobId,
    pub lecture_id: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub status: JobStatus,
    /// Incremented exactly once per claim, never reset.
    pub attempts: u32,
    /// Earliest time the job becomes eligible for claiming; doubles as the
    /// backoff target after a retryable failure.
    pub scheduled_at_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at_ms: Option<u64>,
    /// Opaque, type-specific input.
    pub payload: serde_json::Value,
    /// Opaque structured output, present once `Succeeded`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Human-readable diagnostic of the most recent failure. Cleared on
    /// success so the column always reflects the latest resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl JobRun {
    /// Create a new `Pending` row.
    pub fn new(config: JobConfig, clock: &impl Clock) -> Self {
        let scheduled_at_ms = config.scheduled_at_ms.unwrap_or_else(|| clock.epoch_ms());
        Self {
            id: config.id,
            lecture_id: config.lecture_id,
            job_type: config.job_type,
            status: JobStatus::Pending,
            attempts: 0,
            scheduled_at_ms,
            started_at_ms: None,
            completed_at_ms: None,
            payload: config.payload,
            result: None,
            last_error: None,
        }
    }

    /// Eligible for claiming: still pending and due.
    pub fn is_eligible(&self, now_ms: u64) -> bool {
        self.status == JobStatus::Pending && self.scheduled_at_ms <= now_ms
    }
}

/// Field set applied to a job row in a single store round trip.
///
/// `None` leaves a column untouched. `last_error` uses a nested option so a
/// single update can distinguish "leave as is" (`None`) from "clear"
/// (`Some(None)`) from "replace" (`Some(Some(_))`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobUpdate {
    pub status: Option<JobStatus>,
    pub scheduled_at_ms: Option<u64>,
    pub completed_at_ms: Option<u64>,
    pub result: Option<serde_json::Value>,
    pub last_error: Option<Option<String>>,
}

impl JobUpdate {
    /// Apply the field set to a row. Store implementations must make this
    /// visible atomically; no other worker may observe it half-applied.
    pub fn apply(&self, job: &mut JobRun) {
        if let Some(status) = self.status {
            job.status = status;
        }
        if let Some(scheduled_at_ms) = self.scheduled_at_ms {
            job.scheduled_at_ms = scheduled_at_ms;
        }
        if let Some(completed_at_ms) = self.completed_at_ms {
            job.completed_at_ms = Some(completed_at_ms);
        }
        if let Some(ref result) = self.result {
            job.result = Some(result.clone());
        }
        if let Some(ref last_error) = self.last_error {
            job.last_error = last_error.clone();
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
