// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::clock::FakeClock;
use crate::job::{JobConfig, JobRun, JobStatus, JobType};
use serde_json::json;

/// Epoch used by job fixtures unless a test advances its own clock.
pub const FIXTURE_EPOCH_MS: u64 = 1_000_000;

/// A freshly enqueued pending job.
pub fn pending_job(id: &str, job_type: JobType) -> JobRun {
    let clock = FakeClock::at(FIXTURE_EPOCH_MS);
    JobRun::new(
        JobConfig::new("lec-1", job_type, json!({"lectureId": "lec-1"})).with_id(id),
        &clock,
    )
}

/// A job as it looks right after a claim: processing, with `attempts`
/// already incremented for the claim in flight.
pub fn claimed_job(id: &str, attempts: u32) -> JobRun {
    let mut job = pending_job(id, JobType::Summarize);
    job.status = JobStatus::Processing;
    job.attempts = attempts;
    job.started_at_ms = Some(FIXTURE_EPOCH_MS);
    job
}

/// A processing job whose claim happened at `started_at_ms`.
pub fn stale_processing_job(id: &str, attempts: u32, started_at_ms: u64) -> JobRun {
    let mut job = claimed_job(id, attempts);
    job.started_at_ms = Some(started_at_ms);
    job
}
