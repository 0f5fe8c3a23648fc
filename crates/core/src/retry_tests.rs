// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::claimed_job;
use crate::{Failure, FailureKind, JobStatus};
use proptest::prelude::*;
use serde_json::json;

const NOW: u64 = 10_000_000;

#[yare::parameterized(
    first   = { 1, 2_000 },
    second  = { 2, 4_000 },
    third   = { 3, 8_000 },
    ninth   = { 9, 512_000 },
    capped  = { 10, 600_000 },
    deep    = { 40, 600_000 },
    extreme = { 200, 600_000 },
)]
fn backoff_curve(attempts: u32, expected_ms: u64) {
    let policy = RetryPolicy::default();
    assert_eq!(policy.backoff_delay_ms(attempts), expected_ms);
}

proptest! {
    #[test]
    fn backoff_is_monotonic_and_capped(attempts in 0u32..128) {
        let policy = RetryPolicy::default();
        let delay = policy.backoff_delay_ms(attempts);
        let next = policy.backoff_delay_ms(attempts + 1);
        prop_assert!(next >= delay);
        prop_assert!(delay <= policy.cap_delay_ms);
    }
}

#[test]
fn success_clears_error_and_stores_result() {
    let mut job = claimed_job("job-1", 1);
    job.last_error = Some("previous failure".to_string());

    let resolution = resolve(
        &job,
        Outcome::Success(json!({"transcriptId": "tr-1"})),
        &RetryPolicy::default(),
        NOW,
    );

    assert!(resolution.is_terminal());
    resolution.update().apply(&mut job);
    assert_eq!(job.status, JobStatus::Succeeded);
    assert_eq!(job.completed_at_ms, Some(NOW));
    assert_eq!(job.result, Some(json!({"transcriptId": "tr-1"})));
    assert_eq!(job.last_error, None);
}

#[test]
fn transient_failure_reschedules_with_backoff() {
    let mut job = claimed_job("job-1", 1);

    let resolution = resolve(
        &job,
        Outcome::Failure(Failure::transient("blob not ready")),
        &RetryPolicy::default(),
        NOW,
    );

    match &resolution {
        Resolution::Rescheduled { delay_ms, kind, .. } => {
            assert_eq!(*delay_ms, 2_000);
            assert_eq!(*kind, FailureKind::Transient);
        }
        other => panic!("expected reschedule, got {other:?}"),
    }
    resolution.update().apply(&mut job);
    assert_eq!(job.status, JobStatus::Pending);
    assert_eq!(job.scheduled_at_ms, NOW + 2_000);
    assert_eq!(job.last_error, Some("blob not ready".to_string()));
    assert_eq!(job.completed_at_ms, None);
}

#[test]
fn attempt_ceiling_escalates() {
    let mut job = claimed_job("job-1", 3);
    let before_schedule = job.scheduled_at_ms;

    let resolution = resolve(
        &job,
        Outcome::Failure(Failure::transient("still flaky")),
        &RetryPolicy::default(),
        NOW,
    );

    assert!(resolution.is_terminal());
    resolution.update().apply(&mut job);
    assert_eq!(job.status, JobStatus::NeedsAttention);
    assert_eq!(job.completed_at_ms, Some(NOW));
    assert_eq!(job.last_error, Some("still flaky".to_string()));
    // Not reconsidered automatically, so the schedule stays put.
    assert_eq!(job.scheduled_at_ms, before_schedule);
}

#[test]
fn fatal_failure_short_circuits_remaining_attempts() {
    let mut job = claimed_job("job-1", 1);

    let resolution = resolve(
        &job,
        Outcome::Failure(Failure::fatal("unsupported job type")),
        &RetryPolicy::default(),
        NOW,
    );

    match &resolution {
        Resolution::Escalated { kind, .. } => assert_eq!(*kind, FailureKind::Fatal),
        other => panic!("expected escalation, got {other:?}"),
    }
    resolution.update().apply(&mut job);
    assert_eq!(job.status, JobStatus::NeedsAttention);
}

#[test]
fn unknown_failures_are_retried_like_transient() {
    let job = claimed_job("job-1", 1);

    let resolution = resolve(
        &job,
        Outcome::Failure(Failure::new(FailureKind::Unknown, "???")),
        &RetryPolicy::default(),
        NOW,
    );

    assert!(!resolution.is_terminal());
}

#[test]
fn per_type_policy_raises_the_ceiling() {
    let job = claimed_job("job-1", 3);
    let policy = RetryPolicy::with_max_attempts(5);

    let resolution = resolve(
        &job,
        Outcome::Failure(Failure::transient("upstream busy")),
        &policy,
        NOW,
    );

    assert!(!resolution.is_terminal());
}
