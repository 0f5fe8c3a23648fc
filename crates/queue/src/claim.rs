// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Atomic claim of the next eligible job.

use crate::store::{QueueStore, StoreError};
use lectern_core::{Clock, JobRun};

/// Claim the next eligible PENDING job, if any.
///
/// Select the earliest due row, then attempt the guarded PENDING→PROCESSING
/// transition. A zero affected-count means another worker won the race; that
/// is a normal `None`, not an error, and leaves no side effects. On a won
/// claim the row is re-read so the caller sees the post-claim attempt count
/// and timestamps.
pub async fn claim_next<S>(store: &S, clock: &impl Clock) -> Result<Option<JobRun>, StoreError>
where
    S: QueueStore + ?Sized,
{
    let now_ms = clock.epoch_ms();
    let Some(candidate) = store.find_eligible_pending(now_ms).await? else {
        return Ok(None);
    };

    if store.conditional_claim(&candidate.id, now_ms).await? == 0 {
        tracing::debug!(job_id = %candidate.id, "lost claim race");
        return Ok(None);
    }

    store.get(&candidate.id).await
}

#[cfg(test)]
#[path = "claim_tests.rs"]
mod tests;
