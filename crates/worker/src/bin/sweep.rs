// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lectern recovery sweep (lectern-sweep)
//!
//! One idempotent pass over the shared queue: requeues jobs abandoned in
//! PROCESSING past the timeout, escalates exhausted ones. Intended to run
//! from cron or an operator shell, concurrently with live workers.

use lectern_core::SystemClock;
use lectern_queue::{sweep, FileQueue};
use lectern_worker::SweepSettings;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = SweepSettings::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("LECTERN_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!(
        state_dir = %settings.state_dir.display(),
        processing_timeout_ms = settings.sweep.processing_timeout_ms,
        reschedule_delay_ms = settings.sweep.reschedule_delay_ms,
        max_attempts = settings.sweep.max_attempts,
        "starting recovery sweep"
    );

    let store = FileQueue::new(settings.jobs_path());
    let summary = sweep(&store, &settings.sweep, &SystemClock).await?;

    info!(
        requeued = summary.requeued,
        escalated_from_processing = summary.escalated_from_processing,
        escalated_from_pending = summary.escalated_from_pending,
        "sweep complete"
    );

    Ok(())
}
