// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Type-specific job handlers.
//!
//! Handlers receive the claimed job read-only plus the collaborator traits,
//! and return the result payload to store on success. All status writes stay
//! in the runner's resolution path.

mod quiz;
mod summarize;
mod transcribe;

use crate::env::WorkerConfig;
use crate::error::HandlerError;
use lectern_adapters::{ArtifactStore, ContentStore};
use lectern_core::{JobRun, JobType};
use lectern_genai::Generator;
use std::sync::Arc;

/// Collaborators and config shared by every handler invocation.
pub struct HandlerContext<C, A, G> {
    pub config: Arc<WorkerConfig>,
    pub content: C,
    pub artifacts: A,
    pub generator: G,
}

/// Dispatch a claimed job to its handler.
pub async fn execute<C, A, G>(
    job: &JobRun,
    ctx: &HandlerContext<C, A, G>,
) -> Result<serde_json::Value, HandlerError>
where
    C: ContentStore,
    A: ArtifactStore,
    G: Generator,
{
    match job.job_type {
        JobType::Summarize => summarize::run(job, ctx).await,
        JobType::Quiz => quiz::run(job, ctx).await,
        JobType::Transcribe => {
            if !ctx.config.audio_pipeline_enabled {
                return Err(HandlerError::Disabled(
                    "audio pipeline disabled at runtime".to_string(),
                ));
            }
            transcribe::run(job, ctx).await
        }
        JobType::Unsupported => Err(HandlerError::UnsupportedType(job.job_type.to_string())),
    }
}

/// Parse a job payload into its typed shape.
fn parse_payload<T: serde::de::DeserializeOwned>(job: &JobRun) -> Result<T, HandlerError> {
    serde_json::from_value(job.payload.clone()).map_err(|e| HandlerError::Payload(e.to_string()))
}
