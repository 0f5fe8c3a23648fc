// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persist a transcript delivered by the upstream transcription service.

use super::{parse_payload, HandlerContext};
use crate::error::HandlerError;
use lectern_adapters::{ArtifactStore, ContentStore, TranscriptRecord};
use lectern_core::JobRun;
use lectern_genai::Generator;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranscribePayload {
    #[serde(default)]
    upload_id: Option<String>,
    /// Produced by the upstream service; absent while it is still running.
    #[serde(default)]
    transcript_text: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    duration_seconds: Option<f64>,
    #[serde(default)]
    diarization: Option<Value>,
}

pub(super) async fn run<C, A, G>(
    job: &JobRun,
    ctx: &HandlerContext<C, A, G>,
) -> Result<Value, HandlerError>
where
    C: ContentStore,
    A: ArtifactStore,
    G: Generator,
{
    let payload: TranscribePayload = parse_payload(job)?;

    let Some(text) = payload.transcript_text else {
        return Err(HandlerError::NotReady(
            "transcript text not yet available from upstream".to_string(),
        ));
    };
    let Some(upload_id) = payload.upload_id else {
        return Err(HandlerError::Payload(
            "transcription payload missing uploadId".to_string(),
        ));
    };

    let transcript_id = ctx
        .content
        .upsert_transcript(
            &job.lecture_id,
            &upload_id,
            TranscriptRecord {
                text,
                language: payload.language,
                duration_seconds: payload.duration_seconds,
                diarization: payload.diarization,
            },
        )
        .await?;

    tracing::info!(
        job_id = %job.id,
        lecture_id = %job.lecture_id,
        transcript_id = %transcript_id,
        "transcript stored"
    );

    Ok(json!({ "transcriptId": transcript_id }))
}

#[cfg(test)]
#[path = "transcribe_tests.rs"]
mod tests;
