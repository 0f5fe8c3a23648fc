// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::env::WorkerConfig;
use crate::handlers;
use lectern_adapters::{FakeArtifactStore, FakeContentStore, FakeGenerator};
use lectern_core::test_support::pending_job;
use lectern_core::JobType;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

fn test_ctx(
    audio_enabled: bool,
) -> HandlerContext<FakeContentStore, FakeArtifactStore, FakeGenerator> {
    let mut vars = HashMap::from([
        ("GEMINI_API_KEY", "key-1"),
        ("BLOB_PUBLIC_BASE_URL", "https://blobs.test"),
        ("CONTENT_API_BASE_URL", "https://dash.test"),
        ("HOME", "/home/test"),
    ]);
    if audio_enabled {
        vars.insert("ENABLE_AUDIO_PIPELINE", "1");
    }
    HandlerContext {
        config: Arc::new(
            WorkerConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap(),
        ),
        content: FakeContentStore::new(),
        artifacts: FakeArtifactStore::new(),
        generator: FakeGenerator::new(),
    }
}

fn transcribe_job(payload: Value) -> lectern_core::JobRun {
    let mut job = pending_job("job-1", JobType::Transcribe);
    job.payload = payload;
    job
}

#[tokio::test]
async fn persists_a_delivered_transcript() {
    let ctx = test_ctx(true);
    let job = transcribe_job(json!({
        "uploadId": "up-9",
        "transcriptText": "hello world",
        "language": "en",
        "durationSeconds": 12.5
    }));

    let result = run(&job, &ctx).await.unwrap();
    assert_eq!(result["transcriptId"], "tr-lec-1-up-9");

    let stored = ctx.content.transcript("lec-1", "up-9").unwrap();
    assert_eq!(stored.text, "hello world");
    assert_eq!(stored.language.as_deref(), Some("en"));
}

#[tokio::test]
async fn missing_transcript_text_is_not_ready() {
    let ctx = test_ctx(true);
    let job = transcribe_job(json!({ "uploadId": "up-9" }));

    let err = run(&job, &ctx).await.unwrap_err();
    assert!(matches!(err, HandlerError::NotReady(_)));
}

#[tokio::test]
async fn missing_upload_id_is_a_payload_error() {
    let ctx = test_ctx(true);
    let job = transcribe_job(json!({ "transcriptText": "hello" }));

    let err = run(&job, &ctx).await.unwrap_err();
    assert!(matches!(err, HandlerError::Payload(_)));
}

#[tokio::test]
async fn dispatch_rejects_transcription_when_pipeline_disabled() {
    let ctx = test_ctx(false);
    let job = transcribe_job(json!({
        "uploadId": "up-9",
        "transcriptText": "hello"
    }));

    let err = handlers::execute(&job, &ctx).await.unwrap_err();
    assert!(matches!(err, HandlerError::Disabled(_)));
}

#[tokio::test]
async fn dispatch_rejects_unsupported_job_types() {
    let ctx = test_ctx(true);
    let mut job = pending_job("job-1", JobType::Summarize);
    job.job_type = serde_json::from_value(json!("REINDEX")).unwrap();

    let err = handlers::execute(&job, &ctx).await.unwrap_err();
    assert!(matches!(err, HandlerError::UnsupportedType(_)));
}
