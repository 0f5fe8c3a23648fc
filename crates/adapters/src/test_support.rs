// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake collaborators for tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::artifact::{Artifact, ArtifactError, ArtifactStore};
use crate::content::{ContentError, ContentStore, LectureRecord, TranscriptRecord};
use async_trait::async_trait;
use lectern_genai::{
    text_part, user_content, validate_response_schema, Candidate, FileUploadArgs, FinishReason,
    GenAiError, GenerateRequest, Generator, RawResponse, UploadedFile,
};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

// ── ContentStore ────────────────────────────────────────────────────────────

#[derive(Default)]
struct FakeContentState {
    lectures: HashMap<String, LectureRecord>,
    summaries: HashMap<String, Vec<serde_json::Value>>,
    quizzes: HashMap<String, Vec<serde_json::Value>>,
    transcripts: HashMap<(String, String), TranscriptRecord>,
    unavailable: bool,
}

/// In-memory lecture store with scripted availability.
#[derive(Clone, Default)]
pub struct FakeContentStore {
    state: Arc<Mutex<FakeContentState>>,
}

impl FakeContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_lecture(&self, lecture: LectureRecord) {
        self.state.lock().lectures.insert(lecture.id.clone(), lecture);
    }

    pub fn put_summary(&self, lecture_id: &str, payload: serde_json::Value) {
        self.state
            .lock()
            .summaries
            .entry(lecture_id.to_string())
            .or_default()
            .push(payload);
    }

    /// Make every call fail with `ContentError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().unavailable = unavailable;
    }

    pub fn saved_summaries(&self, lecture_id: &str) -> Vec<serde_json::Value> {
        self.state
            .lock()
            .summaries
            .get(lecture_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn saved_quizzes(&self, lecture_id: &str) -> Vec<serde_json::Value> {
        self.state
            .lock()
            .quizzes
            .get(lecture_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn transcript(&self, lecture_id: &str, upload_id: &str) -> Option<TranscriptRecord> {
        self.state
            .lock()
            .transcripts
            .get(&(lecture_id.to_string(), upload_id.to_string()))
            .cloned()
    }

    fn check_available(&self) -> Result<(), ContentError> {
        if self.state.lock().unavailable {
            Err(ContentError::Unavailable("scripted outage".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ContentStore for FakeContentStore {
    async fn lecture(&self, lecture_id: &str) -> Result<Option<LectureRecord>, ContentError> {
        self.check_available()?;
        Ok(self.state.lock().lectures.get(lecture_id).cloned())
    }

    async fn latest_summary(
        &self,
        lecture_id: &str,
    ) -> Result<Option<serde_json::Value>, ContentError> {
        self.check_available()?;
        Ok(self
            .state
            .lock()
            .summaries
            .get(lecture_id)
            .and_then(|all| all.last().cloned()))
    }

    async fn save_summary(
        &self,
        lecture_id: &str,
        payload: serde_json::Value,
    ) -> Result<(), ContentError> {
        self.check_available()?;
        self.state
            .lock()
            .summaries
            .entry(lecture_id.to_string())
            .or_default()
            .push(payload);
        Ok(())
    }

    async fn save_quiz(
        &self,
        lecture_id: &str,
        payload: serde_json::Value,
    ) -> Result<(), ContentError> {
        self.check_available()?;
        self.state
            .lock()
            .quizzes
            .entry(lecture_id.to_string())
            .or_default()
            .push(payload);
        Ok(())
    }

    async fn upsert_transcript(
        &self,
        lecture_id: &str,
        source_upload_id: &str,
        record: TranscriptRecord,
    ) -> Result<String, ContentError> {
        self.check_available()?;
        self.state.lock().transcripts.insert(
            (lecture_id.to_string(), source_upload_id.to_string()),
            record,
        );
        Ok(format!("tr-{lecture_id}-{source_upload_id}"))
    }
}

// ── ArtifactStore ───────────────────────────────────────────────────────────

#[derive(Default)]
struct FakeArtifactState {
    artifacts: HashMap<String, Artifact>,
    not_ready: Vec<String>,
}

/// In-memory blob store with scripted not-ready keys.
#[derive(Clone, Default)]
pub struct FakeArtifactStore {
    state: Arc<Mutex<FakeArtifactState>>,
}

impl FakeArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, blob_key: &str, artifact: Artifact) {
        self.state
            .lock()
            .artifacts
            .insert(blob_key.to_string(), artifact);
    }

    /// Convenience: store text bytes under a key.
    pub fn put_text(&self, blob_key: &str, text: &str) {
        let data = text.as_bytes().to_vec();
        self.put(
            blob_key,
            Artifact {
                size_bytes: data.len(),
                content_type: "text/plain".to_string(),
                display_name: crate::artifact::basename(blob_key).to_string(),
                data,
            },
        );
    }

    pub fn mark_not_ready(&self, blob_key: &str) {
        self.state.lock().not_ready.push(blob_key.to_string());
    }
}

#[async_trait]
impl ArtifactStore for FakeArtifactStore {
    async fn fetch(&self, blob_key: &str) -> Result<Artifact, ArtifactError> {
        let state = self.state.lock();
        if state.not_ready.iter().any(|k| k == blob_key) {
            return Err(ArtifactError::NotReady(blob_key.to_string()));
        }
        state
            .artifacts
            .get(blob_key)
            .cloned()
            .ok_or_else(|| ArtifactError::NotFound(blob_key.to_string()))
    }
}

// ── Generator ───────────────────────────────────────────────────────────────

#[derive(Default)]
struct FakeGeneratorState {
    responses: VecDeque<Result<RawResponse, GenAiError>>,
    uploads: Vec<String>,
    requests: Vec<GenerateRequest>,
}

/// Scripted generative-model client.
///
/// `generate` validates the request's response schema exactly like the real
/// client, then pops the next scripted result.
#[derive(Clone, Default)]
pub struct FakeGenerator {
    state: Arc<Mutex<FakeGeneratorState>>,
}

impl FakeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a clean-STOP response whose single part carries `text`.
    pub fn with_text_response(self, text: &str) -> Self {
        self.push_response(RawResponse {
            candidates: vec![Candidate {
                content: Some(user_content(vec![text_part(text)])),
                finish_reason: Some(FinishReason::Stop),
                safety_ratings: None,
            }],
            model: Some("fake-model".to_string()),
        });
        self
    }

    pub fn push_response(&self, response: RawResponse) {
        self.state.lock().responses.push_back(Ok(response));
    }

    pub fn push_error(&self, error: GenAiError) {
        self.state.lock().responses.push_back(Err(error));
    }

    /// Display names of every uploaded file, in call order.
    pub fn uploaded_names(&self) -> Vec<String> {
        self.state.lock().uploads.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().requests.len()
    }
}

#[async_trait]
impl Generator for FakeGenerator {
    async fn upload_file(&self, args: FileUploadArgs) -> Result<UploadedFile, GenAiError> {
        let mut state = self.state.lock();
        state.uploads.push(args.display_name.clone());
        Ok(UploadedFile {
            name: format!("files/{}", args.display_name),
            uri: format!("https://genai.invalid/files/{}", args.display_name),
            mime_type: args.mime_type,
            size_bytes: args.data.len(),
        })
    }

    async fn generate(&self, request: GenerateRequest) -> Result<RawResponse, GenAiError> {
        if let Some(ref schema) = request.response_schema {
            validate_response_schema(schema)?;
        }
        let mut state = self.state.lock();
        state.requests.push(request);
        state.responses.pop_front().unwrap_or_else(|| {
            Err(GenAiError::Api {
                status: Some(500),
                message: "no scripted response".to_string(),
            })
        })
    }
}
