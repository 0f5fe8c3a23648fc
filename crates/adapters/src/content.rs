// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Relational-store collaborator: lectures, uploads, and generated outputs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of uploaded source material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UploadKind {
    Pdf,
    Audio,
    Transcript,
}

/// Upload lifecycle as tracked by the dashboard side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UploadStatus {
    Uploading,
    Ready,
    Failed,
}

/// One uploaded file attached to a lecture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: String,
    pub kind: UploadKind,
    pub status: UploadStatus,
    /// Object-storage key the bytes live under.
    pub blob_key: String,
    pub content_type: String,
}

/// A lecture row with the pieces the handlers read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LectureRecord {
    pub id: String,
    pub title: String,
    pub language: String,
    /// Source modality label forwarded to the model prompt (e.g. "pdf",
    /// "audio", "mixed").
    pub modality: String,
    pub uploads: Vec<UploadRecord>,
    /// Text of an already-successful transcription, if one exists.
    pub transcript_text: Option<String>,
}

impl LectureRecord {
    /// First upload of `kind`, or the one with the given id if specified.
    pub fn upload(&self, kind: UploadKind, id: Option<&str>) -> Option<&UploadRecord> {
        match id {
            Some(id) => self
                .uploads
                .iter()
                .find(|u| u.id == id && u.kind == kind),
            None => self.uploads.iter().find(|u| u.kind == kind),
        }
    }
}

/// Transcript fields persisted by the transcription handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    pub text: String,
    pub language: Option<String>,
    pub duration_seconds: Option<f64>,
    pub diarization: Option<serde_json::Value>,
}

#[derive(Debug, Error)]
pub enum ContentError {
    /// Backend unreachable; retryable from the worker's perspective.
    #[error("content store unavailable: {0}")]
    Unavailable(String),
}

/// Store of lectures and their generated outputs.
///
/// Handlers read through this trait and persist their outputs through it;
/// job-queue state is never written here.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn lecture(&self, lecture_id: &str) -> Result<Option<LectureRecord>, ContentError>;

    /// Most recent successfully generated summary payload, if any.
    async fn latest_summary(
        &self,
        lecture_id: &str,
    ) -> Result<Option<serde_json::Value>, ContentError>;

    async fn save_summary(
        &self,
        lecture_id: &str,
        payload: serde_json::Value,
    ) -> Result<(), ContentError>;

    async fn save_quiz(
        &self,
        lecture_id: &str,
        payload: serde_json::Value,
    ) -> Result<(), ContentError>;

    /// Insert or replace the transcript derived from one upload.
    /// Returns the transcript row id.
    async fn upsert_transcript(
        &self,
        lecture_id: &str,
        source_upload_id: &str,
        record: TranscriptRecord,
    ) -> Result<String, ContentError>;
}

// ── REST implementation ─────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireUpload {
    id: String,
    #[serde(rename = "type")]
    kind: UploadKind,
    status: UploadStatus,
    blob_key: String,
    content_type: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSummary {
    payload: serde_json::Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireLecture {
    id: String,
    title: String,
    language: String,
    modality: String,
    #[serde(default)]
    uploads: Vec<WireUpload>,
    /// Newest first, matching the dashboard API's ordering.
    #[serde(default)]
    summaries: Vec<WireSummary>,
    #[serde(default)]
    transcript_text: Option<String>,
}

impl WireLecture {
    fn into_record(self) -> LectureRecord {
        LectureRecord {
            id: self.id,
            title: self.title,
            language: self.language,
            modality: self.modality,
            uploads: self
                .uploads
                .into_iter()
                .map(|u| UploadRecord {
                    id: u.id,
                    kind: u.kind,
                    status: u.status,
                    blob_key: u.blob_key,
                    content_type: u.content_type,
                })
                .collect(),
            transcript_text: self.transcript_text,
        }
    }
}

/// Content store backed by the dashboard's internal REST API.
pub struct RestContentStore {
    http: reqwest::Client,
    base_url: String,
}

impl RestContentStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn lecture_url(&self, lecture_id: &str, suffix: &str) -> String {
        format!(
            "{}/api/lectures/{lecture_id}{suffix}",
            self.base_url.trim_end_matches('/')
        )
    }

    async fn fetch_lecture(&self, lecture_id: &str) -> Result<Option<WireLecture>, ContentError> {
        let response = self
            .http
            .get(self.lecture_url(lecture_id, ""))
            .send()
            .await
            .map_err(|e| ContentError::Unavailable(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(ContentError::Unavailable(format!(
                "lecture fetch status {}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map(Some)
            .map_err(|e| ContentError::Unavailable(e.to_string()))
    }

    async fn post_json(
        &self,
        url: String,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, ContentError> {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ContentError::Unavailable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ContentError::Unavailable(format!(
                "write status {}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| ContentError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl ContentStore for RestContentStore {
    async fn lecture(&self, lecture_id: &str) -> Result<Option<LectureRecord>, ContentError> {
        Ok(self
            .fetch_lecture(lecture_id)
            .await?
            .map(WireLecture::into_record))
    }

    async fn latest_summary(
        &self,
        lecture_id: &str,
    ) -> Result<Option<serde_json::Value>, ContentError> {
        Ok(self
            .fetch_lecture(lecture_id)
            .await?
            .and_then(|lecture| lecture.summaries.into_iter().next().map(|s| s.payload)))
    }

    async fn save_summary(
        &self,
        lecture_id: &str,
        payload: serde_json::Value,
    ) -> Result<(), ContentError> {
        self.post_json(
            self.lecture_url(lecture_id, "/summaries"),
            &serde_json::json!({ "payload": payload }),
        )
        .await
        .map(|_| ())
    }

    async fn save_quiz(
        &self,
        lecture_id: &str,
        payload: serde_json::Value,
    ) -> Result<(), ContentError> {
        self.post_json(
            self.lecture_url(lecture_id, "/quizzes"),
            &serde_json::json!({ "payload": payload }),
        )
        .await
        .map(|_| ())
    }

    async fn upsert_transcript(
        &self,
        lecture_id: &str,
        source_upload_id: &str,
        record: TranscriptRecord,
    ) -> Result<String, ContentError> {
        let body = self
            .post_json(
                self.lecture_url(lecture_id, &format!("/transcripts/{source_upload_id}")),
                &serde_json::json!({
                    "text": record.text,
                    "language": record.language,
                    "durationSeconds": record.duration_seconds,
                    "diarization": record.diarization,
                }),
            )
            .await?;
        Ok(body
            .get("transcriptId")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string())
    }
}

#[cfg(test)]
#[path = "content_tests.rs"]
mod tests;
