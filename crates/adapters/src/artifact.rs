// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retrieval of uploaded media from object storage.

use async_trait::async_trait;
use thiserror::Error;

/// Raw bytes of an uploaded artifact plus the metadata the model API needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub data: Vec<u8>,
    pub size_bytes: usize,
    pub content_type: String,
    pub display_name: String,
}

#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The blob exists logically but its bytes are still being produced by
    /// an upstream step. Classified retryable.
    #[error("artifact not ready yet: {0}")]
    NotReady(String),
    #[error("artifact not found: {0}")]
    NotFound(String),
    #[error("artifact fetch failed: {0}")]
    Fetch(String),
}

/// Object-storage collaborator.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Download the artifact stored under `blob_key`.
    async fn fetch(&self, blob_key: &str) -> Result<Artifact, ArtifactError>;
}

/// Blob store reachable over plain HTTP GETs against a public base URL.
pub struct HttpBlobStore {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBlobStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

/// Last path segment of a blob key, used as the display name upstream.
pub(crate) fn basename(blob_key: &str) -> &str {
    blob_key.rsplit('/').next().unwrap_or(blob_key)
}

#[async_trait]
impl ArtifactStore for HttpBlobStore {
    async fn fetch(&self, blob_key: &str) -> Result<Artifact, ArtifactError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), blob_key);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ArtifactError::Fetch(format!("{blob_key}: {e}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ArtifactError::NotFound(blob_key.to_string()));
        }
        if !status.is_success() {
            return Err(ArtifactError::Fetch(format!("{blob_key}: status {status}")));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = response
            .bytes()
            .await
            .map_err(|e| ArtifactError::Fetch(format!("{blob_key}: {e}")))?
            .to_vec();

        Ok(Artifact {
            size_bytes: data.len(),
            content_type,
            display_name: basename(blob_key).to_string(),
            data,
        })
    }
}

#[cfg(test)]
#[path = "artifact_tests.rs"]
mod tests;
