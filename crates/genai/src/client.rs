// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP client for the generative-model API.

use crate::error::GenAiError;
use crate::schema::validate_response_schema;
use crate::types::{Content, FileUploadArgs, GenerateRequest, RawResponse, UploadedFile};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

/// Hard per-file ceiling for PDF uploads.
pub const MAX_PDF_BYTES: usize = 50 * 1024 * 1024;
/// Recommended request ceiling for everything else.
pub const MAX_DEFAULT_BYTES: usize = 20 * 1024 * 1024;

const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Collaborator boundary the handlers talk to; implemented by
/// [`GeminiClient`] in production and by scripted fakes in tests.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn upload_file(&self, args: FileUploadArgs) -> Result<UploadedFile, GenAiError>;
    async fn generate(&self, request: GenerateRequest) -> Result<RawResponse, GenAiError>;
}

/// Connection settings, resolved once at process start.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub api_base_url: String,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into();
        self
    }

    fn api_base(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    fn upload_base(&self) -> String {
        format!("{}/upload", self.api_base())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    response_mime_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateBody {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

/// Client over the Gemini REST surface.
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
    /// Models already confirmed reachable; checked once per process.
    available_models: Mutex<HashSet<String>>,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            available_models: Mutex::new(HashSet::new()),
        }
    }

    /// The model the process is configured to use.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Confirm the configured model exists before the first generate call.
    async fn ensure_model_available(&self, model: &str) -> Result<(), GenAiError> {
        if self.available_models.lock().contains(model) {
            return Ok(());
        }

        let url = format!(
            "{}/v1beta/models/{}?key={}",
            self.config.api_base(),
            model,
            self.config.api_key
        );
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| GenAiError::from_http(e, "model lookup failed"))?;

        if !response.status().is_success() {
            return Err(GenAiError::ModelUnavailable {
                model: model.to_string(),
                status: Some(response.status().as_u16()),
            });
        }

        self.available_models.lock().insert(model.to_string());
        Ok(())
    }

    fn upload_ceiling(mime_type: &str) -> usize {
        if mime_type == "application/pdf" {
            MAX_PDF_BYTES
        } else {
            MAX_DEFAULT_BYTES
        }
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn upload_file(&self, args: FileUploadArgs) -> Result<UploadedFile, GenAiError> {
        let size_bytes = args.data.len();
        let max_bytes = Self::upload_ceiling(&args.mime_type);
        if size_bytes > max_bytes {
            return Err(GenAiError::FileTooLarge {
                display_name: args.display_name,
                size_bytes,
                max_bytes,
            });
        }

        let metadata = serde_json::json!({
            "file": {
                "display_name": &args.display_name,
                "mime_type": &args.mime_type,
            }
        })
        .to_string();

        let metadata_part = reqwest::multipart::Part::text(metadata)
            .mime_str("application/json")
            .map_err(|e| GenAiError::from_http(e, "invalid metadata part"))?;
        let file_part = reqwest::multipart::Part::bytes(args.data)
            .file_name(args.display_name.clone())
            .mime_str(&args.mime_type)
            .map_err(|e| GenAiError::from_http(e, "invalid file mime type"))?;
        let form = reqwest::multipart::Form::new()
            .part("metadata", metadata_part)
            .part("file", file_part);

        let url = format!(
            "{}/v1beta/files?uploadType=multipart&key={}",
            self.config.upload_base(),
            self.config.api_key
        );
        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| GenAiError::from_http(e, "file upload failed"))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| GenAiError::from_http(e, "file upload response unreadable"))?;

        if !status.is_success() {
            return Err(GenAiError::Api {
                status: Some(status.as_u16()),
                message: format!("file upload rejected: {body}"),
            });
        }

        // The endpoint nests the record under "file"; tolerate a flat body.
        let record = body.get("file").unwrap_or(&body);
        let name = record
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let uri = record
            .get("uri")
            .and_then(Value::as_str)
            .unwrap_or(&name)
            .to_string();
        let mime_type = record
            .get("mimeType")
            .and_then(Value::as_str)
            .unwrap_or(&args.mime_type)
            .to_string();
        let reported_size = record
            .get("sizeBytes")
            .and_then(|v| match v {
                Value::String(s) => s.parse::<usize>().ok(),
                Value::Number(n) => n.as_u64().map(|n| n as usize),
                _ => None,
            })
            .unwrap_or(size_bytes);

        tracing::debug!(name = %name, size_bytes = reported_size, "file uploaded");
        Ok(UploadedFile {
            name,
            uri,
            mime_type,
            size_bytes: reported_size,
        })
    }

    async fn generate(&self, request: GenerateRequest) -> Result<RawResponse, GenAiError> {
        if let Some(ref schema) = request.response_schema {
            validate_response_schema(schema)?;
        }
        self.ensure_model_available(&request.model).await?;

        let body = GenerateBody {
            contents: request.contents,
            system_instruction: request.system_instruction,
            generation_config: GenerationConfig {
                temperature: 0.2,
                top_k: 32,
                top_p: 0.95,
                response_mime_type: "application/json",
                response_schema: request.response_schema,
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.api_base(),
            request.model,
            self.config.api_key
        );
        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenAiError::from_http(e, "generateContent failed"))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GenAiError::from_http(e, "generateContent response unreadable"))?;

        if !status.is_success() {
            return Err(GenAiError::Api {
                status: Some(status.as_u16()),
                message: format!("generateContent rejected: {text}"),
            });
        }

        serde_json::from_str(&text).map_err(|source| GenAiError::MalformedPayload { text, source })
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
