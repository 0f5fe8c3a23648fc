// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire types for the generative-model API.
//!
//! The response shape is modeled as a small set of tagged variants with
//! exhaustive handling, so missing or unexpected fields fail loudly in one
//! place instead of being probed optionally at every call site.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a file previously uploaded to the model API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRef {
    pub file_uri: String,
    pub mime_type: String,
}

/// One piece of request or response content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    FileData {
        #[serde(rename = "fileData")]
        file_data: FileRef,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    System,
    Model,
}

/// A role-tagged sequence of parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

/// Why a candidate stopped generating. Only `Stop` is a clean completion;
/// everything else aborts extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    Blocklist,
    MalformedFunctionCall,
    /// Reasons this client does not know yet; still not a clean stop.
    #[serde(other)]
    Other,
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinishReason::Stop => write!(f, "STOP"),
            FinishReason::MaxTokens => write!(f, "MAX_TOKENS"),
            FinishReason::Safety => write!(f, "SAFETY"),
            FinishReason::Recitation => write!(f, "RECITATION"),
            FinishReason::Blocklist => write!(f, "BLOCKLIST"),
            FinishReason::MalformedFunctionCall => write!(f, "MALFORMED_FUNCTION_CALL"),
            FinishReason::Other => write!(f, "OTHER"),
        }
    }
}

/// One generation candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_ratings: Option<serde_json::Value>,
}

/// Raw body of a generateContent response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// A file accepted by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub uri: String,
    pub mime_type: String,
    pub size_bytes: usize,
}

/// Input to [`crate::Generator::upload_file`].
#[derive(Debug, Clone)]
pub struct FileUploadArgs {
    pub data: Vec<u8>,
    pub mime_type: String,
    pub display_name: String,
}

impl FileUploadArgs {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
            display_name: display_name.into(),
        }
    }
}

/// Input to [`crate::Generator::generate`].
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub contents: Vec<Content>,
    pub system_instruction: Option<Content>,
    /// Contract for the structured response; validated before sending.
    pub response_schema: Option<serde_json::Value>,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, contents: Vec<Content>) -> Self {
        Self {
            model: model.into(),
            contents,
            system_instruction: None,
            response_schema: None,
        }
    }

    pub fn with_system_instruction(mut self, text: &str) -> Self {
        self.system_instruction = Some(system_instruction(text));
        self
    }

    pub fn with_response_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

/// A user turn built from parts.
pub fn user_content(parts: Vec<Part>) -> Content {
    Content {
        role: Role::User,
        parts,
    }
}

/// A system instruction with a single text part.
pub fn system_instruction(text: &str) -> Content {
    Content {
        role: Role::System,
        parts: vec![text_part(text)],
    }
}

pub fn text_part(text: &str) -> Part {
    Part::Text {
        text: text.to_string(),
    }
}

pub fn file_part(file: &UploadedFile) -> Part {
    Part::FileData {
        file_data: FileRef {
            file_uri: file.uri.clone(),
            mime_type: file.mime_type.clone(),
        },
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
