// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the generative-model client.

use thiserror::Error;

/// A response schema that violates the restricted dialect.
///
/// `path` is the dotted location of the offending key, so the contract
/// author can fix the document without decoding a cryptic remote error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {message}")]
pub struct SchemaContractError {
    pub path: String,
    pub message: String,
}

impl SchemaContractError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Errors raised by the client and the response extractor.
#[derive(Debug, Error)]
pub enum GenAiError {
    #[error("invalid response schema contract: {0}")]
    Schema(#[from] SchemaContractError),

    /// Non-2xx answer from the API. `status` is `None` when the failure
    /// happened below HTTP (connect/timeout), which classifies as retryable.
    #[error("generative API error (status {status:?}): {message}")]
    Api {
        status: Option<u16>,
        message: String,
    },

    #[error("model \"{model}\" is unavailable (status {status:?})")]
    ModelUnavailable {
        model: String,
        status: Option<u16>,
    },

    #[error("file {display_name} exceeds upload limit ({size_bytes} bytes > {max_bytes})")]
    FileTooLarge {
        display_name: String,
        size_bytes: usize,
        max_bytes: usize,
    },

    #[error("response has no candidates")]
    MissingCandidates,

    #[error("generation finished with reason {finish_reason}, expected STOP")]
    IncompleteGeneration {
        finish_reason: String,
        /// Serialized candidate, kept for diagnostics.
        candidate: serde_json::Value,
    },

    #[error("response candidate has no text part")]
    MissingText { candidate: serde_json::Value },

    #[error("response text is not the expected structured payload: {source}; text: {text}")]
    MalformedPayload {
        text: String,
        source: serde_json::Error,
    },
}

impl GenAiError {
    /// HTTP status carried by API-level failures, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            GenAiError::Api { status, .. } | GenAiError::ModelUnavailable { status, .. } => *status,
            _ => None,
        }
    }

    /// Server-side or network trouble that may resolve on its own. Schema
    /// violations, 4xx rejections, and extraction failures are not.
    pub fn is_transient(&self) -> bool {
        match self {
            GenAiError::Api { status, .. } => match status {
                Some(code) => *code >= 500,
                None => true,
            },
            _ => false,
        }
    }

    pub(crate) fn from_http(err: reqwest::Error, context: &str) -> Self {
        GenAiError::Api {
            status: err.status().map(|s| s.as_u16()),
            message: format!("{context}: {err}"),
        }
    }
}
