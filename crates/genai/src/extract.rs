// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Strict extraction of a structured payload from a raw response.

use crate::error::GenAiError;
use crate::types::{FinishReason, Part, RawResponse};
use serde::de::DeserializeOwned;

/// Parse the structured payload out of a raw model response.
///
/// Requires at least one candidate, a clean `STOP` completion, and a
/// text-bearing part; the text must deserialize as `T`. Every violation is a
/// distinct error carrying the candidate or raw text for diagnostics. The
/// function reads the response immutably, so re-extracting the same
/// response yields the same result.
pub fn extract_structured<T: DeserializeOwned>(response: &RawResponse) -> Result<T, GenAiError> {
    let Some(candidate) = response.candidates.first() else {
        return Err(GenAiError::MissingCandidates);
    };

    if let Some(reason) = candidate.finish_reason {
        if reason != FinishReason::Stop {
            return Err(GenAiError::IncompleteGeneration {
                finish_reason: reason.to_string(),
                candidate: serde_json::to_value(candidate).unwrap_or_default(),
            });
        }
    }

    let text = candidate
        .content
        .as_ref()
        .and_then(|content| {
            content.parts.iter().find_map(|part| match part {
                Part::Text { text } => Some(text.as_str()),
                Part::FileData { .. } => None,
            })
        })
        .ok_or_else(|| GenAiError::MissingText {
            candidate: serde_json::to_value(candidate).unwrap_or_default(),
        })?;

    serde_json::from_str(text).map_err(|source| GenAiError::MalformedPayload {
        text: text.to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
