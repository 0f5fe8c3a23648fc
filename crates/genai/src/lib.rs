// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lectern-genai: contract-validated client for the generative-model API
//!
//! The consuming API silently misbehaves on schema shapes outside its
//! supported subset, so every response schema is validated locally before a
//! request goes out, and every response is extracted through one strict
//! path instead of optional-field probing.

mod client;
mod contracts;
mod error;
mod extract;
mod schema;
mod types;

pub use client::{GeminiClient, GeminiConfig, Generator, MAX_DEFAULT_BYTES, MAX_PDF_BYTES};
pub use contracts::{lecture_summary_schema, quiz_set_schema, QUIZ_ITEM_COUNT};
pub use error::{GenAiError, SchemaContractError};
pub use extract::extract_structured;
pub use schema::validate_response_schema;
pub use types::{
    file_part, system_instruction, text_part, user_content, Candidate, Content, FileRef,
    FileUploadArgs, FinishReason, GenerateRequest, Part, RawResponse, Role, UploadedFile,
};
