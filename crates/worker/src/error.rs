// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed errors raised by job handlers.
//!
//! Handlers never write job state; they raise one of these and the runner
//! feeds the classification into the retry engine.

use lectern_adapters::{ArtifactError, ContentError};
use lectern_genai::GenAiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unsupported job type: {0}")]
    UnsupportedType(String),

    /// The job's stored payload does not parse as the shape its type needs.
    #[error("invalid job payload: {0}")]
    Payload(String),

    /// A referenced row (lecture, upload) does not exist and will not appear
    /// on its own.
    #[error("{0} not found")]
    NotFound(String),

    /// An upstream artifact is still being produced; retry later.
    #[error("dependency not ready: {0}")]
    NotReady(String),

    /// A required pipeline is switched off for this deployment.
    #[error("pipeline disabled: {0}")]
    Disabled(String),

    /// Generated output that parses but breaks its contract (e.g. wrong
    /// quiz item count).
    #[error("generated payload violates contract: {0}")]
    Contract(String),

    #[error(transparent)]
    GenAi(#[from] GenAiError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Content(#[from] ContentError),

    /// Anything that slipped past the taxonomy; retried but logged loudly.
    #[error("internal error: {0}")]
    Internal(String),
}
