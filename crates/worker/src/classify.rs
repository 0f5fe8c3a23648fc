// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Maps handler errors into the fatal/transient/unknown taxonomy.

use crate::error::HandlerError;
use lectern_adapters::ArtifactError;
use lectern_core::{Failure, FailureKind};
use lectern_genai::GenAiError;

/// Classify a handler error.
///
/// Fatal covers everything that cannot improve on retry: configuration and
/// contract problems, missing rows, explicit 4xx-class rejections from the
/// model API. Transient covers server/network trouble and upstream artifacts
/// still being produced; a blob 404 counts as transient since object
/// storage propagation can lag the row that references it.
pub fn classify(error: &HandlerError) -> FailureKind {
    match error {
        HandlerError::Config(_)
        | HandlerError::UnsupportedType(_)
        | HandlerError::Payload(_)
        | HandlerError::NotFound(_)
        | HandlerError::Disabled(_)
        | HandlerError::Contract(_) => FailureKind::Fatal,

        HandlerError::NotReady(_) => FailureKind::Transient,

        HandlerError::Artifact(artifact) => match artifact {
            ArtifactError::NotReady(_) | ArtifactError::NotFound(_) | ArtifactError::Fetch(_) => {
                FailureKind::Transient
            }
        },

        HandlerError::Content(_) => FailureKind::Transient,

        HandlerError::GenAi(genai) => match genai {
            GenAiError::Api { .. } => {
                if genai.is_transient() {
                    FailureKind::Transient
                } else {
                    FailureKind::Fatal
                }
            }
            GenAiError::Schema(_)
            | GenAiError::ModelUnavailable { .. }
            | GenAiError::FileTooLarge { .. }
            | GenAiError::MissingCandidates
            | GenAiError::IncompleteGeneration { .. }
            | GenAiError::MissingText { .. }
            | GenAiError::MalformedPayload { .. } => FailureKind::Fatal,
        },

        HandlerError::Internal(_) => FailureKind::Unknown,
    }
}

/// Classified failure with the error's message as the job diagnostic.
pub fn failure_from(error: &HandlerError) -> Failure {
    Failure::new(classify(error), error.to_string())
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
