// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Three-way failure taxonomy consumed by the retry engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a handler failure should be treated by the resolution path.
///
/// The classification is advisory: the retry engine combines it with the
/// attempt ceiling to decide between reschedule and terminal escalation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Never retried. Configuration errors, contract violations, missing
    /// resources that cannot self-resolve, explicit 4xx-class rejections.
    Fatal,
    /// Retried until the attempt ceiling. Network/server errors and
    /// dependencies that are still being produced upstream.
    Transient,
    /// Unclassified. Retried like [`FailureKind::Transient`] but logged
    /// louder so the gap in classification gets noticed.
    Unknown,
}

impl FailureKind {
    /// Whether a failure of this kind may be rescheduled at all.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, FailureKind::Fatal)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Fatal => write!(f, "fatal"),
            FailureKind::Transient => write!(f, "transient"),
            FailureKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// A classified handler failure with its human-readable diagnostic.
///
/// The message ends up in the job's `last_error` column, so it should be
/// inspectable without consulting logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Fatal, message)
    }

    pub fn transient(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Transient, message)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}
