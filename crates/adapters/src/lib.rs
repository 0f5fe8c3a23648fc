// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for the worker's external collaborators

pub mod artifact;
pub mod content;
pub mod traced;

pub use artifact::{Artifact, ArtifactError, ArtifactStore, HttpBlobStore};
pub use content::{
    ContentError, ContentStore, LectureRecord, RestContentStore, TranscriptRecord, UploadKind,
    UploadRecord, UploadStatus,
};
pub use traced::TracedQueue;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod test_support;
#[cfg(any(test, feature = "test-support"))]
pub use test_support::{FakeArtifactStore, FakeContentStore, FakeGenerator};
