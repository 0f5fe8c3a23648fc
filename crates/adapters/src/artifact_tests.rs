// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::FakeArtifactStore;

#[test]
fn basename_takes_the_last_segment() {
    assert_eq!(basename("lec-1/pdf/slides.pdf"), "slides.pdf");
    assert_eq!(basename("flat.txt"), "flat.txt");
    assert_eq!(basename(""), "");
}

#[tokio::test]
async fn fake_store_round_trips_artifacts() {
    let store = FakeArtifactStore::new();
    store.put(
        "lec-1/pdf/slides.pdf",
        Artifact {
            data: b"%PDF".to_vec(),
            size_bytes: 4,
            content_type: "application/pdf".to_string(),
            display_name: "slides.pdf".to_string(),
        },
    );

    let artifact = store.fetch("lec-1/pdf/slides.pdf").await.unwrap();
    assert_eq!(artifact.data, b"%PDF");

    let err = store.fetch("missing").await.unwrap_err();
    assert!(matches!(err, ArtifactError::NotFound(_)));
}

#[tokio::test]
async fn fake_store_reports_pending_keys_as_not_ready() {
    let store = FakeArtifactStore::new();
    store.mark_not_ready("lec-1/transcript/raw.txt");

    let err = store.fetch("lec-1/transcript/raw.txt").await.unwrap_err();
    assert!(matches!(err, ArtifactError::NotReady(_)));
}
