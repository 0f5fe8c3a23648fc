// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn wire_lecture_maps_into_record() {
    let wire: WireLecture = serde_json::from_value(json!({
        "id": "lec-1",
        "title": "Signals",
        "language": "ko",
        "modality": "mixed",
        "uploads": [
            {
                "id": "up-1",
                "type": "PDF",
                "status": "READY",
                "blobKey": "lec-1/pdf/slides.pdf",
                "contentType": "application/pdf"
            },
            {
                "id": "up-2",
                "type": "TRANSCRIPT",
                "status": "UPLOADING",
                "blobKey": "lec-1/transcript/raw.txt",
                "contentType": "text/plain"
            }
        ],
        "summaries": [ { "payload": { "meta": {} } } ],
        "jobs": []
    }))
    .unwrap();

    let record = wire.into_record();
    assert_eq!(record.id, "lec-1");
    assert_eq!(record.uploads.len(), 2);
    assert_eq!(record.uploads[0].kind, UploadKind::Pdf);
    assert_eq!(record.uploads[1].status, UploadStatus::Uploading);
    assert_eq!(record.transcript_text, None);
}

#[test]
fn upload_lookup_prefers_explicit_id() {
    let record = LectureRecord {
        id: "lec-1".to_string(),
        title: "Signals".to_string(),
        language: "en".to_string(),
        modality: "pdf".to_string(),
        uploads: vec![
            UploadRecord {
                id: "up-1".to_string(),
                kind: UploadKind::Pdf,
                status: UploadStatus::Ready,
                blob_key: "a".to_string(),
                content_type: "application/pdf".to_string(),
            },
            UploadRecord {
                id: "up-2".to_string(),
                kind: UploadKind::Pdf,
                status: UploadStatus::Ready,
                blob_key: "b".to_string(),
                content_type: "application/pdf".to_string(),
            },
        ],
        transcript_text: None,
    };

    assert_eq!(record.upload(UploadKind::Pdf, None).map(|u| u.id.as_str()), Some("up-1"));
    assert_eq!(
        record.upload(UploadKind::Pdf, Some("up-2")).map(|u| u.id.as_str()),
        Some("up-2")
    );
    assert!(record.upload(UploadKind::Transcript, None).is_none());
    // An explicit id must match both id and kind.
    assert!(record.upload(UploadKind::Transcript, Some("up-2")).is_none());
}

#[test]
fn wire_enums_parse_screaming_snake() {
    let kind: UploadKind = serde_json::from_value(json!("TRANSCRIPT")).unwrap();
    assert_eq!(kind, UploadKind::Transcript);
    let status: UploadStatus = serde_json::from_value(json!("FAILED")).unwrap();
    assert_eq!(status, UploadStatus::Failed);
}
