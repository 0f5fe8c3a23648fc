// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::JobId;

#[test]
fn job_id_display_and_eq() {
    let id = JobId::new("job-1");
    assert_eq!(id.to_string(), "job-1");
    assert_eq!(id, "job-1");
    assert_eq!(id.as_str(), "job-1");
}

#[test]
fn job_id_from_str() {
    let id: JobId = "test".into();
    assert_eq!(id.as_str(), "test");
}

#[test]
fn job_id_random_is_unique() {
    assert_ne!(JobId::random(), JobId::random());
}

#[test]
fn job_id_serde() {
    let id = JobId::new("my-job");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"my-job\"");

    let parsed: JobId = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, id);
}
