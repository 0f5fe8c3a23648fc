// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Generate a multiple-choice quiz from the latest lecture summary.

use super::{parse_payload, HandlerContext};
use crate::error::HandlerError;
use lectern_adapters::{ArtifactStore, ContentStore};
use lectern_core::JobRun;
use lectern_genai::{
    file_part, quiz_set_schema, text_part, user_content, FileUploadArgs, GenerateRequest,
    Generator, QUIZ_ITEM_COUNT,
};
use serde::Deserialize;
use serde_json::{json, Value};

const SYSTEM_PROMPT: &str = "\
You are a quiz generator. Produce a 20-question multiple-choice quiz from a lecture summary.\n\
Use the QuizSet schema exactly: four unique options per question, answer index 0-3, and a rationale explaining correctness.\n\
Balance difficulty across easy/medium/hard using summary insights and quiz seeds when present.\n\
Use pdfPages and timestamps in sourceRef when the information exists, otherwise omit those arrays.\n\
Return strictly valid JSON, no markdown or commentary.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuizPayload {
    #[serde(default)]
    lecture_id: Option<String>,
}

pub(super) async fn run<C, A, G>(
    job: &JobRun,
    ctx: &HandlerContext<C, A, G>,
) -> Result<Value, HandlerError>
where
    C: ContentStore,
    A: ArtifactStore,
    G: Generator,
{
    let payload: QuizPayload = parse_payload(job)?;
    let lecture_id = payload.lecture_id.as_deref().unwrap_or(&job.lecture_id);

    let lecture = ctx
        .content
        .lecture(lecture_id)
        .await?
        .ok_or_else(|| HandlerError::NotFound(format!("lecture {lecture_id}")))?;

    let summary = ctx
        .content
        .latest_summary(lecture_id)
        .await?
        .ok_or_else(|| {
            HandlerError::NotReady("summary not available for quiz generation".to_string())
        })?;

    // The summary rides along as a text artifact so large payloads do not
    // blow up the prompt body.
    let summary_text = serde_json::to_string_pretty(&summary)
        .map_err(|e| HandlerError::Internal(format!("serialize summary: {e}")))?;
    let uploaded = ctx
        .generator
        .upload_file(FileUploadArgs::new(
            summary_text.into_bytes(),
            "application/json",
            format!("lecture-{}-summary.json", lecture.id),
        ))
        .await?;

    let header = format!(
        "Lecture ID: {}\nTitle: {}\nLanguage: {}\n\
         Generate a QuizSet JSON payload from the attached LectureSummary document.",
        lecture.id, lecture.title, lecture.language
    );

    let request = GenerateRequest::new(
        &ctx.config.gemini.model,
        vec![user_content(vec![text_part(&header), file_part(&uploaded)])],
    )
    .with_system_instruction(SYSTEM_PROMPT)
    .with_response_schema(quiz_set_schema());
    let response = ctx.generator.generate(request).await?;
    let mut quiz: Value = lectern_genai::extract_structured(&response)?;

    check_contract(&quiz)?;
    if let Some(root) = quiz.as_object_mut() {
        root.insert("lectureId".to_string(), json!(lecture.id));
    }

    ctx.content.save_quiz(&lecture.id, quiz.clone()).await?;
    tracing::info!(job_id = %job.id, lecture_id, "quiz stored");

    Ok(quiz)
}

/// Structural checks beyond what the response schema already promised.
/// The model occasionally miscounts even under a pinned contract.
fn check_contract(quiz: &Value) -> Result<(), HandlerError> {
    let items = quiz
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| HandlerError::Contract("quiz payload has no items array".to_string()))?;

    if items.len() as u64 != QUIZ_ITEM_COUNT {
        return Err(HandlerError::Contract(format!(
            "expected {QUIZ_ITEM_COUNT} quiz items, got {}",
            items.len()
        )));
    }

    for (index, item) in items.iter().enumerate() {
        let options = item
            .get("options")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0);
        if options != 4 {
            return Err(HandlerError::Contract(format!(
                "item {index} has {options} options, expected 4"
            )));
        }
        let answer = item.get("answer").and_then(Value::as_u64);
        if !matches!(answer, Some(0..=3)) {
            return Err(HandlerError::Contract(format!(
                "item {index} answer index out of range"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "quiz_tests.rs"]
mod tests;
