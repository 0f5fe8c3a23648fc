// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Summarize a lecture's artifacts into a structured summary.

use super::{parse_payload, HandlerContext};
use crate::error::HandlerError;
use lectern_adapters::{ArtifactStore, ContentStore, LectureRecord, UploadKind, UploadStatus};
use lectern_core::JobRun;
use lectern_genai::{
    file_part, lecture_summary_schema, text_part, user_content, FileUploadArgs, GenerateRequest,
    Generator, Part, UploadedFile,
};
use serde::Deserialize;
use serde_json::{json, Value};

const SYSTEM_PROMPT: &str = "\
You are a lecture summarizer that converts lecture artifacts into structured JSON.\n\
Follow the LectureSummary schema exactly. Do not add or remove fields.\n\
Cite slide pages in meta.source.pages when the PDF provides page numbers; use [] when unknown.\n\
Populate timestamps for audio transcripts when available, otherwise return an empty array.\n\
Produce 4-6 highlights, 3-5 memorization mnemonics, and 3-6 core concepts.\n\
If the lecture language is ko, write textual fields in Korean; otherwise match the provided language.\n\
Return valid JSON only, without markdown or prose.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummarizePayload {
    #[serde(default)]
    lecture_id: Option<String>,
    #[serde(default)]
    pdf_upload_id: Option<String>,
    #[serde(default)]
    transcript_upload_id: Option<String>,
}

fn instruction_header(lecture: &LectureRecord) -> String {
    format!(
        "Lecture ID: {}\nTitle: {}\nLanguage: {}\nModality: {}\n\
         Generate a LectureSummary JSON payload using the attached sources. \
         Populate meta.source.pdfFileId and transcriptFileId with the provided file URIs.\n\
         If a source is missing, use null for its file ID and [] for any unavailable citations.",
        lecture.id, lecture.title, lecture.language, lecture.modality
    )
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
    let payload: SummarizePayload = parse_payload(job)?;
    let lecture_id = payload.lecture_id.as_deref().unwrap_or(&job.lecture_id);

    let lecture = ctx
        .content
        .lecture(lecture_id)
        .await?
        .ok_or_else(|| HandlerError::NotFound(format!("lecture {lecture_id}")))?;

    let pdf_upload = lecture.upload(UploadKind::Pdf, payload.pdf_upload_id.as_deref());
    if let Some(upload) = pdf_upload {
        if upload.status != UploadStatus::Ready {
            return Err(HandlerError::NotReady(
                "PDF upload is not marked READY yet".to_string(),
            ));
        }
    }

    let transcript_upload = match payload.transcript_upload_id.as_deref() {
        Some(id) => lecture.upload(UploadKind::Transcript, Some(id)),
        None => lecture
            .uploads
            .iter()
            .find(|u| u.kind == UploadKind::Transcript && u.status == UploadStatus::Ready),
    };

    if pdf_upload.is_none() && transcript_upload.is_none() && lecture.transcript_text.is_none() {
        return Err(HandlerError::NotReady(
            "no lecture artifacts (PDF or transcript) are ready for summarization".to_string(),
        ));
    }

    let mut source_parts: Vec<Part> = Vec::new();

    let mut pdf_ref: Option<UploadedFile> = None;
    if let Some(upload) = pdf_upload {
        let artifact = ctx.artifacts.fetch(&upload.blob_key).await?;
        let uploaded = ctx
            .generator
            .upload_file(FileUploadArgs::new(
                artifact.data,
                artifact.content_type,
                artifact.display_name,
            ))
            .await?;
        tracing::info!(job_id = %job.id, lecture_id, "pdf source uploaded");
        source_parts.push(file_part(&uploaded));
        pdf_ref = Some(uploaded);
    }

    let mut transcript_ref: Option<UploadedFile> = None;
    if let Some(upload) = transcript_upload {
        let artifact = ctx.artifacts.fetch(&upload.blob_key).await?;
        let uploaded = ctx
            .generator
            .upload_file(FileUploadArgs::new(
                artifact.data,
                artifact.content_type,
                artifact.display_name,
            ))
            .await?;
        tracing::info!(job_id = %job.id, lecture_id, "transcript source uploaded");
        source_parts.push(file_part(&uploaded));
        transcript_ref = Some(uploaded);
    } else if let Some(ref text) = lecture.transcript_text {
        let uploaded = ctx
            .generator
            .upload_file(FileUploadArgs::new(
                text.as_bytes().to_vec(),
                "text/plain; charset=utf-8",
                format!("lecture-{}-transcript.txt", lecture.id),
            ))
            .await?;
        tracing::info!(job_id = %job.id, lecture_id, "transcript text uploaded from record");
        source_parts.push(file_part(&uploaded));
        transcript_ref = Some(uploaded);
    }

    let mut parts = vec![text_part(&instruction_header(&lecture))];
    parts.extend(source_parts);

    let request = GenerateRequest::new(&ctx.config.gemini.model, vec![user_content(parts)])
        .with_system_instruction(SYSTEM_PROMPT)
        .with_response_schema(lecture_summary_schema());
    let response = ctx.generator.generate(request).await?;
    let mut summary: Value = lectern_genai::extract_structured(&response)?;

    stamp_meta(
        &mut summary,
        &lecture,
        pdf_ref.as_ref().map(|f| f.uri.as_str()),
        transcript_ref.as_ref().map(|f| f.uri.as_str()),
    );

    ctx.content.save_summary(&lecture.id, summary.clone()).await?;
    tracing::info!(job_id = %job.id, lecture_id, "summary stored");

    Ok(summary)
}

/// Overwrite the identity fields of `meta` so stored summaries always point
/// at the lecture row and the exact source files used, whatever the model
/// echoed back.
fn stamp_meta(summary: &mut Value, lecture: &LectureRecord, pdf_uri: Option<&str>, transcript_uri: Option<&str>) {
    let Some(root) = summary.as_object_mut() else {
        return;
    };
    let meta = root.entry("meta").or_insert_with(|| json!({}));
    let Some(meta) = meta.as_object_mut() else {
        return;
    };

    meta.insert("lectureId".to_string(), json!(lecture.id));
    meta.insert("title".to_string(), json!(lecture.title));
    meta.entry("language")
        .or_insert_with(|| json!(lecture.language));

    let source = meta.entry("source").or_insert_with(|| json!({}));
    if let Some(source) = source.as_object_mut() {
        source.insert("pdfFileId".to_string(), json!(pdf_uri));
        source.insert("transcriptFileId".to_string(), json!(transcript_uri));
    }
}

#[cfg(test)]
#[path = "summarize_tests.rs"]
mod tests;
