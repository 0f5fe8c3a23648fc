// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment-derived configuration, parsed once at process start.
//!
//! No lazily initialized globals: binaries build a config up front and pass
//! it by reference into the worker loop and handlers. Validation failures
//! abort startup before any loop runs.

use lectern_core::{JobType, RetryPolicy};
use lectern_genai::GeminiConfig;
use lectern_queue::SweepConfig;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("{0} must be a positive integer")]
    InvalidNumber(&'static str),
    #[error("no usable state directory (set LECTERN_STATE_DIR or HOME)")]
    NoStateDir,
}

/// Settings for the worker fleet (`lecternd`).
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub poll_interval: Duration,
    pub max_attempts: u32,
    /// Transcription gets a larger budget than summarize/quiz.
    pub transcribe_max_attempts: u32,
    pub concurrency: u32,
    pub instance_id: String,
    pub audio_pipeline_enabled: bool,
    pub gemini: GeminiConfig,
    /// Public base URL of the object store holding uploads.
    pub blob_base_url: String,
    /// Base URL of the dashboard's internal content API.
    pub content_api_base_url: String,
    pub state_dir: PathBuf,
}

impl WorkerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key-value source; the seam the tests use.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("GEMINI_API_KEY")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingVar("GEMINI_API_KEY"))?;
        let model =
            lookup("GEMINI_MODEL").unwrap_or_else(|| "gemini-flash-latest".to_string());
        let mut gemini = GeminiConfig::new(api_key, model);
        if let Some(base_url) = lookup("GEMINI_API_BASE_URL") {
            gemini = gemini.with_base_url(base_url);
        }

        Ok(Self {
            poll_interval: Duration::from_millis(positive_u64(
                &lookup,
                "JOB_POLL_INTERVAL_MS",
                5_000,
            )?),
            max_attempts: positive_u32(&lookup, "JOB_MAX_ATTEMPTS", 3)?,
            transcribe_max_attempts: positive_u32(&lookup, "JOB_MAX_ATTEMPTS_TRANSCRIBE", 5)?,
            concurrency: positive_u32(&lookup, "WORKER_CONCURRENCY", 1)?,
            instance_id: lookup("WORKER_INSTANCE_ID").unwrap_or_else(|| "local".to_string()),
            audio_pipeline_enabled: flag(&lookup, "ENABLE_AUDIO_PIPELINE"),
            gemini,
            blob_base_url: lookup("BLOB_PUBLIC_BASE_URL")
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingVar("BLOB_PUBLIC_BASE_URL"))?,
            content_api_base_url: lookup("CONTENT_API_BASE_URL")
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingVar("CONTENT_API_BASE_URL"))?,
            state_dir: state_dir(&lookup)?,
        })
    }

    /// Retry budget for one job type; only the ceiling varies.
    pub fn retry_policy_for(&self, job_type: JobType) -> RetryPolicy {
        let max_attempts = match job_type {
            JobType::Transcribe => self.transcribe_max_attempts,
            _ => self.max_attempts,
        };
        RetryPolicy::with_max_attempts(max_attempts)
    }

    /// Path of the shared job file under the state directory.
    pub fn jobs_path(&self) -> PathBuf {
        self.state_dir.join("jobs.json")
    }
}

/// Settings for the recovery sweep (`lectern-sweep`).
#[derive(Debug, Clone)]
pub struct SweepSettings {
    pub sweep: SweepConfig,
    pub state_dir: PathBuf,
}

impl SweepSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            sweep: SweepConfig {
                processing_timeout_ms: positive_u64(&lookup, "JOB_PROCESSING_TIMEOUT_MINUTES", 15)?
                    * 60_000,
                reschedule_delay_ms: positive_u64(&lookup, "JOB_RESCHEDULE_DELAY_SECONDS", 60)?
                    * 1_000,
                max_attempts: positive_u32(&lookup, "JOB_SWEEP_MAX_ATTEMPTS", 5)?,
            },
            state_dir: state_dir(&lookup)?,
        })
    }

    pub fn jobs_path(&self) -> PathBuf {
        self.state_dir.join("jobs.json")
    }
}

/// Resolve state directory: LECTERN_STATE_DIR > XDG_STATE_HOME/lectern >
/// ~/.local/state/lectern
fn state_dir(lookup: &impl Fn(&str) -> Option<String>) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = lookup("LECTERN_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = lookup("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("lectern"));
    }
    let home = lookup("HOME").ok_or(ConfigError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/lectern"))
}

fn positive_u64(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: u64,
) -> Result<u64, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(raw) if raw.is_empty() => Ok(default),
        Some(raw) => match raw.parse::<u64>() {
            Ok(value) if value > 0 => Ok(value),
            _ => Err(ConfigError::InvalidNumber(var)),
        },
    }
}

fn positive_u32(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: u32,
) -> Result<u32, ConfigError> {
    positive_u64(lookup, var, u64::from(default)).map(|v| v.min(u64::from(u32::MAX)) as u32)
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, var: &str) -> bool {
    lookup(var)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
