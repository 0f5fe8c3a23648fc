// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File-backed queue store shared between independent processes.

use crate::store::{QueueStore, StoreError};
use async_trait::async_trait;
use fs2::FileExt;
use lectern_core::{JobId, JobRun, JobStatus, JobUpdate};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

/// Queue store persisted as one JSON document, guarded by an exclusive
/// advisory file lock.
///
/// Every operation takes the lock, loads, mutates, and atomically replaces
/// the document (write to `.tmp`, fsync, rename), so `conditional_claim`
/// keeps its compare-and-swap contract across worker and sweep processes
/// with no other coordination channel.
#[derive(Debug, Clone)]
pub struct FileQueue {
    path: PathBuf,
    lock_path: PathBuf,
}

impl FileQueue {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let lock_path = path.with_extension("lock");
        Self { path, lock_path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn acquire_lock(&self) -> Result<File, StoreError> {
        if let Some(parent) = self.lock_path.parent() {
            fs::create_dir_all(parent).map_err(|e| unavailable("create state dir", &e))?;
        }
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)
            .map_err(|e| unavailable("open lock file", &e))?;
        lock.lock_exclusive()
            .map_err(|e| unavailable("acquire lock", &e))?;
        Ok(lock)
    }

    fn load(&self) -> Result<BTreeMap<String, JobRun>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(unavailable("open job file", &e)),
        };
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| StoreError::Unavailable(format!("corrupt job file: {e}")))
    }

    /// Write to `.tmp`, fsync, then rename so a crash mid-save never leaves
    /// a half-written document behind.
    fn save(&self, jobs: &BTreeMap<String, JobRun>) -> Result<(), StoreError> {
        let tmp_path = self.path.with_extension("tmp");
        {
            let file = File::create(&tmp_path).map_err(|e| unavailable("create tmp file", &e))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, jobs)
                .map_err(|e| StoreError::Unavailable(format!("serialize jobs: {e}")))?;
            let file = writer
                .into_inner()
                .map_err(|e| StoreError::Unavailable(format!("flush jobs: {e}")))?;
            file.sync_all().map_err(|e| unavailable("sync job file", &e))?;
        }
        fs::rename(&tmp_path, &self.path).map_err(|e| unavailable("replace job file", &e))
    }

    /// Lock, load, mutate, save. The lock releases when the guard drops.
    fn with_jobs<T>(
        &self,
        mutate: impl FnOnce(&mut BTreeMap<String, JobRun>) -> T,
    ) -> Result<T, StoreError> {
        let _lock = self.acquire_lock()?;
        let mut jobs = self.load()?;
        let result = mutate(&mut jobs);
        self.save(&jobs)?;
        Ok(result)
    }

    /// Lock and load, without writing back.
    fn read_jobs<T>(
        &self,
        read: impl FnOnce(&BTreeMap<String, JobRun>) -> T,
    ) -> Result<T, StoreError> {
        let _lock = self.acquire_lock()?;
        let jobs = self.load()?;
        Ok(read(&jobs))
    }
}

fn unavailable(context: &str, error: &std::io::Error) -> StoreError {
    StoreError::Unavailable(format!("{context}: {error}"))
}

#[async_trait]
impl QueueStore for FileQueue {
    async fn insert(&self, job: JobRun) -> Result<(), StoreError> {
        self.with_jobs(|jobs| {
            jobs.entry(job.id.as_str().to_string()).or_insert(job);
        })
    }

    async fn find_eligible_pending(&self, now_ms: u64) -> Result<Option<JobRun>, StoreError> {
        self.read_jobs(|jobs| {
            jobs.values()
                .filter(|job| job.is_eligible(now_ms))
                .min_by(|a, b| {
                    a.scheduled_at_ms
                        .cmp(&b.scheduled_at_ms)
                        .then_with(|| a.id.as_str().cmp(b.id.as_str()))
                })
                .cloned()
        })
    }

    async fn conditional_claim(&self, id: &JobId, now_ms: u64) -> Result<u64, StoreError> {
        self.with_jobs(|jobs| match jobs.get_mut(id.as_str()) {
            Some(job) if job.status == JobStatus::Pending => {
                job.status = JobStatus::Processing;
                job.started_at_ms = Some(now_ms);
                job.attempts += 1;
                1
            }
            _ => 0,
        })
    }

    async fn get(&self, id: &JobId) -> Result<Option<JobRun>, StoreError> {
        self.read_jobs(|jobs| jobs.get(id.as_str()).cloned())
    }

    async fn update(&self, id: &JobId, update: JobUpdate) -> Result<(), StoreError> {
        self.with_jobs(|jobs| match jobs.get_mut(id.as_str()) {
            Some(job) => {
                update.apply(job);
                Ok(())
            }
            None => Err(StoreError::JobNotFound(id.clone())),
        })?
    }

    async fn find_processing_older_than(
        &self,
        threshold_ms: u64,
    ) -> Result<Vec<JobRun>, StoreError> {
        self.read_jobs(|jobs| {
            jobs.values()
                .filter(|job| {
                    job.status == JobStatus::Processing
                        && matches!(job.started_at_ms, Some(started) if started < threshold_ms)
                })
                .cloned()
                .collect()
        })
    }

    async fn find_pending_at_attempt_ceiling(&self, max: u32) -> Result<Vec<JobRun>, StoreError> {
        self.read_jobs(|jobs| {
            jobs.values()
                .filter(|job| job.status == JobStatus::Pending && job.attempts >= max)
                .cloned()
                .collect()
        })
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
