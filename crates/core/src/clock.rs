// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wall-clock abstraction for deterministic time in tests.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

/// Source of epoch-millisecond timestamps.
///
/// All scheduling state (`scheduled_at_ms`, `started_at_ms`,
/// `completed_at_ms`) flows through this trait so that claim, backoff, and
/// sweep behavior can be driven by a fake clock in tests.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn epoch_ms(&self) -> u64;
}

/// Real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn epoch_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Manually advanced clock for tests.
#[derive(Debug, Clone, Default)]
pub struct FakeClock {
    now_ms: Arc<Mutex<u64>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at a specific epoch-millisecond value.
    pub fn at(now_ms: u64) -> Self {
        Self {
            now_ms: Arc::new(Mutex::new(now_ms)),
        }
    }

    /// Move the clock forward.
    pub fn advance_ms(&self, delta: u64) {
        *self.now_ms.lock() += delta;
    }

    /// Jump the clock to an absolute value.
    pub fn set_ms(&self, now_ms: u64) {
        *self.now_ms.lock() = now_ms;
    }
}

impl Clock for FakeClock {
    fn epoch_ms(&self) -> u64 {
        *self.now_ms.lock()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
