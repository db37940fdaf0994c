//! Time source adapters.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use crate::domain::Timestamp;
use crate::ports::TimeSource;

/// Production time source: milliseconds since construction on a 32-bit
/// counter.
///
/// The counter wraps after ~49.7 days of uptime; all consumers compute
/// ages through [`Timestamp::age_since`], which stays correct across
/// one wrap, so the narrow counter is retained deliberately rather than
/// widened.
#[derive(Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Anchor the counter at the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn now(&self) -> Timestamp {
        // Truncation is the wrap.
        Timestamp::from_millis(self.origin.elapsed().as_millis() as u32)
    }
}

/// Settable time source for deterministic tests.
#[derive(Debug)]
pub struct FixedTimeSource {
    now_ms: AtomicU32,
}

impl FixedTimeSource {
    /// Create a source reporting `now_ms`.
    pub fn new(now_ms: u32) -> Self {
        Self {
            now_ms: AtomicU32::new(now_ms),
        }
    }

    /// Jump to an absolute counter value.
    pub fn set(&self, now_ms: u32) {
        self.now_ms.store(now_ms, Ordering::Relaxed);
    }

    /// Advance the counter, wrapping at the 32-bit boundary.
    pub fn advance(&self, ms: u32) {
        self.now_ms.fetch_add(ms, Ordering::Relaxed);
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.now_ms.load(Ordering::Relaxed))
    }
}
