//! Tracker configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the deduplication tracker.
///
/// Memory is bounded by `max_messages` regardless of traffic: capacity
/// pressure evicts the oldest entry instead of growing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Maximum tracked `(msg_id, origin)` pairs. `0` disables tracking
    /// entirely: every `mark_processed` becomes a no-op, which lets the
    /// subsystem be switched off via configuration alone.
    pub max_messages: usize,
    /// Age in milliseconds after which an unrefreshed entry is removed
    /// by `cleanup`.
    pub timeout_ms: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_messages: 500,
            timeout_ms: 60_000,
        }
    }
}

impl TrackerConfig {
    /// Small bounds for fast, deterministic tests.
    pub fn for_testing() -> Self {
        Self {
            max_messages: 5,
            timeout_ms: 1_000,
        }
    }
}
