//! Rate limiter configuration.

use serde::{Deserialize, Serialize};

/// Configuration for per-origin rate limiting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Messages accepted from one origin within a sliding window.
    pub max_messages_per_window: usize,
    /// Window length in milliseconds. The window is half-open: an entry
    /// whose age equals the window length is already outside it.
    pub window_ms: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_messages_per_window: 10,
            window_ms: 1_000,
        }
    }
}

impl RateLimitConfig {
    /// Small budget for fast, deterministic tests.
    pub fn for_testing() -> Self {
        Self {
            max_messages_per_window: 3,
            window_ms: 100,
        }
    }
}
