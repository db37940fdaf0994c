//! # Message Tracker
//!
//! At-most-once local admission of `(msg_id, origin)` pairs within
//! bounded memory and bounded time.
//!
//! ## Bounds
//!
//! - Entry count never exceeds the configured maximum; inserting at
//!   capacity evicts the oldest entry (linear scan, acceptable at the
//!   bounded sizes involved).
//! - Entries older than the configured timeout are removed whenever the
//!   host calls [`MessageTracker::cleanup`]; the tracker never schedules
//!   itself.
//!
//! Re-seeing a tracked key refreshes its timestamp but never resets its
//! acknowledgment: a duplicate cannot un-confirm a delivery.

pub mod config;

pub use config::TrackerConfig;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::{MessageKey, Timestamp};
use crate::ports::{DiagnosticsSink, Verbosity};

/// Tracking state for one admitted message.
#[derive(Debug, Clone, Copy)]
struct TrackedEntry {
    /// Monotonic clock at first-seen (or last refresh) time.
    timestamp: Timestamp,
    /// Whether a downstream delivery confirmation was observed.
    acknowledged: bool,
}

/// Deduplication and acknowledgment cache.
///
/// Runs exclusively in the cooperative context; no internal locking.
/// Keys are held in a `BTreeMap` so iteration (and therefore eviction
/// tie-breaking) is deterministic in `(msg_id, origin)` order.
pub struct MessageTracker {
    entries: BTreeMap<MessageKey, TrackedEntry>,
    config: TrackerConfig,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl std::fmt::Debug for MessageTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageTracker")
            .field("entries", &self.entries.len())
            .field("config", &self.config)
            .finish()
    }
}

impl MessageTracker {
    /// Create a tracker with the given bounds and diagnostics sink.
    pub fn new(config: TrackerConfig, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        Self {
            entries: BTreeMap::new(),
            config,
            diagnostics,
        }
    }

    /// Whether `key` is currently tracked as processed. Pure lookup.
    pub fn is_processed(&self, key: MessageKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Record that `key` has been processed at `now`.
    ///
    /// Already-tracked keys get their timestamp refreshed with the
    /// acknowledgment flag preserved. New keys are inserted, evicting
    /// the oldest entry first when at capacity. With `max_messages == 0`
    /// this is a no-op (tracking disabled by configuration).
    pub fn mark_processed(&mut self, key: MessageKey, now: Timestamp) {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.timestamp = now;
            self.diagnostics.log(
                Verbosity::General,
                &format!("message {key} already tracked, refreshing timestamp"),
            );
            return;
        }

        if self.config.max_messages == 0 {
            return;
        }
        if self.entries.len() >= self.config.max_messages {
            self.evict_oldest(now);
        }
        self.entries.insert(
            key,
            TrackedEntry {
                timestamp: now,
                acknowledged: false,
            },
        );
    }

    /// Record a delivery confirmation for `key`.
    ///
    /// Returns `false` if the key is not tracked (it may have expired or
    /// never been admitted). Idempotent.
    pub fn mark_acknowledged(&mut self, key: MessageKey) -> bool {
        match self.entries.get_mut(&key) {
            Some(entry) => {
                entry.acknowledged = true;
                true
            }
            None => false,
        }
    }

    /// Whether a delivery confirmation was recorded for `key`.
    ///
    /// Returns `false` both for unknown keys and for tracked but
    /// unacknowledged ones.
    pub fn is_acknowledged(&self, key: MessageKey) -> bool {
        self.entries
            .get(&key)
            .map(|entry| entry.acknowledged)
            .unwrap_or(false)
    }

    /// Remove every entry whose age at `now` has reached the configured
    /// timeout. Returns the number removed.
    pub fn cleanup(&mut self, now: Timestamp) -> usize {
        let timeout = self.config.timeout_ms;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.age_since(entry.timestamp) < timeout);
        let removed = before - self.entries.len();
        if removed > 0 {
            self.diagnostics.log(
                Verbosity::General,
                &format!("expired {removed} tracked messages"),
            );
        }
        removed
    }

    /// Lower (or raise) the capacity bound, evicting oldest entries
    /// until the current size fits.
    pub fn set_max_messages(&mut self, max: usize, now: Timestamp) {
        self.config.max_messages = max;
        while self.entries.len() > max {
            self.evict_oldest(now);
        }
    }

    /// Replace the entry timeout.
    pub fn set_timeout_ms(&mut self, timeout_ms: u32) {
        self.config.timeout_ms = timeout_ms;
    }

    /// Drop all tracked entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of currently tracked entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove the entry with the greatest age relative to `now`.
    ///
    /// Age-relative-to-now ordering equals smallest-stored-timestamp
    /// ordering whenever the counter has not wrapped inside the tracked
    /// window, and stays meaningful across a wrap. Ties resolve to the
    /// smallest key because iteration order is deterministic.
    fn evict_oldest(&mut self, now: Timestamp) {
        let mut oldest: Option<(MessageKey, u32)> = None;
        for (key, entry) in &self.entries {
            let age = now.age_since(entry.timestamp);
            match oldest {
                Some((_, best_age)) if age <= best_age => {}
                _ => oldest = Some((*key, age)),
            }
        }
        if let Some((key, _)) = oldest {
            self.entries.remove(&key);
            self.diagnostics.log(
                Verbosity::General,
                &format!("tracker at capacity, evicted oldest message {key}"),
            );
        }
    }
}
