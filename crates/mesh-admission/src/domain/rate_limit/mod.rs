//! # Rate Limiter
//!
//! Bounds the message rate accepted from a single origin over a sliding
//! time window, independent of the dedup decision.
//!
//! ## Memory bound
//!
//! Each origin's history holds at most `max_messages_per_window`
//! timestamps once pruned, and an origin whose history empties is
//! dropped from the map entirely. [`RateLimiter::allow_message`] prunes
//! only the origin it touches, so the host maintenance pass calls
//! [`RateLimiter::prune_idle`] to sweep origins that stopped sending.
//! Total memory is therefore bounded by (active origins × window
//! capacity), not by origins ever seen.

pub mod config;

pub use config::RateLimitConfig;

use std::collections::{HashMap, VecDeque};

use crate::domain::{NodeId, Timestamp};

/// Sliding-window per-origin rate limiter.
///
/// Runs exclusively in the cooperative context; no internal locking.
#[derive(Debug)]
pub struct RateLimiter {
    /// Recent accept timestamps per origin, oldest first.
    history: HashMap<NodeId, VecDeque<Timestamp>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    /// Create a rate limiter with the given budget.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            history: HashMap::new(),
            config,
        }
    }

    /// Decide whether a further message from `origin` fits its budget.
    ///
    /// Entries that have aged out of the half-open window
    /// `(now - window, now]` are pruned from the front (timestamps are
    /// appended in increasing order, so a forward scan suffices). At the
    /// limit the message is rejected without being recorded; otherwise
    /// `now` is appended and the message accepted.
    pub fn allow_message(&mut self, origin: NodeId, now: Timestamp) -> bool {
        let window_ms = self.config.window_ms;
        let limit = self.config.max_messages_per_window;

        let history = self.history.entry(origin).or_default();
        while history
            .front()
            .is_some_and(|&ts| now.age_since(ts) >= window_ms)
        {
            history.pop_front();
        }

        if history.len() >= limit {
            if history.is_empty() {
                // limit == 0: nothing recorded, drop the map entry.
                self.history.remove(&origin);
            }
            return false;
        }

        history.push_back(now);
        true
    }

    /// Drop every origin whose entire history has aged out of the
    /// window. Returns the number of origins removed.
    ///
    /// Timestamps are appended in increasing order, so an origin is
    /// idle exactly when its newest entry is outside the window. Called
    /// from the host maintenance pass; without it, origins that stop
    /// sending would pin their last window of timestamps forever and
    /// the map would grow with every distinct origin ever seen.
    pub fn prune_idle(&mut self, now: Timestamp) -> usize {
        let window_ms = self.config.window_ms;
        let before = self.history.len();
        self.history
            .retain(|_, history| history.back().is_some_and(|&ts| now.age_since(ts) < window_ms));
        before - self.history.len()
    }

    /// Forget one origin's history, e.g. on detected misbehavior.
    pub fn clear_node_history(&mut self, origin: NodeId) {
        self.history.remove(&origin);
    }

    /// Forget all history, e.g. on global reset.
    pub fn clear_all_history(&mut self) {
        self.history.clear();
    }

    /// Number of origins with recorded history.
    pub fn tracked_origins(&self) -> usize {
        self.history.len()
    }
}
