//! Service Layer - The per-message admission pipeline
//!
//! Wires the domain components to the driven ports. For one raw
//! inbound message: capacity budget → bounded parse → validation →
//! per-origin rate limit → deduplication. Every rejection is a
//! completed decision, logged and dropped silently; nothing at this
//! layer is retried.

use std::sync::Arc;

use serde_json::Value;

use serde::{Deserialize, Serialize};

use crate::domain::{
    CapacityConfig, CapacityEstimator, MessageKey, MessageTracker, MessageValidator, NodeId,
    RateLimitConfig, RateLimiter, TrackerConfig, ValidationConfig, ValidationResult,
};
use crate::ports::{AdmissionDecision, DiagnosticsSink, MessageAdmission, TimeSource, Verbosity};

/// Aggregate configuration for the whole subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdmissionConfig {
    /// Dedup tracker bounds.
    pub tracker: TrackerConfig,
    /// Per-origin rate budget.
    pub rate_limit: RateLimitConfig,
    /// Structural and bounds validation limits.
    pub validation: ValidationConfig,
    /// Parse-buffer sizing.
    pub capacity: CapacityConfig,
}

impl AdmissionConfig {
    /// Tight bounds across all components for deterministic tests.
    pub fn for_testing() -> Self {
        Self {
            tracker: TrackerConfig::for_testing(),
            rate_limit: RateLimitConfig::for_testing(),
            validation: ValidationConfig::for_testing(),
            capacity: CapacityConfig::for_testing(),
        }
    }
}

/// Counters over every decision made since construction (or reset).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdmissionStats {
    /// Messages handed to higher-level logic.
    pub admitted: u64,
    /// Silently dropped duplicates.
    pub duplicates: u64,
    /// Validation and parse rejections.
    pub rejected: u64,
    /// Rate-budget rejections.
    pub rate_limited: u64,
    /// Fail-closed capacity drops.
    pub out_of_memory: u64,
}

/// The message admission service.
///
/// Owns all four domain components exclusively and runs in the
/// cooperative context only; no internal locking. Time and diagnostics
/// are injected through the outbound ports.
pub struct AdmissionService {
    estimator: CapacityEstimator,
    validator: MessageValidator,
    rate_limiter: RateLimiter,
    tracker: MessageTracker,
    time: Arc<dyn TimeSource>,
    diagnostics: Arc<dyn DiagnosticsSink>,
    stats: AdmissionStats,
}

impl std::fmt::Debug for AdmissionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdmissionService")
            .field("tracked", &self.tracker.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl AdmissionService {
    /// Create the service with injected time and diagnostics.
    pub fn new(
        config: AdmissionConfig,
        time: Arc<dyn TimeSource>,
        diagnostics: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        Self {
            estimator: CapacityEstimator::new(config.capacity),
            validator: MessageValidator::new(config.validation),
            rate_limiter: RateLimiter::new(config.rate_limit),
            tracker: MessageTracker::new(config.tracker, Arc::clone(&diagnostics)),
            time,
            diagnostics,
            stats: AdmissionStats::default(),
        }
    }

    /// Decision counters since construction.
    pub fn stats(&self) -> AdmissionStats {
        self.stats
    }

    /// Number of currently tracked dedup entries.
    pub fn tracked_messages(&self) -> usize {
        self.tracker.len()
    }

    /// Number of origins with recorded rate history.
    pub fn tracked_origins(&self) -> usize {
        self.rate_limiter.tracked_origins()
    }

    /// Forget one origin's rate history (e.g. on detected misbehavior).
    pub fn clear_origin_history(&mut self, origin: NodeId) {
        self.rate_limiter.clear_node_history(origin);
    }

    /// Extract the dedup identity, when the message carries one. An
    /// `id` wider than a node's 32-bit space cannot be tracked and is
    /// treated as absent.
    fn message_key(fields: &Value, origin: Option<NodeId>) -> Option<MessageKey> {
        let msg_id = fields
            .get("id")
            .and_then(Value::as_u64)
            .and_then(|id| u32::try_from(id).ok())?;
        Some(MessageKey::new(msg_id, origin?))
    }
}

impl MessageAdmission for AdmissionService {
    fn admit(&mut self, raw: &[u8]) -> AdmissionDecision {
        let now = self.time.now();

        if let Err(err) = self.estimator.budget(raw) {
            self.stats.out_of_memory += 1;
            self.diagnostics
                .log(Verbosity::Warning, &format!("dropping message: {err}"));
            return AdmissionDecision::OutOfMemory;
        }

        let parsed: Value = match serde_json::from_slice(raw) {
            Ok(value) => value,
            Err(_) => {
                self.stats.rejected += 1;
                self.diagnostics
                    .log(Verbosity::Debug, "dropping unparseable message");
                return AdmissionDecision::Rejected(ValidationResult::InvalidJson);
            }
        };

        let result = self.validator.validate_message(&parsed, raw.len());
        if result != ValidationResult::Valid {
            self.stats.rejected += 1;
            self.diagnostics.log(
                Verbosity::Debug,
                &format!(
                    "dropping message: {}",
                    self.validator.get_error_message(result)
                ),
            );
            return AdmissionDecision::Rejected(result);
        }

        // Validation guarantees a present `from` is an in-range u32.
        let origin = parsed
            .get("from")
            .and_then(Value::as_u64)
            .map(|id| NodeId::new(id as u32));

        if let Some(origin) = origin {
            if !self.rate_limiter.allow_message(origin, now) {
                self.stats.rate_limited += 1;
                self.diagnostics.log(
                    Verbosity::Debug,
                    &format!("origin {origin} over message budget, dropping"),
                );
                return AdmissionDecision::RateLimited { origin };
            }
        }

        match Self::message_key(&parsed, origin) {
            Some(key) if self.tracker.is_processed(key) => {
                // Refresh, don't duplicate; acknowledgment survives.
                self.tracker.mark_processed(key, now);
                self.stats.duplicates += 1;
                AdmissionDecision::Duplicate { key }
            }
            key => {
                if let Some(key) = key {
                    self.tracker.mark_processed(key, now);
                }
                self.stats.admitted += 1;
                AdmissionDecision::Admitted { key }
            }
        }
    }

    fn acknowledge(&mut self, key: MessageKey) -> bool {
        self.tracker.mark_acknowledged(key)
    }

    fn is_acknowledged(&self, key: MessageKey) -> bool {
        self.tracker.is_acknowledged(key)
    }

    fn is_processed(&self, key: MessageKey) -> bool {
        self.tracker.is_processed(key)
    }

    fn maintain(&mut self) -> usize {
        let now = self.time.now();
        let removed = self.tracker.cleanup(now);
        let pruned = self.rate_limiter.prune_idle(now);
        let stats = self.stats;
        self.diagnostics.log(
            Verbosity::Debug,
            &format!(
                "maintenance: {} tracked, {pruned} idle origins pruned, {} admitted, \
                 {} duplicates, {} rejected, {} rate limited",
                self.tracker.len(),
                stats.admitted,
                stats.duplicates,
                stats.rejected,
                stats.rate_limited
            ),
        );
        removed
    }

    fn clear(&mut self) {
        self.tracker.clear();
        self.rate_limiter.clear_all_history();
    }
}
