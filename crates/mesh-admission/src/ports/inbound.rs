//! # Driving Ports (Inbound API)
//!
//! The public API this subsystem exposes to the node's processing loop.

use crate::domain::{MessageKey, NodeId, ValidationResult};

/// Outcome of admitting one raw inbound message.
///
/// Every variant is a completed decision: nothing is retried at this
/// layer, and rejected messages are dropped silently after logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionDecision {
    /// Fresh, well-formed, within budget. The key is `None` when the
    /// message carries no `(id, from)` identity and therefore cannot be
    /// dedup-tracked.
    Admitted {
        /// Dedup identity recorded for the message, if any.
        key: Option<MessageKey>,
    },
    /// Already processed within the tracking window; the stored entry's
    /// timestamp was refreshed.
    Duplicate {
        /// The identity that matched an existing tracked entry.
        key: MessageKey,
    },
    /// The origin exceeded its sliding-window message budget.
    RateLimited {
        /// The over-budget origin.
        origin: NodeId,
    },
    /// Structural or bounds validation failed (never
    /// [`ValidationResult::Valid`] or [`ValidationResult::RateLimitExceeded`]).
    Rejected(ValidationResult),
    /// The message cannot be parsed within the capacity ceiling and was
    /// dropped rather than truncated (fail closed).
    OutOfMemory,
}

impl AdmissionDecision {
    /// Whether the message should be handed to higher-level protocol
    /// logic.
    pub fn is_admitted(&self) -> bool {
        matches!(self, AdmissionDecision::Admitted { .. })
    }

    /// The validation code to report upstream for this decision.
    pub fn validation_code(&self) -> ValidationResult {
        match self {
            AdmissionDecision::Admitted { .. } | AdmissionDecision::Duplicate { .. } => {
                ValidationResult::Valid
            }
            AdmissionDecision::RateLimited { .. } => ValidationResult::RateLimitExceeded,
            AdmissionDecision::Rejected(result) => *result,
            AdmissionDecision::OutOfMemory => ValidationResult::MessageTooLarge,
        }
    }
}

/// Primary API for the message admission subsystem.
///
/// All methods run in the cooperative context; implementations carry no
/// internal locking and must not be called concurrently.
pub trait MessageAdmission {
    /// Run the full admission pipeline on one raw inbound message:
    /// capacity budget, bounded parse, validation, per-origin rate
    /// limit, then deduplication.
    fn admit(&mut self, raw: &[u8]) -> AdmissionDecision;

    /// Record a downstream delivery confirmation for a tracked message.
    ///
    /// Returns `false` if the key is not currently tracked (expired,
    /// evicted, or never admitted). Idempotent.
    fn acknowledge(&mut self, key: MessageKey) -> bool;

    /// Whether a delivery confirmation has been recorded for `key`.
    ///
    /// Returns `false` both for unknown keys and for tracked but not yet
    /// acknowledged ones; callers that must distinguish the two check
    /// [`MessageAdmission::is_processed`] first.
    fn is_acknowledged(&self, key: MessageKey) -> bool;

    /// Whether `key` is currently tracked as processed.
    fn is_processed(&self, key: MessageKey) -> bool;

    /// Expire aged-out tracked entries and sweep idle origins from the
    /// rate history. Not self-scheduling: the host loop calls this
    /// periodically. Returns the number of tracked entries removed.
    fn maintain(&mut self) -> usize;

    /// Drop all tracked state (dedup entries and rate histories).
    fn clear(&mut self);
}
