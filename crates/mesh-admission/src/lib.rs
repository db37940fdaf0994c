//! # Message Admission Subsystem
//!
//! Bounded-resource admission control for an embedded mesh node. Every
//! inbound message relayed through the mesh is untrusted: it may be a
//! duplicate, malformed, oversized, or part of a flood from a single
//! origin. This crate decides, per message, whether it is fresh,
//! well-formed, within size limits, and inside its origin's rate budget
//! *before* any routing or application logic touches it.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** Pure admission logic, no I/O and no clocks
//!   (dedup tracker, rate limiter, validator, capacity estimator)
//! - **Ports Layer:** Trait definitions for the clock and diagnostics
//! - **Service Layer:** The per-message admission pipeline
//! - **Adapters Layer:** Concrete clock, diagnostics, and the
//!   cross-context hand-off queue
//!
//! ## Resource bounds
//!
//! - Tracked-message count is hard-capped; capacity pressure evicts the
//!   oldest entry, never errors.
//! - Per-origin rate history is bounded by the window limit, and idle
//!   origins are dropped from the map entirely.
//! - Parse buffers are sized from a cheap structural scan and clamped to
//!   a hard ceiling; messages that cannot fit are dropped (fail closed).
//! - Timestamps are 32-bit millisecond counters; all age arithmetic is
//!   wraparound-safe across the ~49.7 day counter wrap.
//!
//! ## Concurrency model
//!
//! Domain components and the service run in a single cooperative context
//! and carry no internal locking. [`CrossContextQueue`] is the one
//! component safe for concurrent use: it hands fixed-size work items from
//! an interrupt-like producer to the cooperative loop without unbounded
//! blocking on either side.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use mesh_admission::{
//!     AdmissionConfig, AdmissionDecision, AdmissionService,
//!     FixedTimeSource, MessageAdmission, NullSink,
//! };
//!
//! let time = Arc::new(FixedTimeSource::new(1_000));
//! let mut service = AdmissionService::new(
//!     AdmissionConfig::default(),
//!     time.clone(),
//!     Arc::new(NullSink),
//! );
//!
//! let raw = br#"{"type":4,"id":100,"from":7,"dest":0,"msg":"hello"}"#;
//! assert!(matches!(service.admit(raw), AdmissionDecision::Admitted { .. }));
//! // Same (id, from) pair again: silently deduplicated.
//! assert!(matches!(service.admit(raw), AdmissionDecision::Duplicate { .. }));
//! ```

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export main types
pub use adapters::{
    CrossContextQueue, FixedTimeSource, MonotonicClock, NullSink, QueueError, RecordingSink,
    TracingSink, DEFAULT_QUEUE_CAPACITY,
};
pub use domain::{
    CapacityConfig, CapacityEstimator, CapacityExceeded, MessageKey, MessageTracker,
    MessageValidator, NodeId, RateLimitConfig, RateLimiter, Timestamp, TrackerConfig,
    ValidationConfig, ValidationResult,
};
pub use ports::{AdmissionDecision, DiagnosticsSink, MessageAdmission, TimeSource, Verbosity};
pub use service::{AdmissionConfig, AdmissionService, AdmissionStats};
