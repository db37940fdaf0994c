//! # Mesh Admission Test Suite
//!
//! Unified test crate for scenarios that cross component boundaries:
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── pipeline.rs   # End-to-end admission scenarios
//!     └── flood.rs      # Adversarial flood and memory-bound checks
//! ```
//!
//! Component-level behavior is tested inside `mesh-admission` itself;
//! this crate covers the assembled pipeline, including the
//! cross-context hand-off between a producer thread and the
//! cooperative consumer loop.

#![allow(dead_code)]

pub mod integration;
