//! Domain Layer - Pure admission logic with no I/O
//!
//! This module contains the core admission-control logic:
//! - Message identity and wraparound-safe timestamps
//! - Deduplication tracker with bounded capacity and TTL expiry
//! - Sliding-window per-origin rate limiter
//! - Structural and bounds validation of parsed messages
//! - Parse-buffer capacity estimation (allocation bomb defense)

pub mod capacity;
pub mod rate_limit;
pub mod tracker;
/// Core domain types (identities, timestamps)
pub mod types;
pub mod validator;

pub use capacity::*;
pub use rate_limit::*;
pub use tracker::*;
pub use types::*;
pub use validator::*;
