//! Ports Layer - Trait boundaries between the subsystem and its host
//!
//! - **Inbound (driving):** the admission API the host calls per message
//! - **Outbound (driven):** the clock and diagnostics sink the host provides

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
