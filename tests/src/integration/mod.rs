//! Cross-component admission scenarios.

pub mod flood;
pub mod pipeline;
