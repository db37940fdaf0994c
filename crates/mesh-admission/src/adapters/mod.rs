//! Adapters Layer - Concrete implementations of the driven ports plus
//! the cross-context hand-off queue.

pub mod diagnostics;
pub mod queue;
pub mod time;

pub use diagnostics::*;
pub use queue::*;
pub use time::*;
