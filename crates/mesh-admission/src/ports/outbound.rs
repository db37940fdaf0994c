//! # Driven Ports (Outbound SPI)
//!
//! Interfaces this subsystem **requires** the host application to
//! implement. Both exist so the domain stays deterministic and testable:
//! time and diagnostics are injected, never reached for globally.

use crate::domain::Timestamp;

/// Abstract interface for time-related operations.
///
/// Enables deterministic testing by injecting controllable time sources.
/// Production implementations wrap a monotonic clock; tests use fixed
/// timestamps.
///
/// # Example Implementation
///
/// ```rust,ignore
/// struct TickCounterSource;
///
/// impl TimeSource for TickCounterSource {
///     fn now(&self) -> Timestamp {
///         Timestamp::from_millis(hal::uptime_ms() as u32)
///     }
/// }
/// ```
pub trait TimeSource: Send + Sync {
    /// Get the current monotonic timestamp.
    fn now(&self) -> Timestamp;
}

/// Verbosity tag attached to every diagnostic line.
///
/// Ordered from most to least severe; sinks may filter on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verbosity {
    /// Unrecoverable or unexpected conditions.
    Error,
    /// Dropped messages and budget violations.
    Warning,
    /// Peer/link lifecycle events.
    Connection,
    /// Routine admission activity (refreshes, expiries).
    General,
    /// High-volume tracing detail.
    Debug,
}

impl std::fmt::Display for Verbosity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verbosity::Error => write!(f, "ERROR"),
            Verbosity::Warning => write!(f, "WARNING"),
            Verbosity::Connection => write!(f, "CONNECTION"),
            Verbosity::General => write!(f, "GENERAL"),
            Verbosity::Debug => write!(f, "DEBUG"),
        }
    }
}

/// Abstract interface for emitting diagnostics.
///
/// Injected at construction instead of a process-wide logger so tests
/// can assert on emitted lines without global state. Implementations
/// must be cheap: domain hot paths call this with preformatted text.
pub trait DiagnosticsSink: Send + Sync {
    /// Emit one diagnostic line at the given verbosity.
    fn log(&self, verbosity: Verbosity, message: &str);
}
