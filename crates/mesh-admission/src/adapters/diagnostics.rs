//! Diagnostics sink adapters.

use std::sync::Mutex;

use crate::ports::{DiagnosticsSink, Verbosity};

/// Production sink forwarding to `tracing` with a `subsystem` field.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Create a tracing-backed sink.
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticsSink for TracingSink {
    fn log(&self, verbosity: Verbosity, message: &str) {
        match verbosity {
            Verbosity::Error => tracing::error!(subsystem = "admission", "{message}"),
            Verbosity::Warning => tracing::warn!(subsystem = "admission", "{message}"),
            Verbosity::Connection => tracing::info!(subsystem = "admission", "{message}"),
            Verbosity::General => tracing::debug!(subsystem = "admission", "{message}"),
            Verbosity::Debug => tracing::trace!(subsystem = "admission", "{message}"),
        }
    }
}

/// Sink that discards everything (benchmarks, disabled diagnostics).
#[derive(Debug, Default)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn log(&self, _verbosity: Verbosity, _message: &str) {}
}

/// Sink that records every line for test assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    lines: Mutex<Vec<(Verbosity, String)>>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded lines in emission order.
    pub fn lines(&self) -> Vec<(Verbosity, String)> {
        self.lines.lock().unwrap().clone()
    }

    /// Whether any line at `verbosity` contains `fragment`.
    pub fn contains(&self, verbosity: Verbosity, fragment: &str) -> bool {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .any(|(v, line)| *v == verbosity && line.contains(fragment))
    }

    /// Discard all recorded lines.
    pub fn reset(&self) {
        self.lines.lock().unwrap().clear();
    }
}

impl DiagnosticsSink for RecordingSink {
    fn log(&self, verbosity: Verbosity, message: &str) {
        self.lines
            .lock()
            .unwrap()
            .push((verbosity, message.to_owned()));
    }
}
