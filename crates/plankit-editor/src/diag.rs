//! Diagnostics sink injected into each tool.
//!
//! Tools report noteworthy transitions (discarded gestures, out-of-sequence
//! calls) through this trait rather than a shared mutable debug store, so
//! tests can capture them and production wires them to `tracing`.

use std::cell::RefCell;

use tracing::debug;

/// Receives developer-facing diagnostics from tools.
pub trait DiagnosticsSink {
    fn note(&self, source: &str, message: &str);
}

/// Forwards diagnostics to the `tracing` subscriber at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn note(&self, source: &str, message: &str) {
        debug!(source, "{message}");
    }
}

/// Discards all diagnostics.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn note(&self, _source: &str, _message: &str) {}
}

/// Buffers diagnostics for inspection; used by tests.
#[derive(Debug, Default)]
pub struct BufferSink {
    entries: RefCell<Vec<(String, String)>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(String, String)> {
        self.entries.borrow().clone()
    }
}

impl DiagnosticsSink for BufferSink {
    fn note(&self, source: &str, message: &str) {
        self.entries
            .borrow_mut()
            .push((source.to_string(), message.to_string()));
    }
}
