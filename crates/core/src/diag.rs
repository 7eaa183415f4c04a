//! Diagnostic sink abstraction.
//!
//! The resolver and orchestrator report per-account conditions through an
//! injected `DiagnosticSink` instead of writing to a process-wide console.
//! Secrets never pass through a sink: callers log account labels, never
//! cookie values.

use std::sync::Mutex;

/// Receives one-line diagnostics from the claim pipeline.
pub trait DiagnosticSink: Send + Sync {
    /// Record a single diagnostic line.
    fn log(&self, message: &str);
}

// ──────────────────────────────────────────────
// ConsoleSink
// ──────────────────────────────────────────────

/// Sink that writes each diagnostic to stderr, honouring a quiet flag.
pub struct ConsoleSink {
    quiet: bool,
}

impl ConsoleSink {
    pub fn new(quiet: bool) -> Self {
        ConsoleSink { quiet }
    }
}

impl DiagnosticSink for ConsoleSink {
    fn log(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }
}

// ──────────────────────────────────────────────
// MemorySink
// ──────────────────────────────────────────────

/// Sink that retains diagnostics in memory, in arrival order.
///
/// Used by tests to assert on exactly which diagnostics a run produced.
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink::default()
    }

    /// Returns a snapshot of every diagnostic recorded so far.
    pub fn lines(&self) -> Vec<String> {
        // Recover data even if the mutex was poisoned by a panic elsewhere
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl DiagnosticSink for MemorySink {
    fn log(&self, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
