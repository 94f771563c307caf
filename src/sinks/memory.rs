use std::sync::{Mutex, MutexGuard, PoisonError};

use super::LogSink;

/// In-memory sink that keeps every line in arrival order.
///
/// Useful for tests and for shells that render the whole log on each frame.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all lines received so far.
    pub fn lines(&self) -> Vec<String> {
        self.guard().clone()
    }

    /// Returns true if `line` was received.
    pub fn contains(&self, line: &str) -> bool {
        self.guard().iter().any(|l| l == line)
    }

    /// Drops all lines (the shell's "clear log").
    pub fn clear(&self) {
        self.guard().clear();
    }

    fn guard(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LogSink for MemorySink {
    fn append(&self, line: &str) {
        self.guard().push(line.to_string());
    }
}
