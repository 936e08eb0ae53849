//! In-memory sink capturing lines, for tests and diagnostics

use crate::core::{Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

/// Collects lines in memory. Clones share the same buffer, so a clone kept by
/// the caller observes everything written through the logger.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the captured lines
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Captured lines joined with newlines
    pub fn contents(&self) -> String {
        self.lines.lock().join("\n")
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
