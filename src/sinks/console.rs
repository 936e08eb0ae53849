//! Console sink implementation

use crate::core::{Result, Sink};
use std::io::{self, Write};

/// Which standard stream a [`ConsoleSink`] writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleTarget {
    #[default]
    Stderr,
    Stdout,
}

pub struct ConsoleSink {
    target: ConsoleTarget,
}

impl ConsoleSink {
    /// Sink writing to stderr, the default destination
    pub fn new() -> Self {
        Self {
            target: ConsoleTarget::Stderr,
        }
    }

    pub fn stdout() -> Self {
        Self {
            target: ConsoleTarget::Stdout,
        }
    }

    pub fn with_target(target: ConsoleTarget) -> Self {
        Self { target }
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        // Holding the stream lock keeps the line and its newline together
        match self.target {
            ConsoleTarget::Stderr => writeln!(io::stderr().lock(), "{}", line)?,
            ConsoleTarget::Stdout => writeln!(io::stdout().lock(), "{}", line)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.target {
            ConsoleTarget::Stderr => io::stderr().flush()?,
            ConsoleTarget::Stdout => io::stdout().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self.target {
            ConsoleTarget::Stderr => "stderr",
            ConsoleTarget::Stdout => "stdout",
        }
    }
}
