//! `log` facade backend
//!
//! Lets libraries that log through the `log` crate write into this logger.

use crate::core::{CallerLocation, LogLevel, Logger, LoggerError, Result};
use std::fmt::Display;

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug => LogLevel::Debug,
            log::Level::Trace => LogLevel::Trace,
        }
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        Logger::enabled(self, metadata.level().into())
    }

    fn log(&self, record: &log::Record<'_>) {
        let level = LogLevel::from(record.level());
        if !Logger::enabled(self, level) {
            return;
        }
        let caller = match record.file() {
            Some(file) => CallerLocation::new(file, record.line().unwrap_or(0)),
            None => CallerLocation::new(record.target(), record.line().unwrap_or(0)),
        };
        let message: &dyn Display = record.args();
        self.log_args(level, caller, None, &[message]);
    }

    fn flush(&self) {
        if let Err(e) = Logger::flush(self) {
            eprintln!("[LOGGER ERROR] Flush from log facade failed: {}", e);
        }
    }
}

/// Install the global logger as the `log` crate backend.
///
/// Level filtering is left to the logger's own threshold.
///
/// # Errors
///
/// Returns `InvalidConfiguration` if another `log` backend is already set.
pub fn init_log_bridge() -> Result<()> {
    log::set_logger(Logger::global())
        .map_err(|e| LoggerError::config("log_bridge", e.to_string()))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}
