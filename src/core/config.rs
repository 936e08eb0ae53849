//! Logger configuration
//!
//! `LoggerConfig` is what a host passes to [`Logger::configure`]; it is merged
//! into the previous [`ConfigSnapshot`] to produce a new immutable snapshot.
//! Unset values keep the previous setting, except the level which falls back
//! to `Trace`.
//!
//! [`Logger::configure`]: super::Logger::configure

use super::correlation::RESERVED_KEY;
use super::error::{LoggerError, Result};
use super::hook::OutputHook;
use super::log_level::LogLevel;
use super::output_format::OutputMode;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Retention used until a configuration sets one
pub const DEFAULT_RETENTION_DAYS: u32 = 10;

/// Settings in effect for one emission. Never mutated once published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSnapshot {
    pub level: LogLevel,
    pub color: bool,
    pub mode: OutputMode,
    /// Context key whose value is shown on each line; empty disables lookup
    pub correlation_key: String,
    pub instance_id: String,
    pub show_instance: bool,
    /// Mirror every line to stdout in addition to the sink
    pub console_echo: bool,
    /// Days of logs an external rotating writer should keep
    pub retention_days: u32,
    pub log_file: Option<PathBuf>,
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        Self {
            level: LogLevel::Trace,
            color: false,
            mode: OutputMode::Plain,
            correlation_key: String::new(),
            instance_id: String::new(),
            show_instance: false,
            console_echo: false,
            retention_days: DEFAULT_RETENTION_DAYS,
            log_file: None,
        }
    }
}

impl ConfigSnapshot {
    /// Merge `config` over this snapshot.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` when the correlation key is reserved;
    /// nothing is merged in that case.
    pub fn merge(&self, config: &LoggerConfig) -> Result<ConfigSnapshot> {
        let mut next = self.clone();

        if let Some(key) = config.correlation_key.as_deref().filter(|k| !k.is_empty()) {
            if key == RESERVED_KEY {
                return Err(LoggerError::config(
                    "correlation_key",
                    format!("key '{}' is reserved, please choose another one", key),
                ));
            }
            next.correlation_key = key.to_string();
        }

        next.level = config.level.unwrap_or(LogLevel::Trace);
        if let Some(days) = config.retention_days.filter(|d| *d > 0) {
            next.retention_days = days;
        }
        if let Some(mode) = config.mode {
            next.mode = mode;
        }
        if let Some(id) = config.instance_id.as_deref().filter(|id| !id.is_empty()) {
            next.instance_id = id.to_string();
        }
        next.show_instance = config.show_instance;
        next.color = config.color;
        if let Some(echo) = config.console_echo {
            next.console_echo = echo;
        }
        if let Some(path) = &config.log_file {
            next.log_file = Some(path.clone());
        }

        Ok(next)
    }
}

/// Configuration surface consumed by [`Logger::configure`]
///
/// # Example
///
/// ```
/// use rust_line_logger::{LoggerConfig, LogLevel, OutputMode};
///
/// let config = LoggerConfig::new()
///     .with_level(LogLevel::Info)
///     .with_color(true)
///     .with_mode(OutputMode::Json)
///     .with_correlation_key("session_id");
/// assert_eq!(config.level, Some(LogLevel::Info));
/// ```
///
/// [`Logger::configure`]: super::Logger::configure
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: Option<LogLevel>,
    pub color: bool,
    pub retention_days: Option<u32>,
    pub correlation_key: Option<String>,
    pub mode: Option<OutputMode>,
    pub instance_id: Option<String>,
    pub show_instance: bool,
    pub console_echo: Option<bool>,
    /// Destination file; opened as the new sink when set
    pub log_file: Option<PathBuf>,
    /// Replaces the installed output hook when set
    #[serde(skip)]
    pub output_hook: Option<OutputHook>,
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Set the level from free-form text, see [`LogLevel::parse`]
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_level_str(mut self, level: &str) -> Self {
        self.level = Some(LogLevel::parse(level));
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_retention_days(mut self, days: u32) -> Self {
        self.retention_days = Some(days);
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_correlation_key(mut self, key: impl Into<String>) -> Self {
        self.correlation_key = Some(key.into());
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = Some(mode);
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_instance_id(mut self, id: impl Into<String>, show: bool) -> Self {
        self.instance_id = Some(id.into());
        self.show_instance = show;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_console_echo(mut self, enabled: bool) -> Self {
        self.console_echo = Some(enabled);
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_output_hook(mut self, hook: OutputHook) -> Self {
        self.output_hook = Some(hook);
        self
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("level", &self.level)
            .field("color", &self.color)
            .field("retention_days", &self.retention_days)
            .field("correlation_key", &self.correlation_key)
            .field("mode", &self.mode)
            .field("instance_id", &self.instance_id)
            .field("show_instance", &self.show_instance)
            .field("console_echo", &self.console_echo)
            .field("log_file", &self.log_file)
            .field("output_hook", &self.output_hook.as_ref().map(|_| "<hook>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let snapshot = ConfigSnapshot::default();
        assert_eq!(snapshot.level, LogLevel::Trace);
        assert_eq!(snapshot.retention_days, DEFAULT_RETENTION_DAYS);
        assert_eq!(snapshot.mode, OutputMode::Plain);
        assert!(!snapshot.console_echo);
        assert!(!snapshot.show_instance);
    }

    #[test]
    fn test_merge_replaces_and_retains() {
        let first = ConfigSnapshot::default()
            .merge(
                &LoggerConfig::new()
                    .with_level(LogLevel::Info)
                    .with_color(true)
                    .with_retention_days(30)
                    .with_correlation_key("session_id")
                    .with_mode(OutputMode::Json)
                    .with_instance_id("node-1", true)
                    .with_console_echo(true),
            )
            .unwrap();

        let second = first.merge(&LoggerConfig::new()).unwrap();
        // level falls back to Trace, flags are replaced
        assert_eq!(second.level, LogLevel::Trace);
        assert!(!second.color);
        assert!(!second.show_instance);
        // unset values are retained
        assert_eq!(second.retention_days, 30);
        assert_eq!(second.correlation_key, "session_id");
        assert_eq!(second.mode, OutputMode::Json);
        assert_eq!(second.instance_id, "node-1");
        assert!(second.console_echo);
    }

    #[test]
    fn test_zero_and_empty_values_are_unset() {
        let base = ConfigSnapshot::default()
            .merge(&LoggerConfig::new().with_correlation_key("trace_id"))
            .unwrap();
        let next = base
            .merge(
                &LoggerConfig::new()
                    .with_retention_days(0)
                    .with_correlation_key("")
                    .with_instance_id("", false),
            )
            .unwrap();
        assert_eq!(next.retention_days, DEFAULT_RETENTION_DAYS);
        assert_eq!(next.correlation_key, "trace_id");
        assert_eq!(next.instance_id, "");
    }

    #[test]
    fn test_reserved_key_rejected() {
        let err = ConfigSnapshot::default()
            .merge(&LoggerConfig::new().with_correlation_key(RESERVED_KEY))
            .unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("log_with"));
    }

    #[test]
    fn test_deserialize_config() {
        let config: LoggerConfig = serde_json::from_str(
            r#"{"level":"DEBUG","color":true,"mode":"json","correlation_key":"sid","retention_days":7}"#,
        )
        .unwrap();
        assert_eq!(config.level, Some(LogLevel::Debug));
        assert_eq!(config.mode, Some(OutputMode::Json));
        assert_eq!(config.retention_days, Some(7));
        assert!(config.output_hook.is_none());
        assert!(format!("{:?}", config).contains("sid"));
    }
}
