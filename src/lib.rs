//! # Rust Line Logger
//!
//! A process-wide structured line logger for services.
//!
//! ## Features
//!
//! - **Level Gate**: ten ordered levels; disabled calls cost one atomic load
//! - **Two Formats**: aligned plain text (optionally colored) or one-line JSON
//! - **Correlation**: request-scoped values printed on every line
//! - **Structured Fields**: ordered key/value payloads encoded as JSON
//! - **Output Hook**: a late transform over every formatted line
//!
//! ## Example
//!
//! ```
//! use rust_line_logger::prelude::*;
//! use rust_line_logger::info;
//!
//! let capture = MemorySink::new();
//! let logger = Logger::builder()
//!     .config(LoggerConfig::new().with_level(LogLevel::Info).with_correlation_key("session_id"))
//!     .sink(capture.clone())
//!     .build()
//!     .unwrap();
//!
//! let ctx = CorrelationContext::new().with_value("session_id", "s-7");
//! info!(logger: logger, ctx: ctx; "user", 42, "logged in");
//! assert!(capture.lines()[0].ends_with("[Info ] [s-7] user 42 logged in"));
//! ```

#[cfg(feature = "log-bridge")]
pub mod bridge;
pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        CallerLocation, ConfigSnapshot, CorrelationContext, Emission, FieldValue, Fields,
        LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, OutputHook,
        OutputMode, Payload, Result, Sink, Termination,
    };
    pub use crate::sinks::{ConsoleSink, ConsoleTarget, FileSink, MemorySink};
}

#[cfg(feature = "log-bridge")]
pub use bridge::init_log_bridge;
pub use core::{
    CallerLocation, ConfigSnapshot, CorrelationContext, Emission, FieldValue, Fields, LogLevel,
    Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, OutputHook, OutputMode,
    Payload, Result, Sink, Termination,
};
pub use sinks::{ConsoleSink, ConsoleTarget, FileSink, MemorySink};
