//! Core logger types and traits

pub mod caller;
pub mod config;
pub mod correlation;
pub mod error;
pub mod fields;
pub mod hook;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod sink;
pub mod timestamp;

pub use caller::{shorten, CallerLocation, CALLER_WIDTH};
pub use config::{ConfigSnapshot, LoggerConfig, DEFAULT_RETENTION_DAYS};
pub use correlation::{
    extract_correlation, is_structured_fields, mark_structured_fields, with_correlation,
    CorrelationContext, RESERVED_KEY,
};
pub use error::{LoggerError, Result};
pub use fields::{EncodedFields, FieldValue, Fields};
pub use hook::OutputHook;
pub use log_level::LogLevel;
pub use log_record::{LogRecord, Payload};
pub use logger::{Emission, Logger, LoggerBuilder, Termination, FATAL_EXIT_CODE};
pub use metrics::LoggerMetrics;
pub use output_format::OutputMode;
pub use sink::Sink;
pub use timestamp::{format_timestamp, LOG_TIME_FORMAT};
