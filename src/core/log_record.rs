//! Per-call log record
//!
//! A record is built after the level gate passed, formatted once and dropped.

use super::fields::EncodedFields;
use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use std::fmt::{self, Display, Write};

/// What a call logs: free-form text or a pre-rendered fields blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Space-joined arguments
    Message(String),
    /// Encoded structured fields
    Fields(EncodedFields),
}

impl Payload {
    /// Join arguments with single spaces
    pub fn args(args: &[&dyn Display]) -> Self {
        let mut text = String::new();
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            // Writing into a String cannot fail
            let _ = write!(text, "{}", arg);
        }
        Payload::Message(text)
    }

    pub fn message(text: impl Into<String>) -> Self {
        Payload::Message(text.into())
    }

    /// A blob rendered by the caller.
    ///
    /// A blob that parses as JSON is re-serialized compactly (key order kept),
    /// so it can be inlined in a JSON record without breaking the line.
    /// Anything else is kept verbatim and marked as not-JSON.
    pub fn raw_fields(text: impl Into<String>) -> Self {
        let text = text.into();
        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) => Payload::Fields(EncodedFields {
                text: value.to_string(),
                is_json: true,
            }),
            Err(_) => Payload::Fields(EncodedFields {
                text,
                is_json: false,
            }),
        }
    }

    pub fn is_fields(&self) -> bool {
        matches!(self, Payload::Fields(_))
    }

    pub fn text(&self) -> &str {
        match self {
            Payload::Message(text) => text,
            Payload::Fields(encoded) => &encoded.text,
        }
    }
}

impl From<EncodedFields> for Payload {
    fn from(encoded: EncodedFields) -> Self {
        Payload::Fields(encoded)
    }
}

#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    pub level: LogLevel,
    /// Abbreviated call site, see [`shorten`](super::caller::shorten)
    pub caller: String,
    pub correlation: Option<&'a str>,
    pub payload: Payload,
    pub timestamp: DateTime<Local>,
}

impl<'a> LogRecord<'a> {
    pub fn new(level: LogLevel, caller: impl Into<String>, payload: Payload) -> Self {
        Self {
            level,
            caller: caller.into(),
            correlation: None,
            payload,
            timestamp: Local::now(),
        }
    }

    pub fn with_correlation(mut self, correlation: Option<&'a str>) -> Self {
        self.correlation = correlation.filter(|value| !value.is_empty());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Escape line breaks and tabs so one record always stays on one line
pub(crate) fn sanitize(text: &str) -> std::borrow::Cow<'_, str> {
    if text.contains(['\n', '\r', '\t']) {
        std::borrow::Cow::Owned(
            text.replace('\n', "\\n")
                .replace('\r', "\\r")
                .replace('\t', "\\t"),
        )
    } else {
        std::borrow::Cow::Borrowed(text)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
