//! Output modes and the line format engine
//!
//! - Plain: `<time> [instance] <caller>  [<Level>] [correlation] <text>`
//! - Json: one-line record `{"time":..,"level":..,"file":..,..,"msg":..}`
//!
//! Formatting is a pure function of the record and a configuration snapshot.

use super::caller::CALLER_WIDTH;
use super::config::ConfigSnapshot;
use super::log_record::{sanitize, LogRecord, Payload};
use super::timestamp::format_timestamp;
use colored::Color;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Write;

/// JSON key of a structured-fields payload
pub const FIELDS_KEY: &str = "fields";
/// JSON key of a free-form message payload
pub const MESSAGE_KEY: &str = "msg";

/// Output mode of formatted lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Human-readable aligned text (default)
    ///
    /// Example: `2025/01/08 10:30:45.123456 src/c/server.rs:42   [Info ] [s-1] started`
    #[default]
    Plain,

    /// One JSON object per line
    ///
    /// Example: `{"time":"2025/01/08 10:30:45.123456","level":"info","file":"src/c/server.rs:42","msg":"started"}`
    Json,
}

impl OutputMode {
    /// `"json"` (any case, spaces ignored) selects JSON, anything else plain
    pub fn parse(text: &str) -> Self {
        let normalized: String = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        if normalized == "json" {
            OutputMode::Json
        } else {
            OutputMode::Plain
        }
    }

    /// Format a record according to this mode
    pub fn format(&self, record: &LogRecord<'_>, config: &ConfigSnapshot) -> String {
        let body = match self {
            OutputMode::Plain => format_plain(record, config),
            OutputMode::Json => format_json(record, config),
        };
        let mut line = format_timestamp(&record.timestamp);
        line.push(' ');
        line.push_str(&body);
        line
    }
}

impl<'de> Deserialize<'de> for OutputMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(OutputMode::parse(&text))
    }
}

/// Wrap `text` in an ANSI color escape and reset
pub(crate) fn paint(text: &str, color: Color) -> String {
    format!("\x1b[{}m{}\x1b[0m", color.to_fg_str(), text)
}

fn format_plain(record: &LogRecord<'_>, config: &ConfigSnapshot) -> String {
    let mut out = String::with_capacity(64 + record.payload.text().len());

    if config.show_instance {
        let _ = write!(out, "[{}] ", config.instance_id);
    }

    let caller_width = record.caller.chars().count();
    if config.color {
        out.push_str(&paint(&record.caller, Color::Cyan));
    } else {
        out.push_str(&record.caller);
    }
    for _ in caller_width..CALLER_WIDTH {
        out.push(' ');
    }

    let label = record.level.label();
    match record.level.color() {
        Some(color) if config.color => {
            let _ = write!(out, " [{}] ", paint(label, color));
        }
        _ => {
            let _ = write!(out, " [{}] ", label);
        }
    }

    if let Some(correlation) = record.correlation {
        let _ = write!(out, "[{}] ", sanitize(correlation));
    }

    out.push_str(&sanitize(record.payload.text()));
    out
}

fn json_string(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_default()
}

fn format_json(record: &LogRecord<'_>, config: &ConfigSnapshot) -> String {
    let mut out = String::with_capacity(96 + record.payload.text().len());

    let _ = write!(
        out,
        "{{\"time\":{},\"level\":{},\"file\":{},",
        json_string(&format_timestamp(&record.timestamp)),
        json_string(record.level.name()),
        json_string(&record.caller),
    );

    if config.show_instance {
        let _ = write!(out, "\"instance\":{},", json_string(&config.instance_id));
    }

    if let Some(correlation) = record.correlation {
        let _ = write!(
            out,
            "{}:{},",
            json_string(&config.correlation_key),
            json_string(correlation)
        );
    }

    match &record.payload {
        Payload::Fields(encoded) if encoded.is_json => {
            let _ = write!(out, "{}:{}", json_string(FIELDS_KEY), encoded.text);
        }
        Payload::Fields(encoded) => {
            let _ = write!(out, "{}:{}", json_string(FIELDS_KEY), json_string(&encoded.text));
        }
        Payload::Message(text) => {
            let _ = write!(out, "{}:{}", json_string(MESSAGE_KEY), json_string(text));
        }
    }

    out.push('}');
    out
}
