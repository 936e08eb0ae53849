//! Log level definitions
//!
//! Levels are ordered by verbosity: a higher rank is more verbose. A call is
//! emitted when its level's rank does not exceed the configured threshold's
//! rank. `Sql`, `Gin` and `Start` are marker levels: they are never gated,
//! whatever the threshold, including a threshold set to a marker level.

use colored::Color;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    /// SQL statement lines handed over by a database layer
    Sql = 0,
    /// HTTP framework access lines
    Gin = 1,
    /// Service start/stop markers
    Start = 2,
    Panic = 3,
    Fatal = 4,
    Error = 5,
    Warn = 6,
    Info = 7,
    Debug = 8,
    #[default]
    Trace = 9,
}

impl LogLevel {
    /// Every level, lowest rank first
    pub const ALL: [LogLevel; 10] = [
        LogLevel::Sql,
        LogLevel::Gin,
        LogLevel::Start,
        LogLevel::Panic,
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    /// Fixed-width (5 character) label used in plain output
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Sql => "SQL  ",
            LogLevel::Gin => "GIN  ",
            LogLevel::Start => "Start",
            LogLevel::Panic => "Panic",
            LogLevel::Fatal => "Fatal",
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn ",
            LogLevel::Info => "Info ",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Lowercase, unpadded name used in JSON records
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Sql => "sql",
            LogLevel::Gin => "gin",
            LogLevel::Start => "start",
            LogLevel::Panic => "panic",
            LogLevel::Fatal => "fatal",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    #[inline]
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Inverse of [`rank`](Self::rank); out-of-range ranks saturate to `Trace`
    pub fn from_rank(rank: u8) -> Self {
        LogLevel::ALL
            .get(usize::from(rank))
            .copied()
            .unwrap_or(LogLevel::Trace)
    }

    /// `Sql`, `Gin` and `Start`: lines that bypass the level gate
    #[inline]
    pub fn is_marker(&self) -> bool {
        matches!(self, LogLevel::Sql | LogLevel::Gin | LogLevel::Start)
    }

    /// Whether a call at this level passes a gate set to `threshold`
    #[inline]
    pub fn is_enabled_at(&self, threshold: LogLevel) -> bool {
        self.is_marker() || self.rank() <= threshold.rank()
    }

    /// Parse a level from free-form text.
    ///
    /// Case-insensitive, all spaces removed. Unknown text (including the
    /// empty string) yields the most verbose level, `Trace`.
    pub fn parse(text: &str) -> Self {
        let normalized: String = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "sql" => LogLevel::Sql,
            "gin" => LogLevel::Gin,
            "start" => LogLevel::Start,
            "panic" => LogLevel::Panic,
            "fatal" => LogLevel::Fatal,
            "error" => LogLevel::Error,
            "warn" | "warning" => LogLevel::Warn,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    /// Label color in colored plain output, `None` for uncolored labels
    pub fn color(&self) -> Option<Color> {
        match self {
            LogLevel::Sql | LogLevel::Gin | LogLevel::Trace => Some(Color::Blue),
            LogLevel::Start => Some(Color::Green),
            LogLevel::Debug => Some(Color::Magenta),
            LogLevel::Warn => Some(Color::Yellow),
            LogLevel::Error => Some(Color::Red),
            LogLevel::Panic | LogLevel::Fatal | LogLevel::Info => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LogLevel {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(LogLevel::parse(s))
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(LogLevel::parse(&text))
    }
}
