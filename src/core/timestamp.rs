//! Timestamp formatting
//!
//! Every line starts with the local wall-clock time at microsecond precision,
//! e.g. `2025/01/08 10:30:45.123456`. Both output modes use the same text.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// strftime pattern of the leading timestamp
pub const LOG_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.6f";

/// Format a timestamp for a log line
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use rust_line_logger::core::timestamp::format_timestamp;
///
/// let ts = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(format_timestamp(&ts), "2025/01/08 10:30:45.000000");
/// ```
#[must_use]
pub fn format_timestamp<Tz>(datetime: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    datetime.format(LOG_TIME_FORMAT).to_string()
}
