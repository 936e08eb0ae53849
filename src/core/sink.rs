//! Sink trait for log line destinations

use super::error::{LoggerError, Result};
use super::hook::panic_message;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Destination of formatted lines.
///
/// Every call carries one complete line without a trailing newline; the sink
/// terminates it. Calls are serialized by the logger, so implementations do
/// not need their own locking to keep lines whole.
pub trait Sink: Send {
    fn write_line(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

/// Write one line, turning a panic inside the sink into a `SinkError`
pub(crate) fn write_isolated(sink: &mut dyn Sink, line: &str) -> Result<()> {
    catch_unwind(AssertUnwindSafe(|| sink.write_line(line)))
        .unwrap_or_else(|panic_info| Err(panicked(sink, "write", panic_info.as_ref())))
}

/// Flush, turning a panic inside the sink into a `SinkError`
pub(crate) fn flush_isolated(sink: &mut dyn Sink) -> Result<()> {
    catch_unwind(AssertUnwindSafe(|| sink.flush()))
        .unwrap_or_else(|panic_info| Err(panicked(sink, "flush", panic_info.as_ref())))
}

fn panicked(sink: &dyn Sink, operation: &str, panic_info: &(dyn Any + Send)) -> LoggerError {
    LoggerError::sink(
        sink.name(),
        format!("panicked during {}: {}", operation, panic_message(panic_info)),
    )
}
