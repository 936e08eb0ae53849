//! Logger metrics for observability
//!
//! Counters for monitoring logger health: lines handed to the sink, sink
//! failures, structured-field encoding fallbacks and output hook panics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_line_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_emitted();
/// metrics.record_sink_error();
///
/// assert_eq!(metrics.emitted_count(), 1);
/// assert_eq!(metrics.sink_error_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Lines successfully written to the sink
    emitted: AtomicU64,

    /// Lines the sink failed to accept
    sink_errors: AtomicU64,

    /// Structured payloads rendered through the textual fallback
    encode_fallbacks: AtomicU64,

    /// Output hook invocations that panicked
    hook_panics: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            emitted: AtomicU64::new(0),
            sink_errors: AtomicU64::new(0),
            encode_fallbacks: AtomicU64::new(0),
            hook_panics: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn emitted_count(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_error_count(&self) -> u64 {
        self.sink_errors.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn encode_fallback_count(&self) -> u64 {
        self.encode_fallbacks.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn hook_panic_count(&self) -> u64 {
        self.hook_panics.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_emitted(&self) {
        self.emitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a sink failure, returning the previous failure count
    #[inline]
    pub fn record_sink_error(&self) -> u64 {
        self.sink_errors.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_encode_fallback(&self) {
        self.encode_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_hook_panic(&self) {
        self.hook_panics.fetch_add(1, Ordering::Relaxed);
    }

    /// Share of lines the sink rejected, in percent
    pub fn sink_error_rate(&self) -> f64 {
        let errors = self.sink_error_count();
        let total = errors + self.emitted_count();
        if total == 0 {
            0.0
        } else {
            (errors as f64 / total as f64) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.emitted.store(0, Ordering::Relaxed);
        self.sink_errors.store(0, Ordering::Relaxed);
        self.encode_fallbacks.store(0, Ordering::Relaxed);
        self.hook_panics.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
