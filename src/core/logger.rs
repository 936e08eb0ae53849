//! Main logger implementation
//!
//! Every call runs synchronously on the caller's thread:
//! gate → record → format → output hook → sink (+ optional stdout echo).
//! Sink and echo failures, panics included, are absorbed and counted.

use super::{
    caller::{shorten, CallerLocation, CALLER_WIDTH},
    config::{ConfigSnapshot, LoggerConfig},
    correlation::{extract_correlation, CorrelationContext},
    error::{LoggerError, Result},
    fields::Fields,
    hook::{self, OutputHook},
    log_level::LogLevel,
    log_record::{LogRecord, Payload},
    metrics::LoggerMetrics,
    sink::{flush_isolated, write_isolated, Sink},
};
use crate::sinks::{ConsoleSink, FileSink};
use parking_lot::{Mutex, RwLock};
use std::fmt::{Display, Write};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};

/// Exit status used when a fatal call terminates the process
pub const FATAL_EXIT_CODE: i32 = 1;

/// How the host should end the process after a fatal or panic call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// Exit the process
    Exit,
    /// Unwind with the emitted line as payload
    Panic(String),
}

/// Outcome of a logging call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// Level gate closed; nothing was formatted or written
    Skipped,
    Emitted,
    /// Line written; the caller asked for the process to end
    TerminateRequested(Termination),
}

impl Emission {
    pub fn is_emitted(&self) -> bool {
        !matches!(self, Emission::Skipped)
    }

    /// Carry out a requested termination; no-op for other outcomes.
    ///
    /// `Exit` ends the process with [`FATAL_EXIT_CODE`], `Panic` unwinds with
    /// the formatted line.
    pub fn terminate(self) {
        match self {
            Emission::TerminateRequested(Termination::Exit) => {
                std::process::exit(FATAL_EXIT_CODE)
            }
            Emission::TerminateRequested(Termination::Panic(line)) => {
                std::panic::panic_any(line)
            }
            Emission::Skipped | Emission::Emitted => {}
        }
    }
}

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

pub struct Logger {
    config: RwLock<Arc<ConfigSnapshot>>,
    /// Mirror of `config.level` read by the gate without locking
    threshold: AtomicU8,
    sink: Mutex<Box<dyn Sink>>,
    /// Receives a copy of every line while console echo is on
    echo: Mutex<Box<dyn Sink>>,
    hook: RwLock<Option<OutputHook>>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Logger with default settings writing to stderr
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(ConsoleSink::new())
    }

    #[must_use]
    pub fn with_sink<S: Sink + 'static>(sink: S) -> Self {
        let config = ConfigSnapshot::default();
        Self {
            threshold: AtomicU8::new(config.level.rank()),
            config: RwLock::new(Arc::new(config)),
            sink: Mutex::new(Box::new(sink)),
            echo: Mutex::new(Box::new(ConsoleSink::stdout())),
            hook: RwLock::new(None),
            metrics: LoggerMetrics::new(),
        }
    }

    /// The process-wide logger used by the logging macros
    pub fn global() -> &'static Logger {
        GLOBAL_LOGGER.get_or_init(Logger::new)
    }

    /// Apply a configuration.
    ///
    /// Safe to call repeatedly and concurrently with logging calls; a call in
    /// flight keeps the snapshot it started with.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for a reserved correlation key or a
    /// `log_file` that cannot be opened. The previous configuration stays in
    /// effect on error.
    pub fn configure(&self, config: LoggerConfig) -> Result<()> {
        // Reject invalid settings before touching the filesystem
        self.snapshot().merge(&config)?;

        let file_sink = config
            .log_file
            .as_ref()
            .map(|path| {
                FileSink::new(path).map_err(|e| {
                    LoggerError::config(
                        "log_file",
                        format!("cannot open '{}': {}", path.display(), e),
                    )
                })
            })
            .transpose()?;

        let mut current = self.config.write();
        let next = current.merge(&config)?;
        if let Some(sink) = file_sink {
            self.set_sink(Box::new(sink));
        }

        self.threshold.store(next.level.rank(), Ordering::Release);
        *current = Arc::new(next);
        drop(current);

        if let Some(output_hook) = config.output_hook {
            *self.hook.write() = Some(output_hook);
        }
        Ok(())
    }

    /// Current configuration snapshot
    pub fn snapshot(&self) -> Arc<ConfigSnapshot> {
        Arc::clone(&self.config.read())
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_rank(self.threshold.load(Ordering::Acquire))
    }

    pub fn set_level(&self, level: LogLevel) {
        let mut current = self.config.write();
        let mut next = ConfigSnapshot::clone(&current);
        next.level = level;
        self.threshold.store(level.rank(), Ordering::Release);
        *current = Arc::new(next);
    }

    /// Replace the sink; the previous one is flushed and dropped
    pub fn set_sink(&self, sink: Box<dyn Sink>) {
        let mut current = self.sink.lock();
        if let Err(e) = flush_isolated(&mut **current) {
            eprintln!(
                "[LOGGER ERROR] Flush of replaced sink '{}' failed: {}",
                current.name(),
                e
            );
        }
        *current = sink;
    }

    /// Replace the console echo destination (stdout by default)
    pub fn set_echo_sink(&self, sink: Box<dyn Sink>) {
        *self.echo.lock() = sink;
    }

    /// Install or remove the output hook. Installing replaces, never composes.
    pub fn set_output_hook(&self, output_hook: Option<OutputHook>) {
        *self.hook.write() = output_hook;
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Whether a call at `level` passes the gate; marker levels always do
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level.is_marker() || level.rank() <= self.threshold.load(Ordering::Relaxed)
    }

    /// Gate, format and emit one record
    pub fn log(
        &self,
        level: LogLevel,
        caller: CallerLocation<'_>,
        ctx: Option<&CorrelationContext>,
        payload: Payload,
    ) -> Emission {
        if !self.enabled(level) {
            return Emission::Skipped;
        }
        self.emit_record(level, caller.token(CALLER_WIDTH), ctx, payload)
    }

    fn emit_record(
        &self,
        level: LogLevel,
        caller: String,
        ctx: Option<&CorrelationContext>,
        payload: Payload,
    ) -> Emission {
        let config = self.snapshot();
        let record = LogRecord::new(level, caller, payload)
            .with_correlation(extract_correlation(ctx, &config.correlation_key));
        let line = config.mode.format(&record, &config);
        let line = self.emit_line(line, &config);

        match level {
            LogLevel::Fatal => {
                self.flush_quietly();
                Emission::TerminateRequested(Termination::Exit)
            }
            LogLevel::Panic => {
                self.flush_quietly();
                Emission::TerminateRequested(Termination::Panic(line))
            }
            _ => Emission::Emitted,
        }
    }

    /// Log space-joined arguments.
    ///
    /// With a context marked as carrying structured fields, the first
    /// argument is taken as the pre-rendered fields blob instead.
    pub fn log_args(
        &self,
        level: LogLevel,
        caller: CallerLocation<'_>,
        ctx: Option<&CorrelationContext>,
        args: &[&dyn Display],
    ) -> Emission {
        if !self.enabled(level) {
            return Emission::Skipped;
        }

        let payload = if ctx.is_some_and(CorrelationContext::is_structured) {
            Payload::raw_fields(args.first().map(|arg| arg.to_string()).unwrap_or_default())
        } else {
            Payload::args(args)
        };
        self.log(level, caller, ctx, payload)
    }

    /// Log a structured fields payload
    pub fn log_fields(
        &self,
        level: LogLevel,
        caller: CallerLocation<'_>,
        ctx: Option<&CorrelationContext>,
        fields: &Fields,
    ) -> Emission {
        if !self.enabled(level) {
            return Emission::Skipped;
        }

        let encoded = fields.encode();
        if !encoded.is_json {
            self.metrics.record_encode_fallback();
        }
        self.log(level, caller, ctx, Payload::Fields(encoded))
    }

    /// Log structured fields at `level`, caller taken from the call site
    #[track_caller]
    pub fn with_fields(
        &self,
        ctx: Option<&CorrelationContext>,
        fields: &Fields,
        level: LogLevel,
    ) -> Emission {
        self.log_fields(level, CallerLocation::caller(), ctx, fields)
    }

    #[track_caller]
    pub fn log_message(&self, level: LogLevel, message: impl Display) -> Emission {
        self.log_args(level, CallerLocation::caller(), None, &[&message])
    }

    #[track_caller]
    pub fn log_ctx(
        &self,
        level: LogLevel,
        ctx: &CorrelationContext,
        message: impl Display,
    ) -> Emission {
        self.log_args(level, CallerLocation::caller(), Some(ctx), &[&message])
    }

    #[inline]
    #[track_caller]
    pub fn trace(&self, message: impl Display) -> Emission {
        self.log_message(LogLevel::Trace, message)
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Display) -> Emission {
        self.log_message(LogLevel::Debug, message)
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Display) -> Emission {
        self.log_message(LogLevel::Info, message)
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Display) -> Emission {
        self.log_message(LogLevel::Warn, message)
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Display) -> Emission {
        self.log_message(LogLevel::Error, message)
    }

    /// Emit at Fatal level and request process exit.
    ///
    /// The returned emission must be acted upon (see [`Emission::terminate`]);
    /// the `fatal!` macro does this.
    #[track_caller]
    #[must_use = "fatal only requests termination; call `terminate()` or use `fatal!`"]
    pub fn fatal(&self, message: impl Display) -> Emission {
        self.log_message(LogLevel::Fatal, message)
    }

    /// Emit at Panic level and request an unwind, see [`fatal`](Self::fatal)
    #[track_caller]
    #[must_use = "panic only requests termination; call `terminate()` or use `log_panic!`"]
    pub fn panic(&self, message: impl Display) -> Emission {
        self.log_message(LogLevel::Panic, message)
    }

    #[inline]
    #[track_caller]
    pub fn debug_ctx(&self, ctx: &CorrelationContext, message: impl Display) -> Emission {
        self.log_ctx(LogLevel::Debug, ctx, message)
    }

    #[inline]
    #[track_caller]
    pub fn info_ctx(&self, ctx: &CorrelationContext, message: impl Display) -> Emission {
        self.log_ctx(LogLevel::Info, ctx, message)
    }

    #[inline]
    #[track_caller]
    pub fn warn_ctx(&self, ctx: &CorrelationContext, message: impl Display) -> Emission {
        self.log_ctx(LogLevel::Warn, ctx, message)
    }

    #[inline]
    #[track_caller]
    pub fn error_ctx(&self, ctx: &CorrelationContext, message: impl Display) -> Emission {
        self.log_ctx(LogLevel::Error, ctx, message)
    }

    /// Service start/stop marker; passes any threshold
    #[track_caller]
    pub fn starting(&self, message: impl Display) -> Emission {
        self.log_message(LogLevel::Start, message)
    }

    /// HTTP framework access line; passes any threshold
    #[track_caller]
    pub fn gin(&self, message: impl Display) -> Emission {
        self.log_message(LogLevel::Gin, message)
    }

    /// SQL statement line; passes any threshold. `caller` is the location
    /// reported by the database layer (usually `path:line`) and is shown
    /// abbreviated but otherwise as given.
    pub fn sql(&self, caller: &str, statement: impl Display) -> Emission {
        self.emit_record(
            LogLevel::Sql,
            shorten(caller, CALLER_WIDTH),
            None,
            Payload::args(&[&statement]),
        )
    }

    /// Debug dump of bytes as `[ 0x01 0xAB ]`
    #[track_caller]
    pub fn debug_hex(&self, bytes: &[u8]) -> Emission {
        let caller = CallerLocation::caller();
        if !self.enabled(LogLevel::Debug) {
            return Emission::Skipped;
        }
        self.log_args(LogLevel::Debug, caller, None, &[&hex_dump(bytes)])
    }

    /// Write `text` verbatim: no gate and no formatting, but the output hook
    /// and console echo still apply
    pub fn print(&self, text: impl Display) {
        let config = self.snapshot();
        self.emit_line(text.to_string(), &config);
    }

    pub fn flush(&self) -> Result<()> {
        flush_isolated(&mut **self.sink.lock())
    }

    fn flush_quietly(&self) {
        for target in [&self.sink, &self.echo] {
            let mut sink = target.lock();
            if let Err(e) = flush_isolated(&mut **sink) {
                eprintln!("[LOGGER ERROR] Sink '{}' flush failed: {}", sink.name(), e);
            }
        }
    }

    fn report_sink_error(&self, name: &str, error: &LoggerError) {
        let previous = self.metrics.record_sink_error();
        eprintln!(
            "[LOGGER ERROR] Sink '{}' failed (failure #{}): {}",
            name,
            previous + 1,
            error
        );
    }

    /// Hook, sink, echo. Returns the line as written.
    fn emit_line(&self, line: String, config: &ConfigSnapshot) -> String {
        let output_hook = self.hook.read().clone();
        let line = match output_hook {
            Some(output_hook) => match hook::apply(&output_hook, &line) {
                Some(hooked) => hooked,
                None => {
                    self.metrics.record_hook_panic();
                    line
                }
            },
            None => line,
        };

        {
            let mut sink = self.sink.lock();
            match write_isolated(&mut **sink, &line) {
                Ok(()) => self.metrics.record_emitted(),
                Err(e) => self.report_sink_error(sink.name(), &e),
            }
        }

        if config.console_echo {
            let mut echo = self.echo.lock();
            if let Err(e) = write_isolated(&mut **echo, &line) {
                self.report_sink_error(echo.name(), &e);
            }
        }
        line
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = flush_isolated(&mut **self.sink.get_mut()) {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

fn hex_dump(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "[]".to_string();
    }
    let mut out = String::with_capacity(2 + bytes.len() * 5);
    out.push('[');
    for b in bytes {
        let _ = write!(out, " 0x{:02X}", b);
    }
    out.push_str(" ]");
    out
}

/// Builder for constructing a standalone `Logger`
///
/// # Example
/// ```
/// use rust_line_logger::prelude::*;
///
/// let capture = MemorySink::new();
/// let logger = Logger::builder()
///     .config(LoggerConfig::new().with_level(LogLevel::Debug))
///     .sink(capture.clone())
///     .build()
///     .unwrap();
///
/// logger.info("ready");
/// assert!(capture.contents().contains("ready"));
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    sink: Option<Box<dyn Sink>>,
    echo: Option<Box<dyn Sink>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            sink: None,
            echo: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Destination sink; a `log_file` in the configuration takes precedence
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Destination of console echo, stdout unless set
    #[must_use = "builder methods return a new value"]
    pub fn echo_sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.echo = Some(Box::new(sink));
        self
    }

    /// Build the Logger
    ///
    /// # Errors
    ///
    /// Fails for the same reasons as [`Logger::configure`]
    pub fn build(self) -> Result<Logger> {
        let logger = Logger::new();
        if let Some(sink) = self.sink {
            *logger.sink.lock() = sink;
        }
        if let Some(echo) = self.echo {
            *logger.echo.lock() = echo;
        }
        logger.configure(self.config)?;
        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LoggerError, OutputMode};
    use crate::sinks::MemorySink;

    fn capture(config: LoggerConfig) -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .config(config)
            .sink(sink.clone())
            .build()
            .unwrap();
        (logger, sink)
    }

    struct FailingSink;

    impl Sink for FailingSink {
        fn write_line(&mut self, _line: &str) -> Result<()> {
            Err(LoggerError::writer("Simulated failure"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct PanickingSink;

    impl Sink for PanickingSink {
        fn write_line(&mut self, _line: &str) -> Result<()> {
            panic!("sink bug")
        }

        fn flush(&mut self) -> Result<()> {
            panic!("sink bug")
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    #[test]
    fn test_gate_skips_verbose_levels() {
        let (logger, sink) = capture(LoggerConfig::new().with_level(LogLevel::Info));

        assert_eq!(logger.debug("hidden"), Emission::Skipped);
        assert_eq!(logger.trace("hidden"), Emission::Skipped);
        assert_eq!(logger.info("shown"), Emission::Emitted);
        assert_eq!(logger.error("shown"), Emission::Emitted);
        assert_eq!(sink.len(), 2);
        assert_eq!(logger.metrics().emitted_count(), 2);
    }

    #[test]
    fn test_markers_pass_any_threshold() {
        let (logger, sink) = capture(LoggerConfig::new().with_level(LogLevel::Panic));
        assert!(logger.starting("boot").is_emitted());
        assert!(logger.gin("GET /health 200").is_emitted());
        assert!(logger.sql("db/query.rs:12", "SELECT 1").is_emitted());
        assert_eq!(logger.error("hidden"), Emission::Skipped);
        assert_eq!(sink.len(), 3);
        assert!(sink.lines()[1].contains("[GIN  ]"));
    }

    #[test]
    fn test_caller_is_call_site() {
        let (logger, sink) = capture(LoggerConfig::new());
        logger.info("where");
        let line = &sink.lines()[0];
        assert!(line.contains("logger.rs:"), "{}", line);
    }

    #[test]
    fn test_sql_uses_supplied_caller() {
        let (logger, sink) = capture(LoggerConfig::new());
        logger.sql("/srv/app/repo/users.rs:77", "SELECT * FROM users");
        let line = &sink.lines()[0];
        assert!(line.contains("srv/a/r/users.rs:77"));
        assert!(line.contains("[SQL  ] SELECT * FROM users"));

        logger.sql("db/query.rs", "SELECT 1");
        let line = &sink.lines()[1];
        assert!(line.contains("db/query.rs "), "{}", line);
        assert!(!line.contains(":0"), "{}", line);
    }

    #[test]
    fn test_markers_pass_marker_threshold() {
        let (logger, sink) = capture(LoggerConfig::new().with_level(LogLevel::Sql));
        assert!(logger.starting("boot").is_emitted());
        assert!(logger.gin("GET / 200").is_emitted());
        assert!(logger.sql("db.rs:1", "SELECT 1").is_emitted());
        assert_eq!(logger.panic("hidden"), Emission::Skipped);
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn test_fatal_and_panic_request_termination() {
        let (logger, sink) = capture(LoggerConfig::new().with_level(LogLevel::Error));
        assert_eq!(
            logger.fatal("disk gone"),
            Emission::TerminateRequested(Termination::Exit)
        );
        match logger.panic("invariant broken") {
            Emission::TerminateRequested(Termination::Panic(line)) => {
                assert!(line.contains("[Panic] invariant broken"));
            }
            other => panic!("unexpected emission {:?}", other),
        }
        assert_eq!(sink.len(), 2);

        logger.set_level(LogLevel::Panic);
        assert_eq!(logger.fatal("gated"), Emission::Skipped);
    }

    #[test]
    fn test_terminate_panics_with_line() {
        let emission = Emission::TerminateRequested(Termination::Panic("the line".to_string()));
        let result = std::panic::catch_unwind(|| emission.terminate());
        let payload = result.unwrap_err();
        assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("the line"));
        Emission::Emitted.terminate();
        Emission::Skipped.terminate();
    }

    #[test]
    fn test_with_fields_plain_and_json() {
        let ctx = CorrelationContext::new().with_value("session_id", "s-1");
        let (logger, sink) = capture(LoggerConfig::new().with_correlation_key("session_id"));
        let fields = Fields::new().with("ab", "cd");

        logger.with_fields(Some(&ctx), &fields, LogLevel::Info);
        assert!(sink.lines()[0].ends_with(r#"[Info ] [s-1] {"ab":"cd"}"#));

        logger
            .configure(LoggerConfig::new().with_mode(OutputMode::Json))
            .unwrap();
        logger.with_fields(Some(&ctx), &fields, LogLevel::Info);
        let line = &sink.lines()[1];
        assert!(line.ends_with(r#""session_id":"s-1","fields":{"ab":"cd"}}"#), "{}", line);
    }

    #[test]
    fn test_structured_context_takes_first_arg_as_blob() {
        let (logger, sink) = capture(LoggerConfig::new().with_mode(OutputMode::Json));
        let ctx = CorrelationContext::new().marked_structured();
        logger.log_args(
            LogLevel::Info,
            CallerLocation::new("a.rs", 1),
            Some(&ctx),
            &[&r#"{"k":1}"#, &"ignored"],
        );
        assert!(sink.lines()[0].ends_with(r#""fields":{"k":1}}"#));
    }

    #[test]
    fn test_encode_fallback_is_counted() {
        let (logger, sink) = capture(LoggerConfig::new());
        let fields = Fields::new().with("ratio", f64::NAN);
        logger.with_fields(None, &fields, LogLevel::Warn);
        assert_eq!(logger.metrics().encode_fallback_count(), 1);
        assert!(sink.lines()[0].ends_with("map[ratio:NaN]"));
    }

    #[test]
    fn test_sink_errors_are_absorbed() {
        let logger = Logger::with_sink(FailingSink);
        for _ in 0..5 {
            assert_eq!(logger.info("lost"), Emission::Emitted);
        }
        assert_eq!(logger.metrics().sink_error_count(), 5);
        assert_eq!(logger.metrics().emitted_count(), 0);
    }

    #[test]
    fn test_panicking_sink_is_isolated() {
        let logger = Logger::with_sink(PanickingSink);
        assert_eq!(logger.info("lost"), Emission::Emitted);
        assert!(logger.flush().unwrap_err().to_string().contains("sink bug"));
        assert_eq!(
            logger.fatal("still returns"),
            Emission::TerminateRequested(Termination::Exit)
        );
        assert_eq!(logger.metrics().sink_error_count(), 2);
        assert_eq!(logger.metrics().emitted_count(), 0);

        logger.set_sink(Box::new(MemorySink::new()));
        assert!(logger.info("recovered").is_emitted());
    }

    #[test]
    fn test_console_echo_copies_line() {
        let sink = MemorySink::new();
        let echo = MemorySink::new();
        let logger = Logger::builder()
            .config(LoggerConfig::new().with_console_echo(true))
            .sink(sink.clone())
            .echo_sink(echo.clone())
            .build()
            .unwrap();

        logger.info("both");
        assert_eq!(sink.lines(), echo.lines());

        logger.configure(LoggerConfig::new().with_console_echo(false)).unwrap();
        logger.info("sink only");
        assert_eq!(sink.len(), 2);
        assert_eq!(echo.len(), 1);
    }

    #[test]
    fn test_echo_failures_are_absorbed() {
        let (logger, sink) = capture(LoggerConfig::new().with_console_echo(true));
        logger.set_echo_sink(Box::new(FailingSink));
        assert!(logger.warn("kept").is_emitted());

        logger.set_echo_sink(Box::new(PanickingSink));
        assert!(logger.warn("kept").is_emitted());

        assert_eq!(sink.len(), 2);
        assert_eq!(logger.metrics().emitted_count(), 2);
        assert_eq!(logger.metrics().sink_error_count(), 2);
    }

    #[test]
    fn test_output_hook_replaces_not_composes() {
        let (logger, sink) = capture(LoggerConfig::new());
        let wrap: OutputHook = Arc::new(|line: &str| format!(">>{}<<", line));

        logger.configure(LoggerConfig::new().with_output_hook(Arc::clone(&wrap))).unwrap();
        logger.configure(LoggerConfig::new().with_output_hook(wrap)).unwrap();
        logger.info("once");
        logger.print("raw");

        for line in sink.lines() {
            assert_eq!(line.matches(">>").count(), 1, "{}", line);
            assert_eq!(line.matches("<<").count(), 1, "{}", line);
        }
        assert_eq!(sink.lines()[1], ">>raw<<");

        logger.set_output_hook(None);
        logger.print("plain");
        assert_eq!(sink.lines()[2], "plain");
    }

    #[test]
    fn test_panicking_hook_keeps_line() {
        let (logger, sink) = capture(LoggerConfig::new());
        logger.set_output_hook(Some(Arc::new(|_: &str| -> String { panic!("hook bug") })));
        assert!(logger.info("survives").is_emitted());
        assert!(sink.lines()[0].ends_with("survives"));
        assert_eq!(logger.metrics().hook_panic_count(), 1);
    }

    #[test]
    fn test_reserved_key_keeps_previous_config() {
        let (logger, sink) = capture(LoggerConfig::new().with_correlation_key("session_id"));
        let err = logger
            .configure(LoggerConfig::new().with_correlation_key("log_with"))
            .unwrap_err();
        assert!(err.is_configuration());

        let ctx = CorrelationContext::new().with_value("session_id", "still-here");
        logger.info_ctx(&ctx, "after");
        assert!(sink.lines()[0].contains("[still-here] after"));
    }

    #[test]
    fn test_debug_hex() {
        let (logger, sink) = capture(LoggerConfig::new());
        logger.debug_hex(&[0x01, 0xab, 0xff]);
        logger.debug_hex(&[]);
        assert!(sink.lines()[0].ends_with("[Debug] [ 0x01 0xAB 0xFF ]"));
        assert!(sink.lines()[1].ends_with("[Debug] []"));
    }

    #[test]
    fn test_set_level_updates_snapshot() {
        let logger = Logger::with_sink(MemorySink::new());
        logger.set_level(LogLevel::Warn);
        assert_eq!(logger.level(), LogLevel::Warn);
        assert_eq!(logger.snapshot().level, LogLevel::Warn);
        assert!(!logger.enabled(LogLevel::Info));
    }

    #[test]
    fn test_unopenable_log_file_is_config_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        let (logger, _sink) = capture(LoggerConfig::new().with_level(LogLevel::Warn));
        let err = logger
            .configure(LoggerConfig::new().with_log_file(dir.path()))
            .unwrap_err();
        assert!(err.is_configuration(), "{}", err);
        assert_eq!(logger.level(), LogLevel::Warn);
    }
}
