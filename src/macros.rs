//! Logging macros.
//!
//! Every leveled macro comes in four forms:
//!
//! - `info!(a, b, ...)` logs through the global logger
//! - `info!(ctx: ctx; a, b, ...)` adds a correlation context
//! - `info!(logger: logger; a, b, ...)` targets a specific logger
//! - `info!(logger: logger, ctx: ctx; a, b, ...)`
//!
//! Arguments are joined with single spaces. The level gate is checked before
//! any argument is evaluated. The `*f!` variants take a format string instead.
//!
//! # Examples
//!
//! ```
//! use rust_line_logger::prelude::*;
//! use rust_line_logger::{info, infof, warn};
//!
//! let capture = MemorySink::new();
//! let logger = Logger::with_sink(capture.clone());
//!
//! info!(logger: logger; "server started on port", 8080);
//! infof!(logger: logger; "{} workers", 4);
//!
//! let ctx = CorrelationContext::new().with_value("session_id", "s-42");
//! warn!(logger: logger, ctx: ctx; "slow request");
//!
//! assert_eq!(capture.len(), 3);
//! assert!(capture.lines()[0].ends_with("server started on port 8080"));
//! ```

#[doc(hidden)]
#[macro_export]
macro_rules! __log_dispatch {
    ($level:expr; logger: $logger:expr, ctx: $ctx:expr; $($arg:expr),* $(,)?) => {{
        let logger: &$crate::Logger = &$logger;
        let level: $crate::LogLevel = $level;
        if logger.enabled(level) {
            let ctx: &$crate::CorrelationContext = &$ctx;
            logger.log_args(
                level,
                $crate::CallerLocation::new(file!(), line!()),
                Some(ctx),
                &[$(&$arg as &dyn ::std::fmt::Display),*],
            )
        } else {
            $crate::Emission::Skipped
        }
    }};
    ($level:expr; logger: $logger:expr; $($arg:expr),* $(,)?) => {{
        let logger: &$crate::Logger = &$logger;
        let level: $crate::LogLevel = $level;
        if logger.enabled(level) {
            logger.log_args(
                level,
                $crate::CallerLocation::new(file!(), line!()),
                None,
                &[$(&$arg as &dyn ::std::fmt::Display),*],
            )
        } else {
            $crate::Emission::Skipped
        }
    }};
    ($level:expr; ctx: $ctx:expr; $($arg:expr),* $(,)?) => {
        $crate::__log_dispatch!($level; logger: $crate::Logger::global(), ctx: $ctx; $($arg),*)
    };
    ($level:expr; $($arg:expr),* $(,)?) => {
        $crate::__log_dispatch!($level; logger: $crate::Logger::global(); $($arg),*)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __logf_dispatch {
    ($level:expr; logger: $logger:expr, ctx: $ctx:expr; $($arg:tt)+) => {{
        let logger: &$crate::Logger = &$logger;
        let level: $crate::LogLevel = $level;
        if logger.enabled(level) {
            let ctx: &$crate::CorrelationContext = &$ctx;
            logger.log(
                level,
                $crate::CallerLocation::new(file!(), line!()),
                Some(ctx),
                $crate::Payload::message(::std::format!($($arg)+)),
            )
        } else {
            $crate::Emission::Skipped
        }
    }};
    ($level:expr; logger: $logger:expr; $($arg:tt)+) => {{
        let logger: &$crate::Logger = &$logger;
        let level: $crate::LogLevel = $level;
        if logger.enabled(level) {
            logger.log(
                level,
                $crate::CallerLocation::new(file!(), line!()),
                None,
                $crate::Payload::message(::std::format!($($arg)+)),
            )
        } else {
            $crate::Emission::Skipped
        }
    }};
    ($level:expr; ctx: $ctx:expr; $($arg:tt)+) => {
        $crate::__logf_dispatch!($level; logger: $crate::Logger::global(), ctx: $ctx; $($arg)+)
    };
    ($level:expr; $($arg:tt)+) => {
        $crate::__logf_dispatch!($level; logger: $crate::Logger::global(); $($arg)+)
    };
}

/// Log at an explicit level.
///
/// ```
/// # use rust_line_logger::prelude::*;
/// # let logger = Logger::with_sink(MemorySink::new());
/// use rust_line_logger::log;
/// log!(LogLevel::Info; logger: logger; "Simple message");
/// log!(LogLevel::Error; logger: logger; "Error code:", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($level:expr; $($rest:tt)*) => {
        $crate::__log_dispatch!($level; $($rest)*)
    };
}

#[macro_export]
macro_rules! trace {
    ($($rest:tt)*) => {
        $crate::__log_dispatch!($crate::LogLevel::Trace; $($rest)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($($rest:tt)*) => {
        $crate::__log_dispatch!($crate::LogLevel::Debug; $($rest)*)
    };
}

/// Log an info-level message.
///
/// ```
/// # use rust_line_logger::prelude::*;
/// # let logger = Logger::with_sink(MemorySink::new());
/// use rust_line_logger::info;
/// info!(logger: logger; "Items:", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($($rest:tt)*) => {
        $crate::__log_dispatch!($crate::LogLevel::Info; $($rest)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($rest:tt)*) => {
        $crate::__log_dispatch!($crate::LogLevel::Warn; $($rest)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($rest:tt)*) => {
        $crate::__log_dispatch!($crate::LogLevel::Error; $($rest)*)
    };
}

/// Log at Fatal level, flush, then exit the process with status 1.
///
/// Does nothing when the level is gated out.
#[macro_export]
macro_rules! fatal {
    ($($rest:tt)*) => {
        $crate::__log_dispatch!($crate::LogLevel::Fatal; $($rest)*).terminate()
    };
}

/// Log at Panic level, flush, then panic with the formatted line.
///
/// Named `log_panic!` to stay clear of `std::panic!`.
#[macro_export]
macro_rules! log_panic {
    ($($rest:tt)*) => {
        $crate::__log_dispatch!($crate::LogLevel::Panic; $($rest)*).terminate()
    };
}

/// Service start/stop marker; emitted at any threshold
#[macro_export]
macro_rules! starting {
    ($($rest:tt)*) => {
        $crate::__log_dispatch!($crate::LogLevel::Start; $($rest)*)
    };
}

/// HTTP framework access line; emitted at any threshold
#[macro_export]
macro_rules! gin {
    ($($rest:tt)*) => {
        $crate::__log_dispatch!($crate::LogLevel::Gin; $($rest)*)
    };
}

#[macro_export]
macro_rules! tracef {
    ($($rest:tt)+) => {
        $crate::__logf_dispatch!($crate::LogLevel::Trace; $($rest)+)
    };
}

#[macro_export]
macro_rules! debugf {
    ($($rest:tt)+) => {
        $crate::__logf_dispatch!($crate::LogLevel::Debug; $($rest)+)
    };
}

#[macro_export]
macro_rules! infof {
    ($($rest:tt)+) => {
        $crate::__logf_dispatch!($crate::LogLevel::Info; $($rest)+)
    };
}

#[macro_export]
macro_rules! warnf {
    ($($rest:tt)+) => {
        $crate::__logf_dispatch!($crate::LogLevel::Warn; $($rest)+)
    };
}

#[macro_export]
macro_rules! errorf {
    ($($rest:tt)+) => {
        $crate::__logf_dispatch!($crate::LogLevel::Error; $($rest)+)
    };
}

/// Log a structured fields payload.
///
/// ```
/// # use rust_line_logger::prelude::*;
/// # let logger = Logger::with_sink(MemorySink::new());
/// use rust_line_logger::{fields, log_fields};
/// let request = fields! { "method" => "GET", "status" => 200 };
/// log_fields!(logger: logger; LogLevel::Info, &request);
/// ```
#[macro_export]
macro_rules! log_fields {
    (logger: $logger:expr, ctx: $ctx:expr; $level:expr, $fields:expr $(,)?) => {{
        let logger: &$crate::Logger = &$logger;
        let ctx: &$crate::CorrelationContext = &$ctx;
        logger.log_fields(
            $level,
            $crate::CallerLocation::new(file!(), line!()),
            Some(ctx),
            $fields,
        )
    }};
    (logger: $logger:expr; $level:expr, $fields:expr $(,)?) => {{
        let logger: &$crate::Logger = &$logger;
        logger.log_fields(
            $level,
            $crate::CallerLocation::new(file!(), line!()),
            None,
            $fields,
        )
    }};
    (ctx: $ctx:expr; $level:expr, $fields:expr $(,)?) => {
        $crate::log_fields!(logger: $crate::Logger::global(), ctx: $ctx; $level, $fields)
    };
    ($level:expr, $fields:expr $(,)?) => {
        $crate::log_fields!(logger: $crate::Logger::global(); $level, $fields)
    };
}

/// Build an ordered [`Fields`](crate::Fields) map
///
/// ```
/// use rust_line_logger::fields;
/// let f = fields! { "user" => "ada", "attempts" => 3 };
/// assert_eq!(f.encode().text, r#"{"user":"ada","attempts":3}"#);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Fields::new()$(.with($key, $value))+
    };
}
