//! Basic logger usage example
//!
//! Demonstrates the global logger, the leveled macros and level changes.
//!
//! Run with: cargo run --example basic_usage

use rust_line_logger::prelude::*;
use rust_line_logger::{debug, error, info, infof, starting, trace, warn};

fn main() -> Result<()> {
    println!("=== Rust Line Logger - Basic Usage Example ===\n");

    let logger = Logger::global();
    logger.configure(LoggerConfig::new().with_level(LogLevel::Trace).with_color(true))?;

    println!("1. Logging at different levels:");
    starting!("example service", env!("CARGO_PKG_VERSION"));
    trace!("This is a trace message");
    debug!("This is a debug message");
    info!("This is an info message with", 3, "arguments");
    infof!("Formatted: {:>8.2}", 1234.5678);
    warn!("This is a warning message");
    error!("This is an error message");
    logger.debug_hex(&[0xde, 0xad, 0xbe, 0xef]);

    println!("\n2. Logging with a higher threshold:");
    logger.set_level(LogLevel::Info);
    println!("   Level set to Info - trace and debug won't show:");
    trace!("Trace message (hidden)");
    debug!("Debug message (hidden)");
    info!("Info message (visible)");
    logger.gin("GET /health 200 1.2ms (always visible)");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
