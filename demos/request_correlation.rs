//! Request correlation example
//!
//! Demonstrates correlation contexts, the output hook and console echo.
//!
//! Run with: cargo run --example request_correlation

use rust_line_logger::prelude::*;
use rust_line_logger::{error, info, log_fields};
use std::sync::Arc;
use std::thread;

fn handle(logger: &Logger, request_id: &str, user: &str) {
    let ctx = CorrelationContext::new().with_value("request_id", request_id);
    info!(logger: logger, ctx: ctx; "request from", user);

    let summary = Fields::new().with("user", user).with("items", 3);
    log_fields!(logger: logger, ctx: ctx; LogLevel::Debug, &summary);

    if user == "mallory" {
        error!(logger: logger, ctx: ctx; "permission denied");
    }
}

fn main() -> Result<()> {
    println!("=== Rust Line Logger - Request Correlation Example ===\n");

    let redact: OutputHook = Arc::new(|line: &str| line.replace("mallory", "m*****"));
    let logger = Arc::new(
        Logger::builder()
            .config(
                LoggerConfig::new()
                    .with_correlation_key("request_id")
                    .with_output_hook(redact),
            )
            .sink(ConsoleSink::stdout())
            .build()?,
    );

    let handles: Vec<_> = [("r-100", "alice"), ("r-101", "bob"), ("r-102", "mallory")]
        .into_iter()
        .map(|(id, user)| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || handle(&logger, id, user))
        })
        .collect();
    for h in handles {
        let _ = h.join();
    }

    // The reserved key is refused and the previous key stays in effect
    if let Err(e) = logger.configure(LoggerConfig::new().with_correlation_key("log_with")) {
        println!("\nRejected configuration: {}", e);
    }
    println!("Correlation key still: {}", logger.snapshot().correlation_key);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
