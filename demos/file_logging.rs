//! File logging example
//!
//! Demonstrates a file destination, JSON output and structured fields.
//!
//! Run with: cargo run --example file_logging

use rust_line_logger::prelude::*;
use rust_line_logger::{fields, info, log_fields, warn};

fn main() -> Result<()> {
    println!("=== Rust Line Logger - File Logging Example ===\n");

    let path = std::env::temp_dir().join("rust_line_logger_demo").join("app.log");

    let logger = Logger::builder()
        .config(
            LoggerConfig::new()
                .with_level(LogLevel::Debug)
                .with_mode(OutputMode::Json)
                .with_instance_id("demo-1", true)
                .with_log_file(&path),
        )
        .build()?;

    info!(logger: logger; "service started");
    warn!(logger: logger; "cache miss ratio", 0.42);

    let request = fields! {
        "method" => "GET",
        "path" => "/api/users",
        "status" => 200,
        "latency_ms" => 12.5,
    };
    log_fields!(logger: logger; LogLevel::Info, &request);
    logger.sql("src/repo/users.rs:88", "SELECT id, name FROM users WHERE id = ?");

    logger.flush()?;
    println!("Wrote {} lines to {}", logger.metrics().emitted_count(), path.display());

    let content = std::fs::read_to_string(&path)?;
    for line in content.lines().rev().take(4).collect::<Vec<_>>().into_iter().rev() {
        println!("  {}", line);
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
