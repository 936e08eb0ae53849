//! Criterion benchmarks for rust_line_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_line_logger::core::caller::shorten;
use rust_line_logger::prelude::*;
use rust_line_logger::{debug, info};
use std::sync::Arc;
use std::thread;

/// Sink that discards everything, so only formatting is measured
struct NullSink;

impl Sink for NullSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        black_box(line);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

fn logger_with(config: LoggerConfig) -> Logger {
    Logger::builder()
        .config(config)
        .sink(NullSink)
        .build()
        .expect("valid benchmark config")
}

// ============================================================================
// Level Gate Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = logger_with(LoggerConfig::new().with_level(LogLevel::Warn));

    group.bench_function("filtered_out_method", |b| {
        b.iter(|| logger.debug(black_box("filtered")));
    });

    group.bench_function("filtered_out_macro", |b| {
        b.iter(|| debug!(logger: logger; black_box("filtered"), black_box(42)));
    });

    group.bench_function("passes_filter", |b| {
        b.iter(|| logger.error(black_box("passes")));
    });

    group.finish();
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");
    group.throughput(Throughput::Elements(1));

    let ctx = CorrelationContext::new().with_value("session_id", "3f2a9c");

    let plain = logger_with(LoggerConfig::new().with_correlation_key("session_id"));
    group.bench_function("plain", |b| {
        b.iter(|| info!(logger: plain, ctx: ctx; "request handled in", black_box(12), "ms"));
    });

    let colored = logger_with(
        LoggerConfig::new()
            .with_correlation_key("session_id")
            .with_color(true),
    );
    group.bench_function("plain_colored", |b| {
        b.iter(|| info!(logger: colored, ctx: ctx; "request handled in", black_box(12), "ms"));
    });

    let json = logger_with(
        LoggerConfig::new()
            .with_correlation_key("session_id")
            .with_mode(OutputMode::Json),
    );
    group.bench_function("json", |b| {
        b.iter(|| info!(logger: json, ctx: ctx; "request handled in", black_box(12), "ms"));
    });

    let fields = Fields::new()
        .with("method", "GET")
        .with("path", "/api/v1/users")
        .with("status", 200)
        .with("latency_ms", 12.5);
    group.bench_function("json_fields", |b| {
        b.iter(|| json.with_fields(Some(&ctx), black_box(&fields), LogLevel::Info));
    });

    group.finish();
}

fn bench_caller_shortening(c: &mut Criterion) {
    c.bench_function("shorten_caller", |b| {
        b.iter(|| shorten(black_box("/home/build/service/src/handlers/session/login.rs:218"), 20));
    });
}

// ============================================================================
// Concurrent Logging Benchmarks
// ============================================================================

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    for threads in [2usize, 4, 8] {
        group.throughput(Throughput::Elements((threads * 100) as u64));
        group.bench_function(format!("{}_threads", threads), |b| {
            let logger = Arc::new(logger_with(LoggerConfig::new()));
            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|t| {
                        let logger = Arc::clone(&logger);
                        thread::spawn(move || {
                            for i in 0..100 {
                                info!(logger: logger; "thread", t, "message", i);
                            }
                        })
                    })
                    .collect();
                for h in handles {
                    let _ = h.join();
                }
            });
        });
    }

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_level_filtering,
    bench_formatting,
    bench_caller_shortening,
    bench_concurrent_logging
);

criterion_main!(benches);
