//! Stress tests for concurrent emission
//!
//! These tests verify:
//! - Lines are never interleaved or lost under concurrent high-volume logging
//! - Reconfiguration, hook replacement and sink swaps are safe mid-stream
//! - Gated calls stay cheap and side-effect free under load

use rust_line_logger::prelude::*;
use rust_line_logger::{debug, info};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const PER_THREAD: usize = 2_000;

#[test]
fn test_no_lines_lost_or_interleaved() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("stress.log");

    let logger = Arc::new(
        Logger::builder()
            .config(LoggerConfig::new().with_log_file(&log_file))
            .build()
            .expect("Failed to build logger"),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    info!(logger: logger; "worker", t, "seq", i);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().expect("Thread panicked");
    }
    logger.flush().expect("Failed to flush");

    let content = std::fs::read_to_string(&log_file).expect("Failed to read log file");
    let mut seen = HashSet::new();
    for line in content.lines() {
        let (_, tail) = line.split_once("[Info ] worker ").expect("whole line");
        assert!(seen.insert(tail.to_string()), "duplicate line {}", tail);
    }
    assert_eq!(seen.len(), THREADS * PER_THREAD);
    assert_eq!(logger.metrics().sink_error_count(), 0);
}

#[test]
fn test_hook_replacement_under_load() {
    let sink = MemorySink::new();
    let logger = Arc::new(Logger::with_sink(sink.clone()));

    let writers: Vec<_> = (0..4)
        .map(|_| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..1_000 {
                    logger.warn(i);
                }
            })
        })
        .collect();

    for round in 0..200 {
        let tag = format!("<{}>", round % 3);
        let hook: OutputHook = Arc::new(move |line: &str| format!("{}{}", tag, line));
        logger.set_output_hook(Some(hook));
    }
    logger.set_output_hook(None);

    for h in writers {
        h.join().expect("Thread panicked");
    }

    let lines = sink.lines();
    assert_eq!(lines.len(), 4_000);
    for line in &lines {
        // At most one hook was applied to each line
        assert!(line.matches('<').count() <= 1, "{}", line);
    }
}

#[test]
fn test_sink_swap_under_load() {
    let first = MemorySink::new();
    let second = MemorySink::new();
    let logger = Arc::new(Logger::with_sink(first.clone()));

    let writer = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for i in 0..5_000 {
                logger.error(i);
            }
        })
    };
    thread::yield_now();
    logger.set_sink(Box::new(second.clone()));
    writer.join().expect("Thread panicked");

    assert_eq!(first.len() + second.len(), 5_000);
}

#[test]
fn test_gated_calls_under_load() {
    let sink = MemorySink::new();
    let logger = Arc::new(Logger::with_sink(sink.clone()));
    logger.set_level(LogLevel::Error);
    let evaluations = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let logger = Arc::clone(&logger);
            let evaluations = Arc::clone(&evaluations);
            thread::spawn(move || {
                for _ in 0..PER_THREAD {
                    let emission = debug!(logger: logger; {
                        evaluations.fetch_add(1, Ordering::Relaxed);
                        "never"
                    });
                    assert_eq!(emission, Emission::Skipped);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().expect("Thread panicked");
    }

    assert_eq!(evaluations.load(Ordering::Relaxed), 0);
    assert!(sink.is_empty());
}
