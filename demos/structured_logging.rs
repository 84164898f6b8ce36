//! Structured logging example
//!
//! Demonstrates JSON-lines output, predefined fields, logger groups and
//! configuration-driven setup.
//!
//! Run with: cargo run --example structured_logging

use leveled_logger::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Leveled Logger - Structured Logging Example ===\n");

    println!("1. JSON lines with predefined fields:");
    let logger = Logger::builder()
        .level(LogLevel::Info)
        .sink(Arc::new(ConsoleSink::stdout()))
        .structured(true)
        .fields(Fields::new().with_field("service", "checkout").with_field("version", 3))
        .build();
    logger.info(format_args!("order {} accepted", 1042))?;

    // Reserved keys in predefined fields never replace the record's own
    logger.predefine(
        Fields::new()
            .with_field("service", "checkout")
            .with_field("msg", "ignored")
            .with_field("canary", true),
    );
    logger.warn(format_args!("payment retried"))?;

    println!("\n2. Logger group with independent thresholds:");
    let errors_only = Arc::new(MemorySink::new());
    let group = LoggerGroup::with_format(FormatFlags::SHORT_FILE, true);
    group.add_handler(LogLevel::Debug, Arc::new(ConsoleSink::stdout()));
    group.add_handler(LogLevel::Error, errors_only.clone());

    group.debug(format_args!("cache warmed"))?;
    group.error(format_args!("inventory service unreachable"))?;
    println!("   error sink received {} record(s)", errors_only.lines().len());

    println!("\n3. Configuration-driven logger:");
    let config = LoggerConfig::from_json(
        r#"{
            "level": "warning",
            "flags": "date|time|shortfile|utc",
            "structured": true,
            "output": {"kind": "stdout"},
            "fields": {"env": "staging"}
        }"#,
    )?;
    let configured = config.build()?;
    configured.info(format_args!("filtered by the configured threshold"))?;
    configured.warn(format_args!("configured from JSON"))?;

    println!(
        "\n   logged={} failures={}",
        configured.metrics().total_logged(),
        configured.metrics().write_failures()
    );

    println!("\n=== Example completed successfully ===");
    Ok(())
}
