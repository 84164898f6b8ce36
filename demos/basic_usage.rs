//! Basic logger usage example
//!
//! Demonstrates plain-text logging, header flags and the default logger.
//!
//! Run with: cargo run --example basic_usage

use leveled_logger::prelude::*;
use leveled_logger::{global, info, warn};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Leveled Logger - Basic Usage Example ===\n");

    // A logger on stderr with the default header
    let logger = Logger::default();

    println!("1. Logging at different levels (threshold INFO):");
    logger.debug(format_args!("This debug message is filtered"))?;
    logger.info(format_args!("This is an info message"))?;
    logger.warn(format_args!("This is a warning message"))?;
    logger.error(format_args!("This is an error message"))?;

    println!("\n2. Header flags:");
    let detailed = Logger::new(
        LogLevel::Debug,
        Arc::new(ConsoleSink::stdout()),
        FormatFlags::STD | FormatFlags::MICROSECONDS | FormatFlags::LONG_FILE | FormatFlags::UTC,
        false,
    );
    detailed.debug(format_args!("UTC time with microseconds and the full path"))?;

    let bare = Logger::new(LogLevel::Info, Arc::new(ConsoleSink::stdout()), FormatFlags::empty(), false);
    bare.info(format_args!("No header at all"))?;

    println!("\n3. Macros:");
    let user = "alice";
    info!(bare, "User {} logged in", user);
    warn!(bare, "{} failed attempts for {}", 3, user);

    println!("\n4. Default logger:");
    global::info(format_args!("Written through the default logger"))?;
    global::init(LogLevel::Debug, Arc::new(ConsoleSink::stdout()), FormatFlags::SHORT_FILE, false);
    global::debug(format_args!("Now at DEBUG on stdout"))?;
    info!("Macros without a logger use the default one");

    println!("\n5. Capturing output in memory:");
    let (cached, sink) = Logger::cached(LogLevel::Info, FormatFlags::empty(), false);
    cached.info(format_args!("captured"))?;
    println!("   captured {} line(s): {:?}", sink.lines().len(), sink.lines());

    println!("\n=== Example completed successfully ===");
    Ok(())
}
