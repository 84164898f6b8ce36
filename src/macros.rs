//! Logging macros for ergonomic log message formatting.
//!
//! Every macro takes either a logger (or logger group) followed by a format
//! string, or just a format string, in which case the call goes to the
//! process-wide default logger in [`crate::global`]. Arguments are captured
//! with `format_args!`, so nothing is formatted when the level is disabled.
//!
//! The macros discard the write result, like `eprintln!` would; call the
//! methods directly when a sink failure has to be handled.
//!
//! # Examples
//!
//! ```
//! use leveled_logger::prelude::*;
//! use leveled_logger::{info, warn};
//!
//! let (logger, sink) = Logger::cached(LogLevel::Info, FormatFlags::empty(), false);
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! warn!(logger, "Port {} is already bound", port);
//!
//! assert_eq!(sink.lines(), vec!["Server started", "Port 8080 is already bound"]);
//!
//! // Through the default logger, with the "Info: " prefix
//! info!("Listening on {}", port);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let (logger, _sink) = Logger::cached(LogLevel::Debug, FormatFlags::empty(), false);
/// use leveled_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// log!(LogLevel::Warn, "default logger, no prefix");
/// ```
#[macro_export]
macro_rules! log {
    ($level:expr, $fmt:literal $($arg:tt)*) => {{
        let _ = $crate::global::log($level, format_args!($fmt $($arg)*));
    }};
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let _ = $logger.log($level, format_args!($($arg)+));
    }};
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let (logger, _sink) = Logger::cached(LogLevel::Debug, FormatFlags::empty(), false);
/// use leveled_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($fmt:literal $($arg:tt)*) => {{
        let _ = $crate::global::debug(format_args!($fmt $($arg)*));
    }};
    ($logger:expr, $($arg:tt)+) => {{
        let _ = $logger.debug(format_args!($($arg)+));
    }};
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let (logger, _sink) = Logger::cached(LogLevel::Debug, FormatFlags::empty(), false);
/// use leveled_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($fmt:literal $($arg:tt)*) => {{
        let _ = $crate::global::info(format_args!($fmt $($arg)*));
    }};
    ($logger:expr, $($arg:tt)+) => {{
        let _ = $logger.info(format_args!($($arg)+));
    }};
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let (logger, _sink) = Logger::cached(LogLevel::Debug, FormatFlags::empty(), false);
/// use leveled_logger::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($fmt:literal $($arg:tt)*) => {{
        let _ = $crate::global::warn(format_args!($fmt $($arg)*));
    }};
    ($logger:expr, $($arg:tt)+) => {{
        let _ = $logger.warn(format_args!($($arg)+));
    }};
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let (logger, _sink) = Logger::cached(LogLevel::Debug, FormatFlags::empty(), false);
/// use leveled_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($fmt:literal $($arg:tt)*) => {{
        let _ = $crate::global::error(format_args!($fmt $($arg)*));
    }};
    ($logger:expr, $($arg:tt)+) => {{
        let _ = $logger.error(format_args!($($arg)+));
    }};
}

/// Log a fatal-level message, then run the exit hook.
///
/// With the default hook the process ends with status 1.
///
/// ```no_run
/// use leveled_logger::fatal;
/// fatal!("Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($fmt:literal $($arg:tt)*) => {{
        let _ = $crate::global::fatal(format_args!($fmt $($arg)*));
    }};
    ($logger:expr, $($arg:tt)+) => {{
        let _ = $logger.fatal(format_args!($($arg)+));
    }};
}

/// Write a message regardless of the threshold.
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let (logger, sink) = Logger::cached(LogLevel::Fatal, FormatFlags::empty(), false);
/// use leveled_logger::write_log;
/// write_log!(logger, "always {}", "visible");
/// assert_eq!(sink.contents(), "always visible\n");
/// ```
#[macro_export]
macro_rules! write_log {
    ($fmt:literal $($arg:tt)*) => {{
        let _ = $crate::global::write(format_args!($fmt $($arg)*));
    }};
    ($logger:expr, $($arg:tt)+) => {{
        let _ = $logger.write(format_args!($($arg)+));
    }};
}

#[cfg(test)]
mod tests {
    use crate::core::{FormatFlags, LogLevel, Logger, LoggerGroup};
    use crate::sinks::MemorySink;
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Arc;

    fn capture(level: LogLevel) -> (Logger, Arc<MemorySink>) {
        Logger::cached(level, FormatFlags::empty(), false)
    }

    #[test]
    fn test_log_macro() {
        let (logger, sink) = capture(LogLevel::Info);
        log!(logger, LogLevel::Info, "Test message");
        log!(logger, LogLevel::Info, "Formatted: {}", 42);
        log!(logger, LogLevel::Debug, "Hidden");
        assert_eq!(sink.lines(), vec!["Test message", "Formatted: 42"]);
    }

    #[test]
    fn test_debug_macro() {
        let (logger, sink) = capture(LogLevel::Debug);
        debug!(logger, "Debug message");
        debug!(logger, "Count: {}", 5);
        assert_eq!(sink.lines(), vec!["Debug message", "Count: 5"]);
    }

    #[test]
    fn test_info_macro() {
        let (logger, sink) = capture(LogLevel::Info);
        info!(logger, "Info message");
        info!(logger, "Items: {}", 100);
        assert_eq!(sink.lines().len(), 2);
    }

    #[test]
    fn test_warn_macro() {
        let (logger, sink) = capture(LogLevel::Warn);
        info!(logger, "Hidden");
        warn!(logger, "Retry {} of {}", 1, 3);
        assert_eq!(sink.contents(), "Retry 1 of 3\n");
    }

    #[test]
    fn test_error_macro() {
        let (logger, sink) = capture(LogLevel::Error);
        error!(logger, "Code: {}", 500);
        assert_eq!(sink.contents(), "Code: 500\n");
    }

    #[test]
    fn test_fatal_macro_runs_hook() {
        let code = Arc::new(AtomicI32::new(0));
        let hook_code = Arc::clone(&code);
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::builder()
            .sink(sink.clone())
            .flags(FormatFlags::empty())
            .on_fatal(Arc::new(move |c| hook_code.store(c, Ordering::SeqCst)))
            .build();

        fatal!(logger, "Critical failure: {}", "system");
        assert_eq!(sink.contents(), "Critical failure: system\n");
        assert_eq!(code.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_write_macro() {
        let (logger, sink) = capture(LogLevel::Fatal);
        write_log!(logger, "unfiltered");
        assert_eq!(sink.contents(), "unfiltered\n");
    }

    #[test]
    fn test_macros_accept_groups() {
        let sink = Arc::new(MemorySink::new());
        let group = LoggerGroup::with_format(FormatFlags::empty(), false);
        group.add_handler(LogLevel::Warn, sink.clone());

        info!(group, "Hidden");
        warn!(group, "Shown {}", 1);
        assert_eq!(sink.contents(), "Shown 1\n");
    }
}
