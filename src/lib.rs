//! # Leveled Logger
//!
//! A leveled logging facade: a severity filter in front of a line-oriented
//! sink, with plain-text or JSON-lines output, predefined structured fields,
//! multi-destination logger groups and a process-wide default instance.
//!
//! ## Features
//!
//! - **Cheap when disabled**: calls below the threshold return before any
//!   formatting happens
//! - **Plain or structured**: `2009/01/23 01:23:23 main.rs:12: message` or
//!   one JSON object per line with predefined fields merged in
//! - **Fan-out**: logger groups deliver one call to many sinks, each with its
//!   own threshold
//! - **Thread Safe**: loggers and groups are shared freely between threads
//!
//! ## Example
//!
//! ```
//! use leveled_logger::prelude::*;
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let logger = Logger::new(LogLevel::Info, sink.clone(), FormatFlags::empty(), false);
//!
//! logger.debug(format_args!("dropped")).unwrap();
//! logger.info(format_args!("kept")).unwrap();
//! assert_eq!(sink.contents(), "kept\n");
//! ```

pub mod core;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        ExitHook, FieldValue, Fields, FormatFlags, LogLevel, Logger, LoggerBuilder, LoggerConfig,
        LoggerError, LoggerGroup, LoggerMetrics, Output, Result, Sink, DEFAULT_FLAGS,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink, WriterSink};
}

pub use crate::core::{
    process_exit, CallerLocation, ExitHook, FieldValue, Fields, FormatFlags, Header, LogLevel,
    Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerGroup, LoggerMetrics, Output, Result,
    Sink, DEFAULT_FLAGS, FATAL_EXIT_CODE, RESERVED_KEYS,
};
pub use sinks::{ConsoleSink, ConsoleStream, FileSink, MemorySink, WriterSink};
