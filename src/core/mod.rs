//! Core logger types and traits

pub mod config;
pub mod error;
pub mod fields;
pub mod flags;
pub mod group;
pub mod header;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod sink;
pub mod termination;

pub use config::{LoggerConfig, Output};
pub use error::{LoggerError, Result};
pub use fields::{FieldValue, Fields};
pub use flags::FormatFlags;
pub use group::LoggerGroup;
pub use header::{CallerLocation, Header};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, DEFAULT_FLAGS, RESERVED_KEYS};
pub use metrics::LoggerMetrics;
pub use sink::Sink;
pub use termination::{process_exit, ExitHook, FATAL_EXIT_CODE};
