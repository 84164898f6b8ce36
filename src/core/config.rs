//! Logger configuration
//!
//! A serde-deserializable description of a logger, for applications that
//! keep their logging setup in a configuration file.
//!
//! ```json
//! {
//!   "level": "warn",
//!   "flags": "date|time|microseconds|shortfile",
//!   "structured": true,
//!   "output": { "kind": "file", "path": "/var/log/app.jsonl" },
//!   "fields": { "service": "billing", "shard": 3 }
//! }
//! ```

use super::{
    error::{LoggerError, Result},
    fields::Fields,
    flags::FormatFlags,
    log_level::LogLevel,
    logger::{Logger, DEFAULT_FLAGS},
    sink::Sink,
};
use crate::sinks::{ConsoleSink, FileSink};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Where a configured logger writes
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Output {
    #[default]
    Stderr,
    Stdout,
    File { path: PathBuf },
}

impl Output {
    /// Open the destination
    pub fn open(&self) -> Result<Arc<dyn Sink>> {
        Ok(match self {
            Output::Stderr => Arc::new(ConsoleSink::stderr()),
            Output::Stdout => Arc::new(ConsoleSink::stdout()),
            Output::File { path } => Arc::new(FileSink::new(path)?),
        })
    }
}

/// Serializable logger settings
///
/// Missing keys take the default logger's values. The level name is resolved
/// leniently: an unknown name falls back to DEBUG rather than failing.
///
/// # Example
///
/// ```
/// use leveled_logger::{LogLevel, LoggerConfig};
///
/// let config = LoggerConfig::from_json(r#"{"level": "error", "structured": true}"#).unwrap();
/// assert_eq!(config.log_level(), LogLevel::Error);
///
/// let logger = config.build().unwrap();
/// assert!(logger.is_structured());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: String,
    pub flags: FormatFlags,
    pub structured: bool,
    pub output: Output,
    pub fields: Fields,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info.to_str().to_string(),
            flags: DEFAULT_FLAGS,
            structured: false,
            output: Output::default(),
            fields: Fields::new(),
        }
    }
}

impl LoggerConfig {
    /// Parse a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LoggerError::config("LoggerConfig", e.to_string()))
    }

    /// Resolved threshold; unknown names become DEBUG
    pub fn log_level(&self) -> LogLevel {
        LogLevel::lookup(&self.level)
    }

    /// Open the output and build the logger
    pub fn build(&self) -> Result<Logger> {
        if LogLevel::find(&self.level).is_none() {
            eprintln!(
                "[LOGGER WARNING] Unknown log level '{}', falling back to DEBUG",
                self.level
            );
        }

        Ok(Logger::builder()
            .level(self.log_level())
            .sink(self.output.open()?)
            .flags(self.flags)
            .structured(self.structured)
            .fields(self.fields.clone())
            .build())
    }
}
