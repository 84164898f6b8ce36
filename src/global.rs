//! Process-wide default logger and logger group
//!
//! The free functions in this module write through a default [`Logger`]
//! that is created on first use with an INFO threshold, standard error as
//! destination, [`DEFAULT_FLAGS`](crate::DEFAULT_FLAGS) and plain-text output. [`init`] swaps in a
//! brand-new instance; calls that already loaded the previous one finish on
//! it, every later call uses the new one. Predefined fields of the replaced
//! instance are not carried over.
//!
//! The leveled free functions prefix the message with the level's title:
//!
//! ```
//! use leveled_logger::{global, FormatFlags, LogLevel, MemorySink};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! global::init(LogLevel::Info, sink.clone(), FormatFlags::empty(), false);
//!
//! global::debug(format_args!("debug")).unwrap();
//! global::info(format_args!("info")).unwrap();
//! assert_eq!(sink.contents(), "Info: info\n");
//! ```

use crate::core::{
    header::CallerLocation, Fields, FormatFlags, LogLevel, Logger, LoggerGroup, Result, Sink,
    FATAL_EXIT_CODE,
};
use crate::sinks::ConsoleSink;
use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;

static DEFAULT_LOGGER: Lazy<ArcSwap<Logger>> =
    Lazy::new(|| ArcSwap::from_pointee(Logger::default()));

static DEFAULT_GROUP: Lazy<ArcSwap<LoggerGroup>> = Lazy::new(|| {
    let group = LoggerGroup::new();
    group.add_handler(LogLevel::Info, Arc::new(ConsoleSink::stderr()));
    ArcSwap::from_pointee(group)
});

/// The current default logger
pub fn logger() -> Arc<Logger> {
    DEFAULT_LOGGER.load_full()
}

/// Replace the default logger with a new one built from these settings
pub fn init(level: LogLevel, sink: Arc<dyn Sink>, flags: FormatFlags, structured: bool) {
    set_logger(Logger::new(level, sink, flags, structured));
}

/// Replace the default logger with a fully configured one
pub fn set_logger(logger: Logger) {
    DEFAULT_LOGGER.store(Arc::new(logger));
}

/// Replace the predefined fields of the default logger
pub fn predefine(fields: Fields) {
    DEFAULT_LOGGER.load().predefine(fields);
}

/// Write through the default logger regardless of its threshold
#[track_caller]
pub fn write(args: fmt::Arguments<'_>) -> Result<()> {
    DEFAULT_LOGGER.load().write(args)
}

/// Log at an explicit level, without a level prefix
#[track_caller]
pub fn log(level: LogLevel, args: fmt::Arguments<'_>) -> Result<()> {
    DEFAULT_LOGGER.load().log(level, args)
}

#[track_caller]
pub fn debug(args: fmt::Arguments<'_>) -> Result<()> {
    log_prefixed(&DEFAULT_LOGGER.load(), LogLevel::Debug, args)
}

#[track_caller]
pub fn info(args: fmt::Arguments<'_>) -> Result<()> {
    log_prefixed(&DEFAULT_LOGGER.load(), LogLevel::Info, args)
}

#[track_caller]
pub fn warn(args: fmt::Arguments<'_>) -> Result<()> {
    log_prefixed(&DEFAULT_LOGGER.load(), LogLevel::Warn, args)
}

#[track_caller]
pub fn error(args: fmt::Arguments<'_>) -> Result<()> {
    log_prefixed(&DEFAULT_LOGGER.load(), LogLevel::Error, args)
}

/// Log `"Fatal: ..."` through the default logger, then run its exit hook
#[track_caller]
pub fn fatal(args: fmt::Arguments<'_>) -> Result<()> {
    let logger = DEFAULT_LOGGER.load_full();
    let written = log_prefixed(&logger, LogLevel::Fatal, args);
    let flushed = logger.flush();
    (logger.exit_hook())(FATAL_EXIT_CODE);
    written.and(flushed)
}

#[track_caller]
fn log_prefixed(logger: &Logger, level: LogLevel, args: fmt::Arguments<'_>) -> Result<()> {
    if !logger.enabled(level) {
        return Ok(());
    }
    let caller = if logger.flags().wants_caller() {
        Some(CallerLocation::caller())
    } else {
        None
    };
    logger.emit(caller, &format!("{}: {}", level.title(), args))
}

/// The current default logger group
pub fn group() -> Arc<LoggerGroup> {
    DEFAULT_GROUP.load_full()
}

/// Reset the default group to a single member writing to `sink` at `level`
pub fn init_group(level: LogLevel, sink: Arc<dyn Sink>) {
    DEFAULT_GROUP.load().init(level, sink);
}

/// Replace the default group entirely
pub fn set_group(group: LoggerGroup) {
    DEFAULT_GROUP.store(Arc::new(group));
}
