//! Main logger implementation

use super::{
    error::Result,
    fields::Fields,
    flags::FormatFlags,
    header::{CallerLocation, Header},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    sink::Sink,
    termination::{process_exit, ExitHook, FATAL_EXIT_CODE},
};
use crate::sinks::{ConsoleSink, MemorySink};
use chrono::Local;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Header flags of the default logger: date, time and `file.rs:line`
pub const DEFAULT_FLAGS: FormatFlags = FormatFlags::STD.union(FormatFlags::SHORT_FILE);

/// Keys a structured record always owns
///
/// Predefined fields with one of these names are left out of the record, so
/// they can never shadow the header, the level or the message.
pub const RESERVED_KEYS: [&str; 5] = ["logtime", "filename", "lineno", "log_level", "msg"];

/// A leveled logger writing to a single sink
///
/// Calls below the threshold return before the message is formatted. Accepted
/// calls produce exactly one `write_line` on the sink, either as a plain-text
/// line or, in structured mode, as one JSON object per line.
///
/// # Example
///
/// ```
/// use leveled_logger::{Fields, FormatFlags, LogLevel, Logger, MemorySink};
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemorySink::new());
/// let logger = Logger::new(LogLevel::Info, sink.clone(), FormatFlags::empty(), true);
/// logger.predefine(Fields::new().with_field("service", "billing"));
///
/// logger.debug(format_args!("not written")).unwrap();
/// logger.info(format_args!("charged {} accounts", 3)).unwrap();
///
/// assert_eq!(
///     sink.contents(),
///     "{\"logtime\":\"\",\"log_level\":\"INFO\",\"msg\":\"charged 3 accounts\",\"service\":\"billing\"}\n"
/// );
/// ```
pub struct Logger {
    level: LogLevel,
    flags: FormatFlags,
    structured: bool,
    sink: Arc<dyn Sink>,
    /// Guards the predefined fields and the structured emit section
    predefined: Mutex<Fields>,
    exit_hook: ExitHook,
    metrics: LoggerMetrics,
}

impl Logger {
    #[must_use]
    pub fn new(level: LogLevel, sink: Arc<dyn Sink>, flags: FormatFlags, structured: bool) -> Self {
        Self {
            level,
            flags,
            structured,
            sink,
            predefined: Mutex::new(Fields::new()),
            exit_hook: process_exit(),
            metrics: LoggerMetrics::new(),
        }
    }

    /// Logger writing to a fresh in-memory sink
    ///
    /// Returns the sink handle alongside, for reading the output back.
    #[must_use]
    pub fn cached(level: LogLevel, flags: FormatFlags, structured: bool) -> (Self, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let logger = Self::new(level, sink.clone(), flags, structured);
        (logger, sink)
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use leveled_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .level(LogLevel::Debug)
    ///     .flags(FormatFlags::STD | FormatFlags::MICROSECONDS)
    ///     .structured(true)
    ///     .build();
    /// assert!(logger.enabled(LogLevel::Debug));
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn flags(&self) -> FormatFlags {
        self.flags
    }

    pub fn is_structured(&self) -> bool {
        self.structured
    }

    /// The destination this logger writes to
    pub fn sink(&self) -> Arc<dyn Sink> {
        Arc::clone(&self.sink)
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Replace the predefined fields merged into every structured record
    ///
    /// The previous fields are discarded, not merged.
    pub fn predefine(&self, fields: Fields) {
        *self.predefined.lock() = fields;
    }

    /// Snapshot of the current predefined fields
    pub fn predefined(&self) -> Fields {
        self.predefined.lock().clone()
    }

    /// Whether a call at `level` would be written
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level.passes(self.level)
    }

    /// Log at an explicit level
    #[track_caller]
    pub fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) -> Result<()> {
        if !self.enabled(level) {
            return Ok(());
        }
        let caller = self.capture_caller();
        self.emit(caller, &fmt::format(args))
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log(LogLevel::Debug, args)
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log(LogLevel::Info, args)
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log(LogLevel::Warn, args)
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log(LogLevel::Error, args)
    }

    /// Write a record regardless of the threshold
    #[track_caller]
    pub fn write(&self, args: fmt::Arguments<'_>) -> Result<()> {
        let caller = self.capture_caller();
        self.emit(caller, &fmt::format(args))
    }

    /// Log at FATAL, flush the sink, then run the exit hook with status 1
    ///
    /// With the default hook this never returns. A custom hook that returns
    /// gets the write result back.
    #[track_caller]
    pub fn fatal(&self, args: fmt::Arguments<'_>) -> Result<()> {
        let caller = self.capture_caller();
        let written = self.emit(caller, &fmt::format(args));
        let flushed = self.sink.flush();
        (self.exit_hook)(FATAL_EXIT_CODE);
        written.and(flushed)
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.flush()
    }

    pub(crate) fn exit_hook(&self) -> &ExitHook {
        &self.exit_hook
    }

    #[track_caller]
    #[inline]
    fn capture_caller(&self) -> Option<CallerLocation> {
        if self.flags.wants_caller() {
            Some(CallerLocation::caller())
        } else {
            None
        }
    }

    /// Render and write one record that already passed the level filter
    pub(crate) fn emit(&self, caller: Option<CallerLocation>, message: &str) -> Result<()> {
        let now = Local::now();
        let result = if self.structured {
            self.write_structured(&now, caller, message)
        } else {
            self.write_plain(&now, caller, message)
        };

        match &result {
            Ok(()) => self.metrics.record_logged(),
            Err(_) => self.metrics.record_failure(),
        };
        result
    }

    fn write_plain(
        &self,
        now: &chrono::DateTime<Local>,
        caller: Option<CallerLocation>,
        message: &str,
    ) -> Result<()> {
        let mut line = Header::new(self.flags, now, caller).prefix();
        line.push_str(message);
        if !message.ends_with('\n') {
            line.push('\n');
        }
        self.sink.write_line(line.as_bytes())
    }

    fn write_structured(
        &self,
        now: &chrono::DateTime<Local>,
        caller: Option<CallerLocation>,
        message: &str,
    ) -> Result<()> {
        let predefined = self.predefined.lock();
        let header = Header::new(self.flags, now, caller);
        let line = render_record(&header, self.level, message, &predefined)?;
        self.sink.write_line(&line)
    }
}

/// Serialize one structured record as a JSON line
///
/// Order: header fields, `log_level`, `msg`, then the predefined fields that
/// do not use a reserved key. `log_level` names the logger's threshold, so
/// every record of one logger carries the same value.
fn render_record(
    header: &Header,
    threshold: LogLevel,
    message: &str,
    predefined: &Fields,
) -> Result<Vec<u8>> {
    let mut record = header.to_fields();
    record.insert("log_level", threshold.to_str());
    record.insert("msg", message);
    for (key, value) in predefined.iter() {
        if !RESERVED_KEYS.contains(&key) {
            record.insert(key, value.clone());
        }
    }

    let mut line = serde_json::to_vec(&record)?;
    line.push(b'\n');
    Ok(line)
}

impl Default for Logger {
    /// INFO threshold on standard error with [`DEFAULT_FLAGS`], plain text
    fn default() -> Self {
        Self::new(
            LogLevel::Info,
            Arc::new(ConsoleSink::stderr()),
            DEFAULT_FLAGS,
            false,
        )
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("flags", &self.flags)
            .field("structured", &self.structured)
            .field("sink", &self.sink.name())
            .field("predefined", &*self.predefined.lock())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use leveled_logger::prelude::*;
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemorySink::new());
/// let logger = Logger::builder()
///     .level(LogLevel::Warn)
///     .sink(sink.clone())
///     .flags(FormatFlags::empty())
///     .fields(Fields::new().with_field("region", "eu-west-1"))
///     .on_fatal(Arc::new(|code: i32| eprintln!("would exit with {}", code)))
///     .build();
///
/// logger.warn(format_args!("disk at 91%")).unwrap();
/// assert_eq!(sink.contents(), "disk at 91%\n");
/// ```
pub struct LoggerBuilder {
    level: LogLevel,
    sink: Option<Arc<dyn Sink>>,
    flags: FormatFlags,
    structured: bool,
    fields: Fields,
    exit_hook: Option<ExitHook>,
}

impl LoggerBuilder {
    /// Create a new builder with the default logger's settings
    pub fn new() -> Self {
        Self {
            level: LogLevel::Info,
            sink: None,
            flags: DEFAULT_FLAGS,
            structured: false,
            fields: Fields::new(),
            exit_hook: None,
        }
    }

    /// Set the minimum level
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the destination; standard error when not called
    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn flags(mut self, flags: FormatFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Emit JSON lines instead of plain text
    #[must_use = "builder methods return a new value"]
    pub fn structured(mut self, structured: bool) -> Self {
        self.structured = structured;
        self
    }

    /// Initial predefined fields
    #[must_use = "builder methods return a new value"]
    pub fn fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    /// Replace the hook run after a fatal record; process exit by default
    #[must_use = "builder methods return a new value"]
    pub fn on_fatal(mut self, hook: ExitHook) -> Self {
        self.exit_hook = Some(hook);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(ConsoleSink::stderr()));
        let mut logger = Logger::new(self.level, sink, self.flags, self.structured);
        logger.predefined = Mutex::new(self.fields);
        if let Some(hook) = self.exit_hook {
            logger.exit_hook = hook;
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
