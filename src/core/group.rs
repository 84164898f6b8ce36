//! Logger groups: one call, many destinations
//!
//! A [`LoggerGroup`] holds an ordered list of loggers, each with its own
//! threshold and sink. Every call is offered to every member in insertion
//! order; each member filters on its own threshold.

use super::{
    error::{LoggerError, Result},
    flags::FormatFlags,
    header::CallerLocation,
    log_level::LogLevel,
    logger::{Logger, DEFAULT_FLAGS},
    sink::Sink,
    termination::{process_exit, ExitHook, FATAL_EXIT_CODE},
};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Fan-out over independently thresholded loggers
///
/// A member that fails to write does not stop delivery to the members after
/// it; the failure is reported once all members had their turn.
///
/// # Example
///
/// ```
/// use leveled_logger::{FormatFlags, LogLevel, LoggerGroup, MemorySink};
/// use std::sync::Arc;
///
/// let everything = Arc::new(MemorySink::new());
/// let errors = Arc::new(MemorySink::new());
///
/// let group = LoggerGroup::with_format(FormatFlags::empty(), false);
/// group.add_handler(LogLevel::Debug, everything.clone());
/// group.add_handler(LogLevel::Error, errors.clone());
///
/// group.info(format_args!("cache warmed")).unwrap();
/// group.error(format_args!("cache lost")).unwrap();
///
/// assert_eq!(everything.lines(), vec!["cache warmed", "cache lost"]);
/// assert_eq!(errors.lines(), vec!["cache lost"]);
/// ```
pub struct LoggerGroup {
    members: RwLock<Vec<Arc<Logger>>>,
    flags: FormatFlags,
    structured: bool,
    exit_hook: ExitHook,
}

impl LoggerGroup {
    /// Empty group whose handlers use the default flags in plain-text mode
    #[must_use]
    pub fn new() -> Self {
        Self::with_format(DEFAULT_FLAGS, false)
    }

    /// Empty group whose handlers use `flags` and `structured`
    #[must_use]
    pub fn with_format(flags: FormatFlags, structured: bool) -> Self {
        Self {
            members: RwLock::new(Vec::new()),
            flags,
            structured,
            exit_hook: process_exit(),
        }
    }

    /// Group seeded with already configured loggers, kept in order
    #[must_use]
    pub fn from_loggers(loggers: impl IntoIterator<Item = Logger>) -> Self {
        let group = Self::new();
        for logger in loggers {
            group.add_logger(logger);
        }
        group
    }

    /// Replace the hook run after a fatal record; process exit by default
    #[must_use]
    pub fn with_exit_hook(mut self, hook: ExitHook) -> Self {
        self.exit_hook = hook;
        self
    }

    /// Append a member writing to `sink` at `level` and above
    pub fn add_handler(&self, level: LogLevel, sink: Arc<dyn Sink>) {
        self.add_logger(Logger::new(level, sink, self.flags, self.structured));
    }

    /// Append a fully configured member
    pub fn add_logger(&self, logger: Logger) {
        self.members.write().push(Arc::new(logger));
    }

    /// Replace every member with a single one writing to `sink` at `level`
    pub fn init(&self, level: LogLevel, sink: Arc<dyn Sink>) {
        let logger = Arc::new(Logger::new(level, sink, self.flags, self.structured));
        *self.members.write() = vec![logger];
    }

    /// Snapshot of the members in delivery order
    pub fn members(&self) -> Vec<Arc<Logger>> {
        self.members.read().clone()
    }

    pub fn len(&self) -> usize {
        self.members.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.read().is_empty()
    }

    /// Whether at least one member would write a call at `level`
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.members.read().iter().any(|member| member.enabled(level))
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) -> Result<()> {
        self.dispatch(level, CallerLocation::caller(), args)
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

    /// Deliver at FATAL to every member, flush them, then run the exit hook
    ///
    /// The hook only runs after every member had its chance to write.
    #[track_caller]
    pub fn fatal(&self, args: fmt::Arguments<'_>) -> Result<()> {
        let result = self.dispatch(LogLevel::Fatal, CallerLocation::caller(), args);
        for member in self.members() {
            if let Err(e) = member.flush() {
                eprintln!(
                    "[LOGGER ERROR] Failed to flush '{}' before exit: {}",
                    member.sink().name(),
                    e
                );
            }
        }
        (self.exit_hook)(FATAL_EXIT_CODE);
        result
    }

    /// Flush every member, returning the first failure
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for member in self.members() {
            if let Err(e) = member.flush() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn dispatch(
        &self,
        level: LogLevel,
        caller: CallerLocation,
        args: fmt::Arguments<'_>,
    ) -> Result<()> {
        // Snapshot the accepting members only, so no group lock is held while
        // sinks write and a call nobody accepts allocates nothing
        let accepting: Vec<Arc<Logger>> = {
            let members = self.members.read();
            if !members.iter().any(|member| member.enabled(level)) {
                return Ok(());
            }
            members
                .iter()
                .filter(|member| member.enabled(level))
                .cloned()
                .collect()
        };

        let message = fmt::format(args);
        let mut failed = 0;
        let mut first_error: Option<LoggerError> = None;

        for member in &accepting {
            if let Err(e) = member.emit(Some(caller), &message) {
                failed += 1;
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(first) => Err(LoggerError::partial_delivery(failed, accepting.len(), first)),
            None => Ok(()),
        }
    }
}

impl Default for LoggerGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggerGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerGroup")
            .field("members", &*self.members.read())
            .field("flags", &self.flags)
            .field("structured", &self.structured)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::MemorySink;
    use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};

    struct FailingSink;

    impl Sink for FailingSink {
        fn write_line(&self, _line: &[u8]) -> Result<()> {
            Err(LoggerError::writer("disk full"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct Counted<'a>(&'a AtomicUsize);

    impl fmt::Display for Counted<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.fetch_add(1, Ordering::SeqCst);
            write!(f, "counted")
        }
    }

    fn plain_group() -> LoggerGroup {
        LoggerGroup::with_format(FormatFlags::empty(), false)
    }

    #[test]
    fn test_members_filter_independently() {
        let debug_sink = Arc::new(MemorySink::new());
        let error_sink = Arc::new(MemorySink::new());
        let group = plain_group();
        group.add_handler(LogLevel::Debug, debug_sink.clone());
        group.add_handler(LogLevel::Error, error_sink.clone());

        group.info(format_args!("info only")).unwrap();

        assert_eq!(debug_sink.contents(), "info only\n");
        assert!(error_sink.is_empty());
    }

    #[test]
    fn test_add_handler_appends_in_order() {
        let group = plain_group();
        group.add_handler(LogLevel::Warn, Arc::new(MemorySink::new()));
        group.add_handler(LogLevel::Debug, Arc::new(MemorySink::new()));

        let levels: Vec<LogLevel> = group.members().iter().map(|m| m.level()).collect();
        assert_eq!(levels, vec![LogLevel::Warn, LogLevel::Debug]);
    }

    #[test]
    fn test_init_replaces_members() {
        let old = Arc::new(MemorySink::new());
        let new = Arc::new(MemorySink::new());
        let group = plain_group();
        group.add_handler(LogLevel::Debug, old.clone());
        group.add_handler(LogLevel::Debug, old.clone());

        group.init(LogLevel::Info, new.clone());
        assert_eq!(group.len(), 1);

        group.info(format_args!("after reset")).unwrap();
        assert!(old.is_empty());
        assert_eq!(new.contents(), "after reset\n");
    }

    #[test]
    fn test_failure_does_not_block_later_members() {
        let after = Arc::new(MemorySink::new());
        let group = plain_group();
        group.add_handler(LogLevel::Debug, Arc::new(FailingSink));
        group.add_handler(LogLevel::Debug, after.clone());

        let err = group.warn(format_args!("still delivered")).unwrap_err();

        assert_eq!(after.contents(), "still delivered\n");
        match err {
            LoggerError::PartialDelivery { failed, total, .. } => {
                assert_eq!(failed, 1);
                assert_eq!(total, 2);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_message_formatted_at_most_once() {
        let calls = AtomicUsize::new(0);
        let group = plain_group();
        group.add_handler(LogLevel::Debug, Arc::new(MemorySink::new()));
        group.add_handler(LogLevel::Debug, Arc::new(MemorySink::new()));
        group.add_handler(LogLevel::Fatal, Arc::new(MemorySink::new()));

        group.info(format_args!("{}", Counted(&calls))).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        calls.store(0, Ordering::SeqCst);
        let quiet = plain_group();
        quiet.add_handler(LogLevel::Error, Arc::new(MemorySink::new()));
        quiet.debug(format_args!("{}", Counted(&calls))).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_fatal_delivers_before_exit() {
        let first = Arc::new(MemorySink::new());
        let second = Arc::new(MemorySink::new());
        let delivered_at_exit = Arc::new(AtomicUsize::new(0));
        let exit_code = Arc::new(AtomicI32::new(0));

        let (hook_first, hook_second) = (Arc::clone(&first), Arc::clone(&second));
        let (hook_delivered, hook_code) = (Arc::clone(&delivered_at_exit), Arc::clone(&exit_code));
        let group = plain_group().with_exit_hook(Arc::new(move |code| {
            let delivered = hook_first.lines().len() + hook_second.lines().len();
            hook_delivered.store(delivered, Ordering::SeqCst);
            hook_code.store(code, Ordering::SeqCst);
        }));
        group.add_handler(LogLevel::Debug, first.clone());
        group.add_handler(LogLevel::Error, second.clone());

        group.fatal(format_args!("shutting down")).unwrap();

        assert_eq!(delivered_at_exit.load(Ordering::SeqCst), 2);
        assert_eq!(exit_code.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_fatal_exits_even_when_a_member_fails() {
        let exited = Arc::new(AtomicI32::new(0));
        let hook_exited = Arc::clone(&exited);
        let group = plain_group().with_exit_hook(Arc::new(move |code| {
            hook_exited.store(code, Ordering::SeqCst);
        }));
        group.add_handler(LogLevel::Debug, Arc::new(FailingSink));

        assert!(group.fatal(format_args!("bye")).is_err());
        assert_eq!(exited.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_structured_handlers() {
        let sink = Arc::new(MemorySink::new());
        let group = LoggerGroup::with_format(FormatFlags::empty(), true);
        group.add_handler(LogLevel::Info, sink.clone());

        group.error(format_args!("bad {}", "thing")).unwrap();

        let record: serde_json::Value = serde_json::from_str(&sink.contents()).unwrap();
        assert_eq!(record["log_level"], "INFO");
        assert_eq!(record["msg"], "bad thing");
    }

    #[test]
    fn test_partial_delivery_counts_accepting_members_only() {
        let group = plain_group();
        group.add_handler(LogLevel::Debug, Arc::new(FailingSink));
        group.add_handler(LogLevel::Info, Arc::new(MemorySink::new()));
        group.add_handler(LogLevel::Error, Arc::new(MemorySink::new()));
        group.add_handler(LogLevel::Fatal, Arc::new(FailingSink));

        match group.info(format_args!("two of four accept")).unwrap_err() {
            LoggerError::PartialDelivery { failed, total, .. } => {
                assert_eq!(failed, 1);
                assert_eq!(total, 2);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_call_nobody_accepts_touches_no_member() {
        let group = plain_group();
        group.add_handler(LogLevel::Error, Arc::new(FailingSink));
        group.add_handler(LogLevel::Fatal, Arc::new(FailingSink));

        assert!(group.warn(format_args!("below every threshold")).is_ok());
        for member in group.members() {
            assert_eq!(member.metrics().total_logged(), 0);
            assert_eq!(member.metrics().write_failures(), 0);
        }
    }

    #[test]
    fn test_from_loggers_and_enabled() {
        let (warn_logger, _) = Logger::cached(LogLevel::Warn, FormatFlags::empty(), false);
        let group = LoggerGroup::from_loggers(vec![warn_logger]);

        assert!(!group.enabled(LogLevel::Info));
        assert!(group.enabled(LogLevel::Warn));
        assert!(!LoggerGroup::new().enabled(LogLevel::Fatal));
        assert!(LoggerGroup::default().is_empty());
    }

    #[test]
    fn test_empty_group_is_a_no_op() {
        let group = plain_group();
        group.error(format_args!("nobody listens")).unwrap();
        group.flush().unwrap();
    }
}
