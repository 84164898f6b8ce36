//! Process termination after fatal records
//!
//! `fatal` calls deliver their record first and then hand the exit status to
//! an [`ExitHook`]. The default hook ends the process; tests install a hook
//! that records the status instead.

use std::sync::Arc;

/// Exit status passed to the hook by every `fatal` call
pub const FATAL_EXIT_CODE: i32 = 1;

/// Callback invoked with the exit status once a fatal record was delivered
pub type ExitHook = Arc<dyn Fn(i32) + Send + Sync>;

/// Hook that terminates the current process
pub fn process_exit() -> ExitHook {
    Arc::new(|code| std::process::exit(code))
}
