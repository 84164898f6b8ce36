//! Sink trait for log output destinations

use super::error::Result;

/// A line-oriented destination for rendered records
///
/// A sink receives exactly one `write_line` call per accepted log call, with
/// the full line including its trailing newline. Sinks are shared between
/// loggers and threads, so implementations provide their own
/// synchronization.
pub trait Sink: Send + Sync {
    fn write_line(&self, line: &[u8]) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}
