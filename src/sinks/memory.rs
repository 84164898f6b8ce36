//! In-memory sink, mostly for tests and for capturing output

use crate::core::{Result, Sink};
use parking_lot::Mutex;

/// Collects written lines in a byte buffer
///
/// # Example
///
/// ```
/// use leveled_logger::{FormatFlags, LogLevel, Logger, MemorySink};
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemorySink::new());
/// let logger = Logger::new(LogLevel::Info, sink.clone(), FormatFlags::empty(), false);
///
/// logger.info(format_args!("ready")).unwrap();
/// assert_eq!(sink.contents(), "ready\n");
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    buffer: Mutex<Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw bytes written so far
    pub fn bytes(&self) -> Vec<u8> {
        self.buffer.lock().clone()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    /// Written lines without their trailing newline
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    /// Number of bytes written
    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write_line(&self, line: &[u8]) -> Result<()> {
        self.buffer.lock().extend_from_slice(line);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
