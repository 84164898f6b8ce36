//! Console sink implementation

use crate::core::{Result, Sink};
use std::io::Write;

/// Standard stream a [`ConsoleSink`] writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

#[derive(Debug)]
pub struct ConsoleSink {
    stream: ConsoleStream,
}

impl ConsoleSink {
    pub fn new(stream: ConsoleStream) -> Self {
        Self { stream }
    }

    /// Sink on standard error, the destination of the default logger
    pub fn stderr() -> Self {
        Self::new(ConsoleStream::Stderr)
    }

    pub fn stdout() -> Self {
        Self::new(ConsoleStream::Stdout)
    }

    pub fn stream(&self) -> ConsoleStream {
        self.stream
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::stderr()
    }
}

impl Sink for ConsoleSink {
    fn write_line(&self, line: &[u8]) -> Result<()> {
        // Locking the stream keeps a line from interleaving with other writers
        match self.stream {
            ConsoleStream::Stdout => std::io::stdout().lock().write_all(line)?,
            ConsoleStream::Stderr => std::io::stderr().lock().write_all(line)?,
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        match self.stream {
            ConsoleStream::Stdout => std::io::stdout().flush()?,
            ConsoleStream::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self.stream {
            ConsoleStream::Stdout => "stdout",
            ConsoleStream::Stderr => "stderr",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_stderr() {
        let sink = ConsoleSink::default();
        assert_eq!(sink.stream(), ConsoleStream::Stderr);
        assert_eq!(sink.name(), "stderr");
    }

    #[test]
    fn test_write_and_flush() {
        let sink = ConsoleSink::stdout();
        sink.write_line(b"console sink test line\n").expect("write to stdout");
        sink.flush().expect("flush stdout");
    }
}
