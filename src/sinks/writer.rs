//! Sink over any `io::Write`

use crate::core::{Result, Sink};
use parking_lot::Mutex;
use std::io::Write;

/// Adapts an arbitrary writer (socket, pipe, `Vec<u8>`, ...) into a sink
///
/// The writer sits behind a mutex, so each line is written in one piece even
/// when the sink is shared between threads.
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
    name: String,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self::with_name(writer, "writer")
    }

    pub fn with_name(writer: W, name: impl Into<String>) -> Self {
        Self {
            writer: Mutex::new(writer),
            name: name.into(),
        }
    }

    /// Give the writer back, dropping the sink
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write_line(&self, line: &[u8]) -> Result<()> {
        self.writer.lock().write_all(line)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
