//! File sink implementation

use crate::core::{LoggerError, Result, Sink};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appends lines to a file
///
/// Every line goes straight to the file under the sink's lock; nothing is
/// held back in user space, so a line is on disk once `write_line` returns
/// `Ok`. [`Sink::flush`] additionally syncs the data to the storage device.
pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::file_sink(path.display().to_string(), e.to_string()))?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, operation: &str, source: std::io::Error) -> LoggerError {
        LoggerError::io_operation(operation, self.path.display().to_string(), source)
    }
}

impl Sink for FileSink {
    fn write_line(&self, line: &[u8]) -> Result<()> {
        self.file
            .lock()
            .write_all(line)
            .map_err(|e| self.io_error("writing", e))
    }

    fn flush(&self) -> Result<()> {
        self.file
            .lock()
            .sync_data()
            .map_err(|e| self.io_error("syncing", e))
    }

    fn name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_file_sink_appends_lines() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("test.log");

        let sink = FileSink::new(&log_path)?;
        sink.write_line(b"first\n")?;
        sink.write_line(b"second\n")?;
        sink.flush()?;

        assert_eq!(fs::read_to_string(&log_path)?, "first\nsecond\n");
        assert_eq!(sink.path(), log_path.as_path());
        Ok(())
    }

    #[test]
    fn test_line_reaches_file_without_flush() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("unflushed.log");

        let sink = FileSink::new(&log_path)?;
        sink.write_line(b"visible immediately\n")?;

        // sink still alive and never flushed
        assert_eq!(fs::read_to_string(&log_path)?, "visible immediately\n");
        drop(sink);
        Ok(())
    }

    #[test]
    fn test_file_sink_keeps_existing_content() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("existing.log");
        fs::write(&log_path, "old\n")?;

        {
            let sink = FileSink::new(&log_path)?;
            sink.write_line(b"new\n")?;
        }

        assert_eq!(fs::read_to_string(&log_path)?, "old\nnew\n");
        Ok(())
    }

    #[test]
    fn test_file_sink_open_failure() {
        let dir = tempdir().expect("temp dir");
        let missing = dir.path().join("no_such_dir").join("app.log");

        let err = FileSink::new(&missing).err().expect("open must fail");
        assert!(matches!(err, LoggerError::FileSinkError { .. }));
    }
}
