//! Append-only file sink
//!
//! Lines are appended to a single file. Rotation and retention are left to an
//! external writer (logrotate, a timer-driven rotating writer wrapped in a
//! custom [`Sink`], ...).

use crate::core::{LoggerError, Result, Sink};
use std::fs::{self, File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};

pub struct FileSink {
    path: PathBuf,
    writer: Option<LineWriter<File>>,
}

impl FileSink {
    /// Open `path` for appending, creating missing parent directories
    ///
    /// # Errors
    ///
    /// Returns error if the directory or the file cannot be created or opened
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "open log file",
                    format!("Failed to open '{}'", path.display()),
                    e,
                )
            })?;

        Ok(Self {
            path,
            writer: Some(LineWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;

        writer
            .write_all(line.as_bytes())
            .and_then(|()| writer.write_all(b"\n"))
            .map_err(|e| LoggerError::sink(self.path.display().to_string(), e.to_string()))
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
