//! Output sinks for rendered, redacted lines.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Destination for finished log lines.
pub trait LogSink: Send + Sync {
    /// Write one line; the sink appends the line terminator.
    fn write_line(&self, line: &str) -> io::Result<()>;

    /// Flush buffered output.
    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Sink backed by any [`Write`] implementation.
pub struct WriterSink<W = io::Stderr> {
    writer: Mutex<W>,
}

impl WriterSink<io::Stderr> {
    /// Sink writing to stderr.
    pub fn stderr() -> Self {
        WriterSink {
            writer: Mutex::new(io::stderr()),
        }
    }
}

impl<W: Write + Send> WriterSink<W> {
    /// Sink with a custom writer.
    pub fn new(writer: W) -> Self {
        WriterSink {
            writer: Mutex::new(writer),
        }
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> LogSink for WriterSink<W> {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::other("sink writer lock poisoned"))?;
        writeln!(writer, "{}", line)
    }

    fn flush(&self) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::other("sink writer lock poisoned"))?;
        writer.flush()
    }
}

/// In-memory sink; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
        Ok(())
    }
}
