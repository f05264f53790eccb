//! Named loggers.

use crate::config::LogLevel;
use crate::error::{LoggingError, Result};
use crate::formatter::RedactingFormatter;
use crate::record::{Level, LogRecord};
use crate::sink::LogSink;
use std::fmt;
use std::sync::Arc;

/// A named logger with one redacting formatter and one sink.
///
/// Records go only to this logger's sink. Nothing is forwarded to the
/// global `tracing` dispatcher, so no other subscriber sees unredacted text.
pub struct Logger {
    name: String,
    threshold: LogLevel,
    formatter: RedactingFormatter,
    sink: Arc<dyn LogSink>,
}

impl Logger {
    pub(crate) fn new(
        name: &str,
        threshold: LogLevel,
        formatter: RedactingFormatter,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        Logger {
            name: name.to_string(),
            threshold,
            formatter,
            sink,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Minimum level written by this logger.
    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }

    pub fn formatter(&self) -> &RedactingFormatter {
        &self.formatter
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        self.threshold.allows(level)
    }

    /// Format `message` at `level` and write it to the sink.
    ///
    /// Records below the threshold are dropped without error.
    pub fn log(&self, level: Level, message: &str) -> Result<()> {
        if !self.is_enabled(level) {
            return Ok(());
        }
        let record = LogRecord::new(&self.name, level, message);
        let line = self.formatter.format(&record);
        self.sink.write_line(&line).map_err(LoggingError::Sink)
    }

    pub fn debug(&self, message: &str) -> Result<()> {
        self.log(Level::Debug, message)
    }

    pub fn info(&self, message: &str) -> Result<()> {
        self.log(Level::Info, message)
    }

    pub fn warn(&self, message: &str) -> Result<()> {
        self.log(Level::Warn, message)
    }

    pub fn error(&self, message: &str) -> Result<()> {
        self.log(Level::Error, message)
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.flush().map_err(LoggingError::Sink)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("threshold", &self.threshold)
            .field("formatter", &self.formatter)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use pd_redact::RedactionConfig;

    fn logger(threshold: LogLevel) -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let formatter = RedactingFormatter::new(RedactionConfig::default().build_rule().unwrap());
        let logger = Logger::new("user_data", threshold, formatter, Arc::new(sink.clone()));
        (logger, sink)
    }

    #[test]
    fn test_info_is_redacted() {
        let (logger, sink) = logger(LogLevel::Info);
        logger.info("name=Bob;ssn=000-00-0000;id=9;").unwrap();

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with(": name=***;ssn=***;id=9;"));
        assert!(lines[0].contains(" user_data INFO "));
    }

    #[test]
    fn test_threshold_drops_debug() {
        let (logger, sink) = logger(LogLevel::Info);
        assert!(!logger.is_enabled(Level::Debug));
        logger.debug("id=1;").unwrap();
        assert!(sink.is_empty());

        logger.warn("id=2;").unwrap();
        logger.error("id=3;").unwrap();
        assert_eq!(sink.len(), 2);
        assert!(sink.lines()[0].contains(" WARN "));
        assert!(sink.lines()[1].contains(" ERROR "));
    }

    #[test]
    fn test_off_writes_nothing() {
        let (logger, sink) = logger(LogLevel::Off);
        logger.error("id=1;").unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_debug_output_shows_name_and_threshold() {
        let (logger, _sink) = logger(LogLevel::Info);
        let dbg = format!("{:?}", logger);
        assert!(dbg.contains("user_data"));
        assert!(dbg.contains("Info"));
    }
}
