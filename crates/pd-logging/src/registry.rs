//! Logger factory backed by an explicit registry.
//!
//! The registry is owned state rather than a process global: create it at
//! startup, hand it to whoever needs loggers, and call
//! [`LoggerRegistry::shutdown`] when done.

use crate::config::LogConfig;
use crate::error::{LoggingError, Result};
use crate::formatter::RedactingFormatter;
use crate::logger::Logger;
use crate::sink::{LogSink, WriterSink};
use pd_redact::{RedactionConfig, RedactionRule};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Name-keyed set of loggers sharing one log and redaction config.
#[derive(Debug, Default)]
pub struct LoggerRegistry {
    config: LogConfig,
    redaction: RedactionConfig,
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
}

impl LoggerRegistry {
    /// Create an empty registry.
    ///
    /// `redaction` supplies the mask, the separator and the default field set.
    pub fn new(config: LogConfig, redaction: RedactionConfig) -> Self {
        LoggerRegistry {
            config,
            redaction,
            loggers: Mutex::new(HashMap::new()),
        }
    }

    /// Get or create the logger `name`, writing to stderr.
    pub fn create_logger<S: AsRef<str>>(&self, name: &str, fields: &[S]) -> Result<Arc<Logger>> {
        self.create_logger_with_sink(name, fields, Arc::new(WriterSink::stderr()))
    }

    /// Get or create the logger `name` masking the configured default fields.
    pub fn create_default_logger(&self, name: &str) -> Result<Arc<Logger>> {
        let fields = self.redaction.sensitive_fields.clone();
        self.create_logger(name, &fields)
    }

    /// Get or create the logger `name` with an explicit sink.
    ///
    /// If `name` is already registered the existing logger is returned and
    /// `fields` and `sink` are ignored, so repeated calls never attach a
    /// second sink. Registration holds the registry lock throughout.
    pub fn create_logger_with_sink<S: AsRef<str>>(
        &self,
        name: &str,
        fields: &[S],
        sink: Arc<dyn LogSink>,
    ) -> Result<Arc<Logger>> {
        let mut loggers = self.lock();

        if let Some(existing) = loggers.get(name) {
            tracing::debug!(logger = name, "logger already registered");
            return Ok(Arc::clone(existing));
        }

        let rule = RedactionRule::new(
            fields.iter().map(|f| f.as_ref()),
            &self.redaction.mask_token,
            &self.redaction.separator,
        )?;
        let formatter = RedactingFormatter::new(rule)
            .with_format(self.config.format)
            .with_tag(&self.config.tag);

        let logger = Arc::new(Logger::new(name, self.config.level, formatter, sink));
        loggers.insert(name.to_string(), Arc::clone(&logger));

        tracing::debug!(
            logger = name,
            fields = fields.len(),
            level = %self.config.level,
            "registered logger"
        );
        Ok(logger)
    }

    /// Look up a registered logger.
    pub fn get(&self, name: &str) -> Option<Arc<Logger>> {
        self.lock().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Unregister `name`. Handles already given out keep working.
    pub fn remove(&self, name: &str) -> Option<Arc<Logger>> {
        self.lock().remove(name)
    }

    /// Flush every logger and empty the registry.
    ///
    /// All loggers are flushed even if one fails; the first error is returned.
    pub fn shutdown(&self) -> Result<()> {
        let drained: Vec<Arc<Logger>> = self.lock().drain().map(|(_, l)| l).collect();
        let mut first_err: Option<LoggingError> = None;

        for logger in &drained {
            if let Err(e) = logger.flush() {
                tracing::warn!(logger = logger.name(), error = %e, "flush failed at shutdown");
                first_err.get_or_insert(e);
            }
        }

        tracing::debug!(loggers = drained.len(), "logger registry shut down");
        first_err.map_or(Ok(()), Err)
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    pub fn redaction(&self) -> &RedactionConfig {
        &self.redaction
    }

    // The map stays consistent across a panic: every mutation is one call.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<Logger>>> {
        self.loggers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use crate::sink::MemorySink;
    use pd_redact::PII_FIELDS;

    #[test]
    fn test_create_is_idempotent() {
        let registry = LoggerRegistry::default();
        let sink = MemorySink::new();

        let a = registry
            .create_logger_with_sink("user_data", &PII_FIELDS, Arc::new(sink.clone()))
            .unwrap();
        let b = registry
            .create_logger_with_sink("user_data", &PII_FIELDS, Arc::new(sink.clone()))
            .unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 1);

        b.info("name=Bob;").unwrap();
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_second_call_keeps_first_sink() {
        let registry = LoggerRegistry::default();
        let first = MemorySink::new();
        let second = MemorySink::new();

        registry
            .create_logger_with_sink("audit", &["ssn"], Arc::new(first.clone()))
            .unwrap();
        let logger = registry
            .create_logger_with_sink("audit", &["email"], Arc::new(second.clone()))
            .unwrap();

        logger.info("ssn=1;email=e;").unwrap();
        assert!(second.is_empty());
        assert_eq!(first.len(), 1);
        assert!(first.lines()[0].ends_with("ssn=***;email=e;"));
    }

    #[test]
    fn test_distinct_names_distinct_loggers() {
        let registry = LoggerRegistry::default();
        registry
            .create_logger_with_sink("a", &PII_FIELDS, Arc::new(MemorySink::new()))
            .unwrap();
        registry
            .create_logger_with_sink("b", &PII_FIELDS, Arc::new(MemorySink::new()))
            .unwrap();
        assert_eq!(registry.names(), vec!["a", "b"]);
        assert!(registry.contains("a"));
        assert!(registry.get("c").is_none());
    }

    #[test]
    fn test_invalid_fields_not_registered() {
        let registry = LoggerRegistry::default();
        let err = registry
            .create_logger_with_sink("bad", &["na=me"], Arc::new(MemorySink::new()))
            .unwrap_err();
        assert!(matches!(err, LoggingError::Redaction(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_invalid_separator_propagates() {
        let registry = LoggerRegistry::new(
            LogConfig::default(),
            RedactionConfig::default().with_separator(""),
        );
        assert!(registry.create_default_logger("user_data").is_err());
    }

    #[test]
    fn test_threshold_from_config() {
        let registry = LoggerRegistry::new(
            LogConfig::default().with_level(LogLevel::Warn),
            RedactionConfig::default(),
        );
        let logger = registry.create_default_logger("quiet").unwrap();
        assert_eq!(logger.threshold(), LogLevel::Warn);
    }

    #[test]
    fn test_default_threshold_is_info() {
        let registry = LoggerRegistry::default();
        let logger = registry
            .create_logger_with_sink("user_data", &PII_FIELDS, Arc::new(MemorySink::new()))
            .unwrap();
        assert_eq!(logger.threshold(), LogLevel::Info);
    }

    #[test]
    fn test_remove_and_shutdown() {
        let registry = LoggerRegistry::default();
        registry
            .create_logger_with_sink("a", &PII_FIELDS, Arc::new(MemorySink::new()))
            .unwrap();
        registry
            .create_logger_with_sink("b", &PII_FIELDS, Arc::new(MemorySink::new()))
            .unwrap();

        assert!(registry.remove("a").is_some());
        assert!(registry.remove("a").is_none());

        registry.shutdown().unwrap();
        assert!(registry.is_empty());
    }
}
