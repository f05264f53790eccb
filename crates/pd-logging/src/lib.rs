//! Named loggers whose output passes through PII redaction.
//!
//! Every line a [`Logger`] writes is rendered by a [`RedactingFormatter`],
//! which masks the values of sensitive `key=value` fields before the line
//! reaches the sink. Loggers are created through a [`LoggerRegistry`], which
//! hands out one logger per name no matter how often it is asked.
//!
//! # Usage
//!
//! ```
//! use pd_logging::{LogConfig, LoggerRegistry, MemorySink};
//! use pd_redact::{RedactionConfig, PII_FIELDS};
//! use std::sync::Arc;
//!
//! let registry = LoggerRegistry::new(LogConfig::default(), RedactionConfig::default());
//! let sink = MemorySink::new();
//! let logger = registry
//!     .create_logger_with_sink("user_data", &PII_FIELDS, Arc::new(sink.clone()))
//!     .unwrap();
//!
//! logger.info("name=Bob;ssn=000-00-0000;ip=10.0.0.1;").unwrap();
//! assert!(sink.lines()[0].ends_with("name=***;ssn=***;ip=10.0.0.1;"));
//! ```
//!
//! # Design Notes
//!
//! - Loggers never forward records to the global `tracing` dispatcher.
//! - [`init_logging`] installs a `tracing` subscriber whose output goes
//!   through the same formatter, for code that logs with `tracing` macros.
//! - Sink failures are returned to the caller; there is no fallback writer.

pub mod config;
pub mod error;
pub mod formatter;
pub mod layer;
pub mod logger;
pub mod record;
pub mod registry;
pub mod row;
pub mod sink;

pub use config::{LogConfig, LogFormat, LogLevel, DEFAULT_TAG};
pub use error::{LoggingError, Result};
pub use formatter::{RedactingFormatter, TIMESTAMP_FORMAT};
pub use layer::RedactingLayer;
pub use logger::Logger;
pub use record::{Level, LogRecord};
pub use registry::LoggerRegistry;
pub use row::{format_row, log_rows};
pub use sink::{LogSink, MemorySink, WriterSink};

use pd_redact::RedactionRule;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber that redacts with `rule`.
///
/// Output goes to stderr. `PD_LOG` may hold filter directives; `config.level`
/// is the default directive. Invalid directives are skipped. Fails if a
/// global subscriber is already set.
pub fn init_logging(config: &LogConfig, rule: RedactionRule) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(config.level).into())
        .with_env_var("PD_LOG")
        .from_env_lossy();

    let formatter = RedactingFormatter::new(rule)
        .with_format(config.format)
        .with_tag(&config.tag);

    tracing_subscriber::registry()
        .with(filter)
        .with(RedactingLayer::stderr(formatter))
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))
}
