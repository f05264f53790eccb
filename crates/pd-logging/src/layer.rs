//! tracing layer that sends events through the redacting formatter.
//!
//! Event fields other than `message` are appended to the message as
//! `key=value<separator>` segments, so field names in the rule's sensitive
//! set are masked like any other segment.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use crate::formatter::RedactingFormatter;
use crate::record::{Level, LogRecord};

/// Collects the message and the remaining fields of an event.
struct MessageVisitor<'a> {
    separator: &'a str,
    message: String,
    fields: String,
}

impl<'a> MessageVisitor<'a> {
    fn new(separator: &'a str) -> Self {
        MessageVisitor {
            separator,
            message: String::new(),
            fields: String::new(),
        }
    }

    fn push_field(&mut self, name: &str, value: &dyn std::fmt::Display) {
        let _ = write!(self.fields, " {}={}{}", name, value, self.separator);
    }

    fn into_message(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.trim_start().to_string()
        } else {
            self.message + &self.fields
        }
    }
}

impl Visit for MessageVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), &value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.push_field(field.name(), &format_args!("{:?}", value));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push_field(field.name(), &value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push_field(field.name(), &value);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push_field(field.name(), &value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push_field(field.name(), &value);
    }
}

/// Layer writing one redacted line per event.
///
/// The event target is used as the logger name.
pub struct RedactingLayer<W = io::Stderr> {
    formatter: RedactingFormatter,
    writer: Mutex<W>,
}

impl RedactingLayer<io::Stderr> {
    /// Create a layer writing to stderr.
    pub fn stderr(formatter: RedactingFormatter) -> Self {
        RedactingLayer {
            formatter,
            writer: Mutex::new(io::stderr()),
        }
    }
}

impl<W: Write> RedactingLayer<W> {
    /// Create a layer with a custom writer.
    pub fn new(formatter: RedactingFormatter, writer: W) -> Self {
        RedactingLayer {
            formatter,
            writer: Mutex::new(writer),
        }
    }
}

impl<S, W> Layer<S> for RedactingLayer<W>
where
    S: Subscriber,
    W: Write + Send + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::new(self.formatter.rule().separator());
        event.record(&mut visitor);

        let level: Level = (*event.metadata().level()).into();
        let record = LogRecord::new(event.metadata().target(), level, &visitor.into_message());
        let line = self.formatter.format(&record);

        // A writer that panicked mid-line must not silence later events.
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "{}", line);
    }
}
