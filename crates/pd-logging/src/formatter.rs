//! Record rendering with redaction applied to the rendered text.

use crate::config::{LogFormat, DEFAULT_TAG};
use crate::record::LogRecord;
use pd_redact::RedactionRule;

/// Timestamp layout for text lines, millisecond precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Renders records and masks sensitive fields in the result.
///
/// The rule is fixed at construction; a formatter never writes anywhere.
#[derive(Debug, Clone)]
pub struct RedactingFormatter {
    rule: RedactionRule,
    format: LogFormat,
    tag: String,
}

impl RedactingFormatter {
    /// Text formatter with the default tag.
    pub fn new(rule: RedactionRule) -> Self {
        RedactingFormatter {
            rule,
            format: LogFormat::Text,
            tag: DEFAULT_TAG.to_string(),
        }
    }

    /// Set the output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the tag at the head of text lines.
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = tag.to_string();
        self
    }

    /// Render `record` and return the redacted line.
    pub fn format(&self, record: &LogRecord) -> String {
        match self.format {
            LogFormat::Text => self.rule.redact(&self.render_text(record)),
            LogFormat::Jsonl => {
                // Redact before encoding so JSON escaping cannot hide a separator.
                let obj = serde_json::json!({
                    "ts": record.timestamp.to_rfc3339(),
                    "level": record.level,
                    "logger": record.name,
                    "message": self.rule.redact(&record.message),
                });
                obj.to_string()
            }
        }
    }

    fn render_text(&self, record: &LogRecord) -> String {
        format!(
            "[{}] {} {} {}: {}",
            self.tag,
            record.name,
            record.level,
            record.timestamp.format(TIMESTAMP_FORMAT),
            record.message
        )
    }

    /// The rule applied to every rendered line.
    pub fn rule(&self) -> &RedactionRule {
        &self.rule
    }

    /// The output format.
    pub fn output_format(&self) -> LogFormat {
        self.format
    }
}
