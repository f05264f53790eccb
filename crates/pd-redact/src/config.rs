//! Redaction configuration.
//!
//! Supports configuration via:
//! - JSON files (missing keys take their defaults)
//! - Environment variables (PD_SENSITIVE_FIELDS, PD_MASK_TOKEN, PD_SEPARATOR)

use crate::error::Result;
use crate::rule::{validate, RedactionRule};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fields treated as PII when nothing else is configured.
pub const PII_FIELDS: [&str; 5] = ["name", "email", "phone", "ssn", "password"];

/// Default mask written in place of a sensitive value.
pub const DEFAULT_MASK_TOKEN: &str = "***";

/// Default segment separator.
pub const DEFAULT_SEPARATOR: &str = ";";

/// Redaction settings recognised by the logger factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionConfig {
    /// Ordered, unique field names whose values are masked.
    #[serde(default = "default_sensitive_fields")]
    pub sensitive_fields: Vec<String>,

    /// Replacement for every sensitive value.
    #[serde(default = "default_mask_token")]
    pub mask_token: String,

    /// Separator terminating each `key=value` segment.
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_sensitive_fields() -> Vec<String> {
    PII_FIELDS.iter().map(|f| f.to_string()).collect()
}

fn default_mask_token() -> String {
    DEFAULT_MASK_TOKEN.to_string()
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            sensitive_fields: default_sensitive_fields(),
            mask_token: default_mask_token(),
            separator: default_separator(),
        }
    }
}

impl RedactionConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: RedactionConfig = serde_json::from_str(&content)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            fields = config.sensitive_fields.len(),
            "loaded redaction config"
        );
        Ok(config)
    }

    /// Save config to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Defaults overridden by environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Apply environment overrides on top of this config.
    ///
    /// `PD_SENSITIVE_FIELDS` is a comma separated list; blank entries are dropped.
    pub fn with_env(mut self) -> Self {
        if let Ok(val) = std::env::var("PD_SENSITIVE_FIELDS") {
            self.sensitive_fields = parse_field_list(&val);
        }
        if let Ok(val) = std::env::var("PD_MASK_TOKEN") {
            self.mask_token = val;
        }
        if let Ok(val) = std::env::var("PD_SEPARATOR") {
            self.separator = val;
        }
        self
    }

    /// Replace the sensitive field set.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sensitive_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the mask token.
    pub fn with_mask_token(mut self, mask: &str) -> Self {
        self.mask_token = mask.to_string();
        self
    }

    /// Set the separator.
    pub fn with_separator(mut self, separator: &str) -> Self {
        self.separator = separator.to_string();
        self
    }

    /// Check the config without compiling patterns.
    pub fn validate(&self) -> Result<()> {
        validate(&self.sensitive_fields, &self.mask_token, &self.separator)
    }

    /// Compile the config into a rule.
    pub fn build_rule(&self) -> Result<RedactionRule> {
        RedactionRule::new(
            self.sensitive_fields.iter().cloned(),
            &self.mask_token,
            &self.separator,
        )
    }
}

fn parse_field_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RedactionError;

    #[test]
    fn test_default_config() {
        let config = RedactionConfig::default();
        assert_eq!(
            config.sensitive_fields,
            vec!["name", "email", "phone", "ssn", "password"]
        );
        assert_eq!(config.mask_token, "***");
        assert_eq!(config.separator, ";");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config: RedactionConfig = serde_json::from_str(r#"{"mask_token": "xxx"}"#).unwrap();
        assert_eq!(config.mask_token, "xxx");
        assert_eq!(config.separator, ";");
        assert_eq!(config.sensitive_fields.len(), 5);
    }

    #[test]
    fn test_builder() {
        let config = RedactionConfig::new()
            .with_fields(["card"])
            .with_mask_token("[REDACTED]")
            .with_separator("|");
        let rule = config.build_rule().unwrap();
        assert_eq!(rule.redact("card=4111|id=2|"), "card=[REDACTED]|id=2|");
    }

    #[test]
    fn test_validate_rejects_empty_separator() {
        let config = RedactionConfig::new().with_separator("");
        assert!(matches!(
            config.validate(),
            Err(RedactionError::Configuration(_))
        ));
        assert!(config.build_rule().is_err());
    }

    #[test]
    fn test_parse_field_list() {
        assert_eq!(parse_field_list("name, ssn,,email "), vec!["name", "ssn", "email"]);
        assert!(parse_field_list("").is_empty());
    }

    #[test]
    fn test_config_serialization() {
        let config = RedactionConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: RedactionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
