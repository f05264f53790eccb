//! Compiled redaction rules.
//!
//! A rule holds one pattern per sensitive field. Each pattern matches
//! `<field>=<value><separator>` wherever `<field>=` occurs and captures the
//! shortest `<value>` run, which is then replaced by the mask. A key that only
//! ends in a sensitive name (`username=` for `name`) is masked too.

use crate::error::{RedactionError, Result};
use regex::Regex;
use std::borrow::Cow;
use std::fmt;

/// An immutable (fields, mask, separator) triple with precompiled patterns.
#[derive(Clone)]
pub struct RedactionRule {
    fields: Vec<String>,
    patterns: Vec<Regex>,
    mask: String,
    separator: String,
}

impl RedactionRule {
    /// Validate the configuration and compile one pattern per field.
    ///
    /// Field order is kept and determines the order of redaction passes.
    pub fn new<I, S>(fields: I, mask: &str, separator: &str) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        validate(&fields, mask, separator)?;

        let sep = regex::escape(separator);
        let patterns = fields
            .iter()
            .map(|field| {
                let pattern = format!(
                    r"{field}=(?s:(.*?)){sep}",
                    sep = sep,
                    field = regex::escape(field)
                );
                Regex::new(&pattern).map_err(|e| {
                    RedactionError::config(format!("pattern for field '{}': {}", field, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            fields = fields.len(),
            separator = %separator,
            "compiled redaction rule"
        );

        Ok(Self {
            fields,
            patterns,
            mask: mask.to_string(),
            separator: separator.to_string(),
        })
    }

    /// Replace the value of every sensitive field in `record` with the mask.
    ///
    /// Fields absent from the record are skipped. A field whose value is not
    /// followed by the separator is left untouched.
    pub fn redact(&self, record: &str) -> String {
        let mut current = Cow::Borrowed(record);
        for pattern in &self.patterns {
            if let Some(next) = mask_field(pattern, &current, &self.mask) {
                current = Cow::Owned(next);
            }
        }
        current.into_owned()
    }

    /// The sensitive field names, in pass order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The mask token.
    pub fn mask(&self) -> &str {
        &self.mask
    }

    /// The segment separator.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Returns true if the rule masks nothing.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Debug for RedactionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedactionRule")
            .field("fields", &self.fields)
            .field("mask", &self.mask)
            .field("separator", &self.separator)
            .finish()
    }
}

/// One left-to-right pass for a single field. Returns `None` if nothing matched.
fn mask_field(pattern: &Regex, record: &str, mask: &str) -> Option<String> {
    let mut out = String::with_capacity(record.len());
    let mut last = 0;
    let mut pos = 0;
    let mut matched = false;

    while let Some(caps) = pattern.captures_at(record, pos) {
        let Some(value) = caps.get(1) else { break };
        out.push_str(&record[last..value.start()]);
        out.push_str(mask);
        last = value.end();
        // The terminating separator may open the next segment.
        pos = value.end();
        matched = true;
    }

    if !matched {
        return None;
    }
    out.push_str(&record[last..]);
    Some(out)
}

/// Check that a field set, mask and separator can delimit fields unambiguously.
pub(crate) fn validate(fields: &[String], mask: &str, separator: &str) -> Result<()> {
    if separator.is_empty() {
        return Err(RedactionError::config("separator must not be empty"));
    }
    if mask.is_empty() {
        return Err(RedactionError::config("mask token must not be empty"));
    }
    if mask.contains(separator) || mask.contains('=') {
        return Err(RedactionError::config(format!(
            "mask token must not contain '=' or the separator '{}'",
            separator
        )));
    }

    for (i, field) in fields.iter().enumerate() {
        if field.is_empty() {
            return Err(RedactionError::config("field names must not be empty"));
        }
        if field.contains('=') || field.contains(separator) || field.contains(char::is_whitespace)
        {
            return Err(RedactionError::config(format!(
                "field name '{}' contains '=', whitespace or the separator",
                field
            )));
        }
        if fields[..i].contains(field) {
            return Err(RedactionError::config(format!(
                "field name '{}' is listed more than once",
                field
            )));
        }
    }

    Ok(())
}

/// Build a rule for `fields` and apply it to `message` in one call.
///
/// Prefer constructing a [`RedactionRule`] once when redacting many records.
pub fn filter_datum<S: AsRef<str>>(
    fields: &[S],
    redaction: &str,
    message: &str,
    separator: &str,
) -> Result<String> {
    let rule = RedactionRule::new(fields.iter().map(|f| f.as_ref()), redaction, separator)?;
    Ok(rule.redact(message))
}
