//! Field-level PII redaction for delimited `key=value` log lines.
//!
//! A [`RedactionRule`] names the sensitive fields of a record, the mask that
//! replaces their values, and the separator that terminates each segment.
//! Rules are validated and compiled once, then applied to any number of
//! records without further allocation of patterns.
//!
//! # Example
//!
//! ```
//! use pd_redact::RedactionRule;
//!
//! let rule = RedactionRule::new(["email", "ssn"], "***", ";").unwrap();
//! let out = rule.redact("id=7;email=bob@example.com;ssn=000-00-0000;");
//! assert_eq!(out, "id=7;email=***;ssn=***;");
//! ```
//!
//! # Record format
//!
//! Values cannot contain the separator; there is no escaping scheme. A value
//! that does is cut at its first separator and only the leading part is
//! masked. A final field with no terminating separator is left as-is.

pub mod config;
pub mod error;
pub mod rule;

pub use config::{RedactionConfig, DEFAULT_MASK_TOKEN, DEFAULT_SEPARATOR, PII_FIELDS};
pub use error::{RedactionError, Result};
pub use rule::{filter_datum, RedactionRule};
