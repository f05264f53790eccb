//! Rendering data-source rows as delimited log lines.

use crate::error::{LoggingError, Result};
use crate::logger::Logger;
use std::fmt::Display;

/// Render ordered `(column, value)` pairs as `k1=v1; k2=v2;`.
///
/// Every segment is terminated by `separator`, so the last field is
/// redactable too. A column containing `=` or the separator, or a value
/// containing the separator, would break field boundaries and is rejected.
/// The error names the column only.
pub fn format_row<I, K, V>(columns: I, separator: &str) -> Result<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Display,
{
    let mut segments = Vec::new();
    for (column, value) in columns {
        let column = column.as_ref();
        let value = value.to_string();
        if column.is_empty()
            || column.contains('=')
            || column.contains(separator)
            || value.contains(separator)
        {
            return Err(LoggingError::MalformedRow {
                column: column.to_string(),
            });
        }
        segments.push(format!("{}={}{}", column, value, separator));
    }
    Ok(segments.join(" "))
}

/// Log every row at INFO through `logger`, returning how many were written.
///
/// Rows are rendered with the logger's own separator. Stops at the first
/// row that cannot be rendered or written.
pub fn log_rows<R, I, K, V>(rows: R, logger: &Logger) -> Result<usize>
where
    R: IntoIterator<Item = I>,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Display,
{
    let separator = logger.formatter().rule().separator();
    let mut count = 0;
    for row in rows {
        let line = format_row(row, separator)?;
        logger.info(&line)?;
        count += 1;
    }
    tracing::debug!(logger = logger.name(), rows = count, "logged rows");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_row() {
        let row = vec![("name", "Bob"), ("email", "bob@dylan.com"), ("ip", "10.0.0.1")];
        assert_eq!(
            format_row(row, ";").unwrap(),
            "name=Bob; email=bob@dylan.com; ip=10.0.0.1;"
        );
    }

    #[test]
    fn test_format_row_display_values() {
        let row = vec![("id", 7u32.to_string()), ("active", true.to_string())];
        assert_eq!(format_row(row, ";").unwrap(), "id=7; active=true;");

        let typed: Vec<(&str, f64)> = vec![("score", 0.5)];
        assert_eq!(format_row(typed, "|").unwrap(), "score=0.5|");
    }

    #[test]
    fn test_format_empty_row() {
        let row: Vec<(&str, &str)> = Vec::new();
        assert_eq!(format_row(row, ";").unwrap(), "");
    }

    #[test]
    fn test_value_with_separator_rejected() {
        let err = format_row(vec![("password", "a;b")], ";").unwrap_err();
        match err {
            LoggingError::MalformedRow { column } => assert_eq!(column, "password"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!format!("{}", format_row(vec![("password", "a;b")], ";").unwrap_err())
            .contains("a;b"));
    }

    #[test]
    fn test_bad_column_rejected() {
        assert!(format_row(vec![("a=b", "1")], ";").is_err());
        assert!(format_row(vec![("", "1")], ";").is_err());
    }
}
