//! Error types for xsdvalue
//!
//! This module defines all error types used throughout the library.
//! Every failure is reported synchronously at construction or parse time;
//! nothing is retried and nothing is downgraded to a default value.

use std::fmt;
use thiserror::Error;

/// Result type alias using xsdvalue Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for xsdvalue operations
#[derive(Error, Debug)]
pub enum Error {
    /// Lexical grammar error (input does not match the lexical production)
    #[error("grammar error: {0}")]
    Grammar(#[from] GrammarError),

    /// Range error (well-formed digits but value outside the type's domain)
    #[error("range error: {0}")]
    Range(#[from] RangeError),

    /// Internal invariant violation (must never be reachable from valid input)
    #[error("invariant violation: {0}")]
    Invariant(String),

    /// Namespace error (unknown prefix during QName expansion)
    #[error("namespace error: {0}")]
    Namespace(String),

    /// Type error (unknown built-in type name)
    #[error("type error: {0}")]
    Type(String),
}

/// Lexical grammar error with context
#[derive(Debug, Clone)]
pub struct GrammarError {
    /// Error message
    pub message: String,
    /// The offending lexical input
    pub lexical: Option<String>,
    /// The lexical production that was expected
    pub production: Option<String>,
}

impl GrammarError {
    /// Create a new grammar error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            lexical: None,
            production: None,
        }
    }

    /// Set the offending lexical input
    pub fn with_lexical(mut self, lexical: impl Into<String>) -> Self {
        self.lexical = Some(lexical.into());
        self
    }

    /// Set the expected production
    pub fn with_production(mut self, production: impl Into<String>) -> Self {
        self.production = Some(production.into());
        self
    }
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref lexical) = self.lexical {
            write!(f, " (input: '{}')", lexical)?;
        }

        if let Some(ref production) = self.production {
            write!(f, " (expected: {})", production)?;
        }

        Ok(())
    }
}

impl std::error::Error for GrammarError {}

/// Range error naming the offending field and its valid range
#[derive(Debug, Clone)]
pub struct RangeError {
    /// Name of the field that is out of range
    pub field: String,
    /// The actual value
    pub value: String,
    /// The valid range, e.g. "1 <= x <= 12"
    pub range: String,
}

impl RangeError {
    /// Create a new range error for a named field
    pub fn new(
        field: impl Into<String>,
        value: impl fmt::Display,
        range: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            value: value.to_string(),
            range: range.into(),
        }
    }
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} must be {} (actual value: {})",
            self.field, self.range, self.value
        )
    }
}

impl std::error::Error for RangeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_error_display() {
        let err = GrammarError::new("missing separator")
            .with_lexical("2024-0115")
            .with_production("YYYY-MM-DD");

        let msg = format!("{}", err);
        assert!(msg.contains("missing separator"));
        assert!(msg.contains("2024-0115"));
        assert!(msg.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_range_error_display() {
        let err = RangeError::new("month", 13, "1 <= x <= 12");

        let msg = format!("{}", err);
        assert!(msg.contains("month"));
        assert!(msg.contains("1 <= x <= 12"));
        assert!(msg.contains("13"));
    }

    #[test]
    fn test_error_conversion() {
        let gram = GrammarError::new("test");
        let err: Error = gram.into();
        assert!(matches!(err, Error::Grammar(_)));

        let range = RangeError::new("day", 32, "1 <= x <= 31");
        let err: Error = range.into();
        assert!(matches!(err, Error::Range(_)));
    }
}
