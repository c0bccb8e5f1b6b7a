//! Error types for scrapesmith.
//!
//! The core operations (`compile`, `test_selector`, the link harvesters and
//! `synthesize`) never surface these to their callers: they fold them into
//! sentinel selectors, error-flagged results or guidance comments. The
//! configuration layer returns them directly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// The main error type for scrapesmith operations.
#[derive(Debug, Error)]
pub enum ScrapesmithError {
    /// A configuration value is out of range or inconsistent.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// A CSS selector was rejected by the document engine.
    #[error("{0}")]
    Selector(#[from] SelectorError),

    /// An attrs descriptor could not be tokenized.
    #[error("{0}")]
    AttrsSyntax(#[from] AttrsSyntaxError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ScrapesmithError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Error raised when a configuration fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ConfigError {
    /// The error message.
    pub message: String,
    /// Dotted path of the offending field, if known.
    pub field: Option<String>,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }

    /// Sets the offending field.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("message".to_string(), serde_json::Value::String(self.message.clone()));
        if let Some(ref field) = self.field {
            map.insert("field".to_string(), serde_json::Value::String(field.clone()));
        }
        map
    }
}

/// Error raised when the document engine rejects a selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid selector '{selector}': {message}")]
pub struct SelectorError {
    /// The selector text that failed to parse.
    pub selector: String,
    /// Parser message.
    pub message: String,
}

impl SelectorError {
    /// Creates a new selector error.
    #[must_use]
    pub fn new(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            message: message.into(),
        }
    }
}

/// Tokenizer failures of the `key=value` attrs micro-language.
///
/// Offsets are byte positions into the attrs string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttrsSyntaxError {
    /// A key was not followed by `=`.
    #[error("expected '=' after key '{key}' at offset {offset}")]
    MissingEquals {
        /// The key that lacks a value.
        key: String,
        /// Where `=` was expected.
        offset: usize,
    },

    /// A quoted value never closes.
    #[error("unterminated {quote} quote starting at offset {offset}")]
    UnterminatedQuote {
        /// The opening quote character.
        quote: char,
        /// Offset of the opening quote.
        offset: usize,
    },

    /// A character that cannot start or continue a key.
    #[error("unexpected character '{found}' at offset {offset}")]
    UnexpectedChar {
        /// The offending character.
        found: char,
        /// Its offset.
        offset: usize,
    },

    /// `=` with nothing before it.
    #[error("missing key before '=' at offset {offset}")]
    EmptyKey {
        /// Offset of the `=`.
        offset: usize,
    },

    /// A key whose value yields nothing to emit where something is required.
    #[error("empty value for key '{key}'")]
    EmptyValue {
        /// The key with the empty value.
        key: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_to_dict() {
        let err = ConfigError::new("page_count must be at least 1").with_field("pagination.page_count");
        let dict = err.to_dict();
        assert_eq!(
            dict.get("field"),
            Some(&serde_json::json!("pagination.page_count"))
        );
        assert_eq!(err.to_string(), "page_count must be at least 1");
    }

    #[test]
    fn test_from_conversions() {
        let err: ScrapesmithError = SelectorError::new("div[", "unexpected end").into();
        assert!(matches!(err, ScrapesmithError::Selector(_)));
        assert_eq!(err.to_string(), "Invalid selector 'div[': unexpected end");

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ScrapesmithError = json_err.into();
        assert!(err.to_string().starts_with("Serialization error:"));
    }

    #[test]
    fn test_attrs_syntax_messages() {
        let err = AttrsSyntaxError::UnterminatedQuote { quote: '"', offset: 6 };
        assert_eq!(err.to_string(), "unterminated \" quote starting at offset 6");
    }
}
