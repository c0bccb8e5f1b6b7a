//! Validation utilities for field names.
//!
//! Field names become record keys and CSV headers in generated scripts, so
//! they are restricted to `[A-Za-z0-9_]+`.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

#[allow(clippy::expect_used)]
fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("identifier pattern compiles"))
}

#[allow(clippy::expect_used)]
fn unsafe_run_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^A-Za-z0-9_]+").expect("unsafe-run pattern compiles"))
}

/// Whether `name` is a non-empty run of `[A-Za-z0-9_]`.
#[must_use]
pub fn is_identifier_safe(name: &str) -> bool {
    identifier_pattern().is_match(name)
}

/// Rewrites arbitrary text into an identifier-safe name.
///
/// Runs of unsupported characters collapse into a single `_`; leading and
/// trailing underscores are dropped. Falls back to `fallback` when nothing
/// usable remains.
#[must_use]
pub fn sanitize_identifier(raw: &str, fallback: &str) -> String {
    let replaced = unsafe_run_pattern().replace_all(raw.trim(), "_");
    let trimmed = replaced.trim_matches('_');
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Validates a single field name.
pub fn validate_field_name(name: &str) -> Result<(), InvalidNameError> {
    if name.trim().is_empty() {
        return Err(InvalidNameError {
            name: name.to_string(),
            reason: "Field name cannot be empty or whitespace-only".to_string(),
        });
    }
    if !is_identifier_safe(name) {
        return Err(InvalidNameError {
            name: name.to_string(),
            reason: "Field name may only contain letters, digits and underscores".to_string(),
        });
    }
    Ok(())
}

/// Error indicating an invalid name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidNameError {
    /// The rejected name.
    pub name: String,
    /// The reason the name is invalid.
    pub reason: String,
}

impl std::fmt::Display for InvalidNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid name '{}': {}", self.name, self.reason)
    }
}

impl std::error::Error for InvalidNameError {}

/// Validates that no name appears twice.
pub fn validate_unique_names<S: AsRef<str>>(names: &[S]) -> Result<(), DuplicateNameError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_ref()) {
            return Err(DuplicateNameError {
                name: name.as_ref().to_string(),
            });
        }
    }
    Ok(())
}

/// Validates every name, then their uniqueness.
pub fn validate_field_names<S: AsRef<str>>(names: &[S]) -> Result<(), ValidationError> {
    for name in names {
        validate_field_name(name.as_ref())?;
    }
    validate_unique_names(names)?;
    Ok(())
}

/// Error indicating two fields share a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateNameError {
    /// The repeated name.
    pub name: String,
}

impl std::fmt::Display for DuplicateNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field name '{}' is used more than once", self.name)
    }
}

impl std::error::Error for DuplicateNameError {}

/// Combined validation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A name failed the identifier rule.
    InvalidName(InvalidNameError),
    /// A name was repeated.
    DuplicateName(DuplicateNameError),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(e) => write!(f, "{e}"),
            Self::DuplicateName(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<InvalidNameError> for ValidationError {
    fn from(e: InvalidNameError) -> Self {
        Self::InvalidName(e)
    }
}

impl From<DuplicateNameError> for ValidationError {
    fn from(e: DuplicateNameError) -> Self {
        Self::DuplicateName(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_safe() {
        assert!(is_identifier_safe("title"));
        assert!(is_identifier_safe("price_2"));
        assert!(!is_identifier_safe(""));
        assert!(!is_identifier_safe("unit price"));
        assert!(!is_identifier_safe("naïve"));
    }

    #[test]
    fn test_sanitize_identifier() {
        assert_eq!(sanitize_identifier("Product Title", "field"), "Product_Title");
        assert_eq!(sanitize_identifier("  price ($) ", "field"), "price");
        assert_eq!(sanitize_identifier("***", "field_1"), "field_1");
    }

    #[test]
    fn test_validate_field_name() {
        assert!(validate_field_name("rating").is_ok());
        let err = validate_field_name("   ").unwrap_err();
        assert!(err.reason.contains("empty"));
        assert!(validate_field_name("a-b").is_err());
    }

    #[test]
    fn test_validate_unique_names() {
        assert!(validate_unique_names(&["a", "b"]).is_ok());
        let err = validate_unique_names(&["a", "b", "a"]).unwrap_err();
        assert_eq!(err.name, "a");
        let combined: ValidationError = err.into();
        assert_eq!(combined.to_string(), "Field name 'a' is used more than once");
    }

    #[test]
    fn test_validate_field_names_checks_identifiers_first() {
        assert!(validate_field_names(&["title", "price"]).is_ok());
        assert!(matches!(
            validate_field_names(&["bad name", "bad name"]),
            Err(ValidationError::InvalidName(_))
        ));
        assert!(matches!(
            validate_field_names(&["a", "a"]),
            Err(ValidationError::DuplicateName(_))
        ));
    }
}
