//! Validation helpers for names that end up as identifiers or record keys.

mod validation;

pub use validation::{
    is_identifier_safe, sanitize_identifier, validate_field_name, validate_field_names,
    validate_unique_names, DuplicateNameError, InvalidNameError, ValidationError,
};
