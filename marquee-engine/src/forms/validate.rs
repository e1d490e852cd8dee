// Field validation

use regex::Regex;
use std::sync::OnceLock;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex compiles"))
}

/// What kind of value a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
}

/// A single-field validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidEmail,
}

impl FieldError {
    /// The inline message shown next to the field
    pub fn message(&self) -> &'static str {
        match self {
            FieldError::Required => "This field is required.",
            FieldError::InvalidEmail => "Please enter a valid email address.",
        }
    }
}

/// Validate one field value. Whitespace-only input counts as empty.
pub fn validate(kind: FieldKind, required: bool, value: &str) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return if required {
            Err(FieldError::Required)
        } else {
            Ok(())
        };
    }
    if kind == FieldKind::Email && !email_regex().is_match(value) {
        return Err(FieldError::InvalidEmail);
    }
    Ok(())
}
