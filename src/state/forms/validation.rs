//! Field validation rules
//!
//! Pure functions over a field's current value and its static constraint.
//! Cross-field rules live with the form that owns both fields.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;
use url::Url;

/// Minimum digit count for a phone number
pub const PHONE_MIN_DIGITS: usize = 7;

/// Maximum digit count for a phone number (E.164 upper bound)
pub const PHONE_MAX_DIGITS: usize = 15;

/// Simple `text@text.text` shape
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex pattern for email")
});

/// Field value formats checked after the required and length rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    Email,
    Phone,
    Url,
}

/// Static validation configuration for one field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldConstraint {
    /// Advisory only, never blocks submission
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub required: bool,
    pub format: Option<FieldFormat>,
}

impl FieldConstraint {
    /// A required field with a maximum length
    pub const fn required(max_length: usize) -> Self {
        Self {
            min_length: None,
            max_length: Some(max_length),
            required: true,
            format: None,
        }
    }

    /// An optional field with a maximum length
    pub const fn optional(max_length: usize) -> Self {
        Self {
            min_length: None,
            max_length: Some(max_length),
            required: false,
            format: None,
        }
    }

    pub const fn with_format(mut self, format: FieldFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub const fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }
}

/// A blocking validation failure. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Required")]
    Required,
    #[error("Max {max} characters")]
    TooLong { max: usize },
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Invalid phone number")]
    InvalidPhone,
    #[error("Invalid URL")]
    InvalidUrl,
    #[error("Emails must match")]
    EmailMismatch,
    #[error("Provide a LinkedIn URL or upload a file")]
    LinkedInOrResume,
    #[error("Please select a vacancy")]
    NoVacancy,
    #[error("Please select a valid vacancy")]
    UnknownVacancy,
}

/// Field name to error message; an empty message means the field is valid
pub type ValidationResult = BTreeMap<&'static str, String>;

/// Check a value against the required, length and format rules, in that order.
pub fn check_field(value: &str, constraint: &FieldConstraint) -> Option<FieldError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return constraint.required.then_some(FieldError::Required);
    }

    if let Some(max) = constraint.max_length {
        if trimmed.chars().count() > max {
            return Some(FieldError::TooLong { max });
        }
    }

    match constraint.format {
        Some(FieldFormat::Email) if !is_valid_email(trimmed) => Some(FieldError::InvalidEmail),
        Some(FieldFormat::Phone) if !is_valid_phone(trimmed) => Some(FieldError::InvalidPhone),
        Some(FieldFormat::Url) if !is_valid_url(trimmed) => Some(FieldError::InvalidUrl),
        _ => None,
    }
}

/// Non-blocking hint for values shorter than the configured minimum
pub fn advisory(value: &str, constraint: &FieldConstraint) -> Option<String> {
    let min = constraint.min_length?;
    let len = value.trim().chars().count();
    (len > 0 && len < min).then(|| format!("At least {min} characters recommended"))
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value.trim())
}

/// Only the digit count matters; separators, spaces and parentheses are ignored.
pub fn is_valid_phone(value: &str) -> bool {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits)
}

/// Absolute http(s) URL with a host
pub fn is_valid_url(value: &str) -> bool {
    match Url::parse(value.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}
