// Built-in validators

use crate::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;

static CONTROL_CHARS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").unwrap());

// String validators

/// Validates that a string is not empty
pub struct NotEmpty;

impl NotEmpty {
    pub fn validate(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            Err(
                ValidationError::new(field, format!("{} should not be empty", field))
                    .with_constraint("notEmpty"),
            )
        } else {
            Ok(())
        }
    }
}

/// Validates minimum string length, in characters
pub struct MinLength(pub usize);

impl MinLength {
    pub fn validate(&self, value: &str, field: &str) -> Result<(), ValidationError> {
        if value.chars().count() < self.0 {
            Err(ValidationError::new(
                field,
                format!("{} must be at least {} characters", field, self.0),
            )
            .with_constraint("minLength")
            .with_value(value))
        } else {
            Ok(())
        }
    }
}

/// Validates maximum string length, in characters
pub struct MaxLength(pub usize);

impl MaxLength {
    pub fn validate(&self, value: &str, field: &str) -> Result<(), ValidationError> {
        if value.chars().count() > self.0 {
            Err(ValidationError::new(
                field,
                format!("{} must be at most {} characters", field, self.0),
            )
            .with_constraint("maxLength")
            .with_value(value))
        } else {
            Ok(())
        }
    }
}

/// Rejects ASCII control characters other than tab and line breaks
pub struct NoControlChars;

impl NoControlChars {
    pub fn validate(value: &str, field: &str) -> Result<(), ValidationError> {
        if CONTROL_CHARS_REGEX.is_match(value) {
            Err(ValidationError::new(
                field,
                format!("{} must not contain control characters", field),
            )
            .with_constraint("noControlChars"))
        } else {
            Ok(())
        }
    }
}

/// Validates against a custom regex
pub struct Matches(pub Regex);

impl Matches {
    pub fn validate(&self, value: &str, field: &str) -> Result<(), ValidationError> {
        if self.0.is_match(value) {
            Ok(())
        } else {
            Err(
                ValidationError::new(field, format!("{} has an invalid format", field))
                    .with_constraint("matches")
                    .with_value(value),
            )
        }
    }
}

// Number validators

/// Validates minimum value
pub struct Min(pub f64);

impl Min {
    pub fn validate(&self, value: f64, field: &str) -> Result<(), ValidationError> {
        if value < self.0 {
            Err(
                ValidationError::new(field, format!("{} must be at least {}", field, self.0))
                    .with_constraint("min")
                    .with_value(value.to_string()),
            )
        } else {
            Ok(())
        }
    }
}

/// Validates maximum value
pub struct Max(pub f64);

impl Max {
    pub fn validate(&self, value: f64, field: &str) -> Result<(), ValidationError> {
        if value > self.0 {
            Err(
                ValidationError::new(field, format!("{} must be at most {}", field, self.0))
                    .with_constraint("max")
                    .with_value(value.to_string()),
            )
        } else {
            Ok(())
        }
    }
}

/// Validates that a number has no fractional part
pub struct IsInteger;

impl IsInteger {
    pub fn validate(value: f64, field: &str) -> Result<(), ValidationError> {
        if value.fract() == 0.0 {
            Ok(())
        } else {
            Err(
                ValidationError::new(field, format!("{} must be a whole number", field))
                    .with_constraint("isInteger")
                    .with_value(value.to_string()),
            )
        }
    }
}

// Coercion

/// Text to number coercion.
///
/// Total: every input either yields a finite `f64` or an error. Surrounding
/// whitespace is ignored; empty input, `NaN` and infinities are rejected.
pub struct CoerceNumber;

impl CoerceNumber {
    pub fn parse(value: &str) -> Option<f64> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
    }

    pub fn coerce(value: &str, field: &str, message: &str) -> Result<f64, ValidationError> {
        Self::parse(value).ok_or_else(|| {
            ValidationError::new(field, message)
                .with_constraint("number")
                .with_value(value)
        })
    }
}
