// Validation errors

use std::collections::BTreeMap;
use std::fmt;

/// Validation error for a single field
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Field name that failed validation
    pub field: String,

    /// Error message
    pub message: String,

    /// Validation constraint that failed
    pub constraint: String,

    /// Value that failed validation (optional)
    pub value: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            constraint: "custom".to_string(),
            value: None,
        }
    }

    /// A required field was absent.
    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, "Required").with_constraint("required")
    }

    /// Set the constraint name
    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = constraint.into();
        self
    }

    /// Set the invalid value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create a new validation errors collection
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Add an error
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Get errors for a specific field
    pub fn get_field_errors(&self, field: &str) -> Vec<&ValidationError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    /// Field name to the messages of every rule it violated, in check order.
    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for error in &self.errors {
            map.entry(error.field.clone())
                .or_default()
                .push(error.message.clone());
        }
        map
    }

    /// `{"errors": {"field": ["message", ...]}}`
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "errors": self.field_errors() })
    }

    /// Every error with its constraint and offending value.
    pub fn to_detailed_json(&self) -> serde_json::Value {
        serde_json::json!({
            "errors": self.errors.iter().map(|e| {
                serde_json::json!({
                    "field": e.field,
                    "message": e.message,
                    "constraint": e.constraint,
                    "value": e.value,
                })
            }).collect::<Vec<_>>()
        })
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::new(errors)
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self::new(vec![error])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_groups_by_field() {
        let errors = ValidationErrors::new(vec![
            ValidationError::required("name"),
            ValidationError::new("age", "Invalid age").with_value("abc"),
            ValidationError::new("age", "age must be at least 0"),
        ]);

        let map = errors.field_errors();
        assert_eq!(map["name"], vec!["Required"]);
        assert_eq!(map["age"], vec!["Invalid age", "age must be at least 0"]);
        assert_eq!(errors.get_field_errors("age").len(), 2);
    }

    #[test]
    fn test_to_json() {
        let errors = ValidationErrors::from(ValidationError::new("age", "Invalid age"));
        assert_eq!(
            errors.to_json(),
            serde_json::json!({ "errors": { "age": ["Invalid age"] } })
        );
        assert_eq!(
            errors.to_detailed_json()["errors"][0]["constraint"],
            "custom"
        );
    }

    #[test]
    fn test_display() {
        let errors = ValidationErrors::new(vec![
            ValidationError::required("name"),
            ValidationError::required("age"),
        ]);
        assert_eq!(errors.to_string(), "name: Required; age: Required");
    }
}
