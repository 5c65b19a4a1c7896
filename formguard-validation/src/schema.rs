//! Declarative form schemas.
//!
//! A [`Schema`] lists the fields a submission must carry and the type each is
//! read as. [`Schema::safe_parse`] checks every declared field, coercing
//! number fields with [`CoerceNumber`], and either returns the typed values
//! or every violation found.

use crate::{CoerceNumber, ValidationError, ValidationErrors, ValidationRules};
use serde::Serialize;
use std::collections::HashMap;

/// How a raw form value is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
}

/// A field value that passed its type check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Number(_) => FieldKind::Number,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
enum Rules {
    Text(ValidationRules<str>),
    Number(ValidationRules<f64>),
}

/// One declared field.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    name: String,
    message: String,
    rules: Rules,
}

impl FieldSchema {
    /// Any string is accepted as text, including the empty string.
    pub fn text(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            message: format!("Invalid {}", name),
            rules: Rules::Text(ValidationRules::for_field(name.clone())),
            name,
        }
    }

    /// The raw value must coerce to a finite number.
    pub fn number(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            message: format!("Invalid {}", name),
            rules: Rules::Number(ValidationRules::for_field(name.clone())),
            name,
        }
    }

    /// Message reported when the value has the wrong type.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Extra rule for a text field. Ignored on number fields.
    pub fn text_rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&str, &str) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        if let Rules::Text(rules) = self.rules {
            self.rules = Rules::Text(rules.add(rule));
        }
        self
    }

    /// Extra rule for a number field. Ignored on text fields.
    pub fn number_rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(f64, &str) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        if let Rules::Number(rules) = self.rules {
            self.rules = Rules::Number(rules.add(move |value: &f64, field| rule(*value, field)));
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        match self.rules {
            Rules::Text(_) => FieldKind::Text,
            Rules::Number(_) => FieldKind::Number,
        }
    }

    fn parse(&self, raw: Option<&String>) -> Result<FieldValue, Vec<ValidationError>> {
        let Some(raw) = raw else {
            return Err(vec![ValidationError::required(&self.name)]);
        };

        match &self.rules {
            Rules::Text(rules) => {
                rules.validate(raw.as_str())?;
                Ok(FieldValue::Text(raw.clone()))
            }
            Rules::Number(rules) => {
                let number = CoerceNumber::coerce(raw, &self.name, &self.message)
                    .map_err(|e| vec![e])?;
                rules.validate(&number)?;
                Ok(FieldValue::Number(number))
            }
        }
    }
}

/// Ordered set of field declarations.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldSchema>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Shorthand for a text field with a custom type message.
    pub fn text(self, name: impl Into<String>, message: impl Into<String>) -> Self {
        self.field(FieldSchema::text(name).with_message(message))
    }

    /// Shorthand for a number field with a custom type message.
    pub fn number(self, name: impl Into<String>, message: impl Into<String>) -> Self {
        self.field(FieldSchema::number(name).with_message(message))
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(FieldSchema::name).collect()
    }

    /// Check every declared field of `raw`.
    ///
    /// Undeclared keys are ignored. Never panics; all violations across all
    /// fields are returned together.
    pub fn safe_parse(
        &self,
        raw: &HashMap<String, String>,
    ) -> Result<ValidatedFields, ValidationErrors> {
        let mut values = HashMap::with_capacity(self.fields.len());
        let mut errors = ValidationErrors::default();

        for field in &self.fields {
            match field.parse(raw.get(field.name())) {
                Ok(value) => {
                    values.insert(field.name.clone(), value);
                }
                Err(field_errors) => field_errors.into_iter().for_each(|e| errors.add(e)),
            }
        }

        if errors.is_empty() {
            Ok(ValidatedFields { values })
        } else {
            Err(errors)
        }
    }
}

/// Typed field values produced by a successful [`Schema::safe_parse`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedFields {
    values: HashMap<String, FieldValue>,
}

impl ValidatedFields {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_number)
    }

    /// Like [`text`](Self::text), reporting a missing field as `Required`.
    pub fn require_text(&self, name: &str) -> Result<String, ValidationError> {
        self.text(name)
            .map(str::to_string)
            .ok_or_else(|| ValidationError::required(name))
    }

    /// Like [`number`](Self::number), reporting a missing field as `Required`.
    pub fn require_number(&self, name: &str) -> Result<f64, ValidationError> {
        self.number(name)
            .ok_or_else(|| ValidationError::required(name))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::*;

    fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn person() -> Schema {
        Schema::new()
            .text("name", "Invalid name")
            .number("age", "Invalid age")
    }

    #[test]
    fn test_valid_submission() {
        let fields = person()
            .safe_parse(&raw(&[("_csrf", "T1"), ("name", "Carol"), ("age", "42")]))
            .unwrap();

        assert_eq!(fields.text("name"), Some("Carol"));
        assert_eq!(fields.number("age"), Some(42.0));
        assert!(fields.get("_csrf").is_none());
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_empty_name_is_text() {
        let fields = person()
            .safe_parse(&raw(&[("name", ""), ("age", "7")]))
            .unwrap();
        assert_eq!(fields.text("name"), Some(""));
    }

    #[test]
    fn test_bad_age_reported() {
        let errors = person()
            .safe_parse(&raw(&[("name", ""), ("age", "not-a-number")]))
            .unwrap_err();

        let map = errors.field_errors();
        assert_eq!(map.get("age"), Some(&vec!["Invalid age".to_string()]));
        assert!(!map.contains_key("name"));
    }

    #[test]
    fn test_missing_fields_reported_together() {
        let errors = person().safe_parse(&raw(&[("_csrf", "T1")])).unwrap_err();

        let map = errors.field_errors();
        assert_eq!(map["name"], vec!["Required"]);
        assert_eq!(map["age"], vec!["Required"]);
    }

    #[test]
    fn test_extra_rules() {
        let schema = Schema::new()
            .field(
                FieldSchema::text("name")
                    .text_rule(|v, f| NotEmpty::validate(v, f))
                    .text_rule(|v, f| MaxLength(5).validate(v, f)),
            )
            .field(
                FieldSchema::number("age")
                    .with_message("Invalid age")
                    .number_rule(|v, f| Min(0.0).validate(v, f)),
            );

        let errors = schema
            .safe_parse(&raw(&[("name", "Bartholomew"), ("age", "-1")]))
            .unwrap_err();
        let map = errors.field_errors();
        assert_eq!(map["name"], vec!["name must be at most 5 characters"]);
        assert_eq!(map["age"], vec!["age must be at least 0"]);

        // rules only run once the value has the right type
        let errors = schema
            .safe_parse(&raw(&[("name", "Bart"), ("age", "x")]))
            .unwrap_err();
        assert_eq!(errors.field_errors()["age"], vec!["Invalid age"]);
    }

    #[test]
    fn test_default_message_and_introspection() {
        let schema = Schema::new().field(FieldSchema::number("age"));
        let errors = schema.safe_parse(&raw(&[("age", "")])).unwrap_err();
        assert_eq!(errors.errors[0].message, "Invalid age");

        let schema = person();
        assert_eq!(schema.field_names(), vec!["name", "age"]);
    }

    #[test]
    fn test_require_getters() {
        let fields = person()
            .safe_parse(&raw(&[("name", "Carol"), ("age", "42")]))
            .unwrap();
        assert_eq!(fields.require_text("name").unwrap(), "Carol");
        assert_eq!(fields.require_number("age").unwrap(), 42.0);
        assert_eq!(fields.require_text("age").unwrap_err().message, "Required");
    }
}
