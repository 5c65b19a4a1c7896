//! Submission records at each stage of the pipeline.
//!
//! `RawSubmission` → [`ValidatedPerson`] (schema gate) → [`SanitizedPerson`]
//! (sanitization). Neither typed record can be built from raw input directly.

use formguard_validation::{FromFields, Schema, ValidatedFields, ValidationErrors};
use formguard_xss::XssSanitizer;
use serde::Serialize;
use std::collections::HashMap;

/// Field name to raw string value, exactly as submitted.
pub type RawSubmission = HashMap<String, String>;

pub const NAME_FIELD: &str = "name";
pub const AGE_FIELD: &str = "age";

/// A submission whose fields all passed their type checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPerson {
    name: String,
    age: f64,
}

impl ValidatedPerson {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> f64 {
        self.age
    }

    /// Strip markup from every text field. Numbers pass through.
    pub fn sanitize(self, sanitizer: &XssSanitizer) -> SanitizedPerson {
        SanitizedPerson {
            name: sanitizer.sanitize(&self.name),
            age: self.age,
        }
    }
}

impl FromFields for ValidatedPerson {
    fn schema() -> Schema {
        Schema::new()
            .text(NAME_FIELD, "Invalid name")
            .number(AGE_FIELD, "Invalid age")
    }

    fn from_fields(fields: &ValidatedFields) -> Result<Self, ValidationErrors> {
        Ok(Self {
            name: fields.require_text(NAME_FIELD)?,
            age: fields.require_number(AGE_FIELD)?,
        })
    }
}

/// A validated record with its text fields sanitized.
///
/// The only record a [`Sink`](crate::Sink) accepts. Text fields hold the
/// sanitizer's HTML output, so `&` and `<` arrive escaped (`&amp;`, `&lt;`)
/// and must not be escaped again when rendered into HTML.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SanitizedPerson {
    name: String,
    age: f64,
}

impl SanitizedPerson {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> f64 {
        self.age
    }
}
