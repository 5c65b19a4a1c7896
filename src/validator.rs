//! The form submission pipeline: token gate, schema gate, sanitization.

use crate::error::SubmissionError;
use crate::record::{NAME_FIELD, RawSubmission, SanitizedPerson, ValidatedPerson};
use crate::LOG_TARGET;
use formguard_csrf::constant_time_eq;
use formguard_log::{debug, warn};
use formguard_validation::FromFields;
use formguard_xss::{XssSanitizer, XssValidator};

/// Runs a raw submission through three gates, in order, stopping at the
/// first failure:
///
/// 1. the echoed token must equal the expected token exactly;
/// 2. every schema field must be present and of the right type, with `age`
///    coerced to a number;
/// 3. every text field is sanitized. This step never fails.
#[derive(Debug, Clone)]
pub struct SubmissionValidator {
    token_field: String,
    sanitizer: XssSanitizer,
}

impl SubmissionValidator {
    /// Token read from `_csrf`; text fields stripped of all markup.
    pub fn new() -> Self {
        Self {
            token_field: "_csrf".to_string(),
            sanitizer: XssSanitizer::text_only(),
        }
    }

    pub fn with_token_field(mut self, field: impl Into<String>) -> Self {
        self.token_field = field.into();
        self
    }

    pub fn with_sanitizer(mut self, sanitizer: XssSanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    pub fn token_field(&self) -> &str {
        &self.token_field
    }

    pub fn validate(
        &self,
        raw: &RawSubmission,
        expected_token: &str,
    ) -> Result<SanitizedPerson, SubmissionError> {
        self.check_token(raw, expected_token)?;

        let person = ValidatedPerson::parse(raw).map_err(|errors| {
            warn!(target: LOG_TARGET, "Rejected submission: {}", errors);
            SubmissionError::SchemaInvalid(errors)
        })?;

        Ok(self.sanitize(person))
    }

    fn check_token(&self, raw: &RawSubmission, expected: &str) -> Result<(), SubmissionError> {
        let Some(submitted) = raw.get(&self.token_field) else {
            warn!(target: LOG_TARGET, "Rejected submission: no {} field", self.token_field);
            return Err(SubmissionError::TokenMismatch);
        };

        // An empty expected token means none was issued.
        if expected.is_empty() || !constant_time_eq(submitted.as_bytes(), expected.as_bytes()) {
            warn!(target: LOG_TARGET, "Rejected submission: CSRF token mismatch");
            return Err(SubmissionError::TokenMismatch);
        }

        Ok(())
    }

    fn sanitize(&self, person: ValidatedPerson) -> SanitizedPerson {
        if let Some(kind) = XssValidator::detect_attack_type(person.name()) {
            warn!(
                target: LOG_TARGET,
                "Stripping {} from field {}",
                kind,
                NAME_FIELD
            );
        }

        let record = person.sanitize(&self.sanitizer);
        debug!(target: LOG_TARGET, "Accepted submission for {:?}", record.name());
        record
    }
}

impl Default for SubmissionValidator {
    fn default() -> Self {
        Self::new()
    }
}
