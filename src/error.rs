//! Submission, sink and configuration errors.

use formguard_core::{Error, HttpResponse, HttpStatus};
use formguard_validation::ValidationErrors;
use thiserror::Error;

/// Why a submission was not accepted.
#[derive(Error, Debug)]
pub enum SubmissionError {
    /// The echoed token was missing or differed from the issued one.
    #[error("CSRF token mismatch")]
    TokenMismatch,

    /// One or more fields failed their type checks.
    #[error("Invalid submission: {0}")]
    SchemaInvalid(ValidationErrors),

    #[error("Failed to store submission: {0}")]
    Sink(#[from] SinkError),
}

impl SubmissionError {
    pub fn http_status(&self) -> HttpStatus {
        match self {
            SubmissionError::TokenMismatch => HttpStatus::Forbidden,
            SubmissionError::SchemaInvalid(_) => HttpStatus::UnprocessableEntity,
            SubmissionError::Sink(_) => HttpStatus::InternalServerError,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.http_status().code()
    }

    /// Per-field messages, if this is a schema failure.
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            SubmissionError::SchemaInvalid(errors) => Some(errors),
            _ => None,
        }
    }

    /// JSON rejection response.
    ///
    /// Schema failures list every field message; sink failures do not expose
    /// the underlying cause.
    pub fn into_response(self) -> HttpResponse {
        match self {
            SubmissionError::TokenMismatch => {
                HttpResponse::from_error(&Error::Forbidden("CSRF token mismatch".to_string()))
            }
            SubmissionError::SchemaInvalid(errors) => HttpResponse::unprocessable_entity()
                .with_header("Content-Type", "application/json")
                .with_body(errors.to_json().to_string()),
            SubmissionError::Sink(_) => HttpResponse::from_error(&Error::Internal(
                "Failed to store submission".to_string(),
            )),
        }
    }
}

impl From<ValidationErrors> for SubmissionError {
    fn from(errors: ValidationErrors) -> Self {
        SubmissionError::SchemaInvalid(errors)
    }
}

/// Failure reported by a [`Sink`](crate::Sink).
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Sink unavailable: {0}")]
    Unavailable(String),

    #[error("Record rejected: {0}")]
    Rejected(String),
}

/// Invalid FormGuard configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Invalid secret: {0}")]
    Secret(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csrf(#[from] formguard_csrf::CsrfError),
}
