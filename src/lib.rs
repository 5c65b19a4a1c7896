//! # FormGuard
//!
//! CSRF and XSS protection for a single HTML form submission.
//!
//! A form render gets a fresh token from the [`TokenIssuer`]; the submission
//! must echo it back. The [`SubmissionValidator`] then checks, in order:
//!
//! 1. the echoed token equals the issued one ([`SubmissionError::TokenMismatch`]);
//! 2. `name` is text and `age` coerces to a number
//!    ([`SubmissionError::SchemaInvalid`], with messages per field);
//! 3. text fields are stripped of markup, which never fails.
//!
//! Only the resulting [`SanitizedPerson`] can be handed to a [`Sink`].
//!
//! ```rust
//! use formguard::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let token = TokenIssuer::new().issue();
//!
//! let mut raw = RawSubmission::new();
//! raw.insert("_csrf".to_string(), token.value.clone());
//! raw.insert("name".to_string(), "<script>alert(1)</script>Bob".to_string());
//! raw.insert("age".to_string(), "42".to_string());
//!
//! let record = SubmissionValidator::new().validate(&raw, &token.value).unwrap();
//! assert_eq!(record.name(), "Bob");
//! assert_eq!(record.age(), 42.0);
//!
//! let sink = MemorySink::new();
//! sink.store(record).await.unwrap();
//! assert_eq!(sink.len().await, 1);
//! # });
//! ```
//!
//! [`FormController`] wires the same flow to [`HttpRequest`]/[`HttpResponse`],
//! binding tokens to renders through a [`TokenStore`].

pub mod config;
pub mod controller;
pub mod error;
pub mod record;
pub mod sink;
pub mod validator;

/// Log target for submission outcomes.
pub const LOG_TARGET: &str = "formguard::submission";

pub use config::{FormGuardConfig, TokenStoreMode};
pub use controller::FormController;
pub use error::{ConfigError, SinkError, SubmissionError};
pub use record::{RawSubmission, SanitizedPerson, ValidatedPerson};
pub use sink::{MemorySink, NoopSink, Sink};
pub use validator::SubmissionValidator;

pub use formguard_core::{HttpRequest, HttpResponse, HttpStatus};
pub use formguard_csrf::{
    CsrfConfig, CsrfError, CsrfToken, MemoryTokenStore, SignedTokenStore, TokenIssuer,
    TokenStore,
};
pub use formguard_validation::{FromFields, ValidationError, ValidationErrors};
pub use formguard_xss::{SanitizerPreset, XssSanitizer};

pub use formguard_core;
pub use formguard_csrf;
pub use formguard_log;
pub use formguard_validation;
pub use formguard_xss;

/// Common imports.
pub mod prelude {
    pub use crate::{
        FormController, FormGuardConfig, HttpRequest, HttpResponse, MemorySink,
        MemoryTokenStore, NoopSink, RawSubmission, SanitizedPerson, Sink, SubmissionError,
        SubmissionValidator, TokenIssuer, TokenStore,
    };
}
