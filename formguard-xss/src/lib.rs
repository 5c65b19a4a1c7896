//! # FormGuard XSS Protection
//!
//! - [`XssSanitizer`] strips markup from user text (ammonia). The
//!   [`XssSanitizer::text_only`] preset, used for form fields, removes every
//!   tag and drops `<script>`/`<style>` bodies entirely.
//! - [`XssValidator`] recognises common injection patterns so stripped
//!   content can be reported.
//! - [`XssGuard`] adds protection headers to responses.
//!
//! ```rust
//! use formguard_xss::{AttackKind, XssSanitizer, XssValidator};
//!
//! let input = "<script>alert(1)</script>Bob";
//! assert_eq!(XssValidator::detect_attack_type(input), Some(AttackKind::ScriptTag));
//! assert_eq!(XssSanitizer::text_only().sanitize(input), "Bob");
//!
//! // benign text is untouched
//! assert_eq!(XssSanitizer::text_only().sanitize("Alice"), "Alice");
//! ```

pub mod middleware;
pub mod sanitizer;
pub mod validator;

pub use middleware::{XssConfig, XssGuard};
pub use sanitizer::{SanitizerPreset, XssSanitizer};
pub use validator::{AttackKind, XssValidator};
