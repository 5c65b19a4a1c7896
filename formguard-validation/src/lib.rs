//! Form validation for FormGuard
//!
//! Field schemas with explicit, total type coercion, built-in validators and
//! per-field error reporting.
//!
//! # Examples
//!
//! ## Schemas
//!
//! ```
//! use formguard_validation::Schema;
//! use std::collections::HashMap;
//!
//! let schema = Schema::new()
//!     .text("name", "Invalid name")
//!     .number("age", "Invalid age");
//!
//! let mut raw = HashMap::new();
//! raw.insert("name".to_string(), "Carol".to_string());
//! raw.insert("age".to_string(), "42".to_string());
//!
//! let fields = schema.safe_parse(&raw).unwrap();
//! assert_eq!(fields.number("age"), Some(42.0));
//!
//! raw.insert("age".to_string(), "not-a-number".to_string());
//! let errors = schema.safe_parse(&raw).unwrap_err();
//! assert_eq!(errors.field_errors()["age"], vec!["Invalid age"]);
//! ```
//!
//! ## Validation Rules Builder
//!
//! ```
//! use formguard_validation::{ValidationRules, NotEmpty, MinLength};
//!
//! let rules = ValidationRules::<str>::for_field("username")
//!     .add(|value, field| NotEmpty::validate(value, field))
//!     .add(|value, field| MinLength(3).validate(value, field));
//!
//! assert!(rules.validate("john").is_ok());
//! ```
//!
//! ## Number Validation
//!
//! ```
//! use formguard_validation::{CoerceNumber, Min, Max};
//!
//! assert_eq!(CoerceNumber::parse(" 25 "), Some(25.0));
//! assert_eq!(CoerceNumber::parse("NaN"), None);
//! assert!(Min(18.0).validate(25.0, "age").is_ok());
//! assert!(Max(100.0).validate(150.0, "age").is_err());
//! ```

mod errors;
mod rules;
mod schema;
mod traits;
mod validators;

pub use errors::*;
pub use rules::*;
pub use schema::*;
pub use traits::*;
pub use validators::*;
