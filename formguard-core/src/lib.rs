//! Transport types shared by the FormGuard crates.
//!
//! A request/response pair, status codes, an error type that knows its
//! status, and `application/x-www-form-urlencoded` parsing. The hosting server converts its own request type into
//! [`HttpRequest`] and writes [`HttpResponse`] back out.

pub mod error;
pub mod form;
pub mod http;
pub mod status;

pub use error::{Error, Result};
pub use form::{parse_form, parse_form_map};
pub use http::{HttpRequest, HttpResponse};
pub use status::HttpStatus;
