//! # FormGuard CSRF Protection
//!
//! Synchronizer-token CSRF protection for HTML form submissions.
//!
//! - [`TokenIssuer`] draws one unguessable token per rendered form.
//! - A [`TokenStore`] binds the token to that render and hands out a handle
//!   the client carries back in a cookie: [`MemoryTokenStore`] keeps a
//!   bounded server-side map of single-use form ids, [`SignedTokenStore`] makes the
//!   handle a self-verifying HMAC-SHA256 signed token.
//! - [`CsrfGuard`] finds the submitted token and the handle on a request.
//!
//! ```rust
//! use formguard_csrf::{MemoryTokenStore, TokenIssuer, TokenStore};
//!
//! # tokio_test::block_on(async {
//! let store = MemoryTokenStore::new();
//! let token = TokenIssuer::new().issue();
//!
//! // render: remember the token, send the handle as a cookie
//! let handle = store.bind(&token).await.unwrap();
//!
//! // submit: the handle gives back the token the form must echo
//! let expected = store.redeem(&handle).await.unwrap().unwrap();
//! assert!(expected.matches(&token.value));
//!
//! // handles are single use
//! assert!(store.redeem(&handle).await.unwrap().is_none());
//! # });
//! ```

pub mod config;
pub mod error;
pub mod issuer;
pub mod middleware;
pub mod store;
pub mod token;

pub use config::{CsrfConfig, SameSite};
pub use error::{CsrfError, Result};
pub use issuer::TokenIssuer;
pub use middleware::CsrfGuard;
pub use store::{DEFAULT_MEMORY_CAPACITY, MemoryTokenStore, SignedTokenStore, TokenStore};
pub use token::{CsrfToken, constant_time_eq};
