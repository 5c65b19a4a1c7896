use crate::token::CsrfToken;
use formguard_log::trace;

/// Issues one fresh token per rendered form.
///
/// Stateless: every call draws new randomness, so a single issuer can be
/// shared across threads and concurrent renders.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenIssuer;

impl TokenIssuer {
    pub fn new() -> Self {
        Self
    }

    pub fn issue(&self) -> CsrfToken {
        let token = CsrfToken::generate();
        trace!(target: "formguard::csrf", "Issued CSRF token at {}", token.created_at);
        token
    }
}
