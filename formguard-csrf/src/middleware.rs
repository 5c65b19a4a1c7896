use crate::config::CsrfConfig;
use formguard_core::{HttpRequest, HttpResponse};
use std::collections::HashMap;
use std::sync::Arc;

/// Request-level CSRF plumbing: where the submitted token and the form
/// handle are found, and how the handle cookie is written.
#[derive(Debug, Clone)]
pub struct CsrfGuard {
    config: Arc<CsrfConfig>,
}

impl CsrfGuard {
    pub fn new(config: CsrfConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &CsrfConfig {
        &self.config
    }

    /// The token the client echoed: a non-empty header first, then the form
    /// field.
    pub fn submitted_token<'a>(
        &self,
        request: &'a HttpRequest,
        fields: &'a HashMap<String, String>,
    ) -> Option<&'a str> {
        request
            .header(&self.config.header_name)
            .filter(|value| !value.is_empty())
            .or_else(|| fields.get(&self.config.field_name).map(String::as_str))
    }

    /// The form handle from the request cookie.
    pub fn form_handle<'a>(&self, request: &'a HttpRequest) -> Option<&'a str> {
        request.cookie(&self.config.cookie_name)
    }

    /// `Set-Cookie` value carrying `handle`.
    pub fn handle_cookie(&self, handle: &str) -> String {
        let mut cookie = format!(
            "{}={}; Path={}",
            self.config.cookie_name, handle, self.config.cookie_path
        );

        if let Some(ref domain) = self.config.cookie_domain {
            cookie.push_str(&format!("; Domain={}", domain));
        }
        if self.config.cookie_secure {
            cookie.push_str("; Secure");
        }
        if self.config.cookie_http_only {
            cookie.push_str("; HttpOnly");
        }
        cookie.push_str(&format!(
            "; SameSite={}",
            self.config.cookie_same_site.as_str()
        ));

        cookie
    }

    pub fn add_handle_cookie(&self, response: HttpResponse, handle: &str) -> HttpResponse {
        response.with_header("Set-Cookie", self.handle_cookie(handle))
    }
}
