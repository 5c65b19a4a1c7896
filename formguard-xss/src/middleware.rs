use formguard_core::HttpResponse;

/// Response headers that limit what injected markup could do.
#[derive(Debug, Clone)]
pub struct XssConfig {
    /// `X-XSS-Protection: 1; mode=block`
    pub xss_protection: bool,

    /// `X-Content-Type-Options: nosniff`
    pub nosniff: bool,

    /// `Content-Security-Policy` value
    pub content_security_policy: Option<String>,
}

impl XssConfig {
    pub fn new() -> Self {
        Self {
            xss_protection: true,
            nosniff: true,
            content_security_policy: Some("default-src 'self'".to_string()),
        }
    }

    pub fn with_xss_protection(mut self, enable: bool) -> Self {
        self.xss_protection = enable;
        self
    }

    pub fn with_nosniff(mut self, enable: bool) -> Self {
        self.nosniff = enable;
        self
    }

    pub fn with_content_security_policy(mut self, policy: Option<String>) -> Self {
        self.content_security_policy = policy;
        self
    }
}

impl Default for XssConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Adds the configured protection headers to responses.
#[derive(Debug, Clone, Default)]
pub struct XssGuard {
    config: XssConfig,
}

impl XssGuard {
    pub fn new(config: XssConfig) -> Self {
        Self { config }
    }

    pub fn add_protection_headers(&self, mut response: HttpResponse) -> HttpResponse {
        if self.config.xss_protection {
            response
                .headers
                .insert("X-XSS-Protection".to_string(), "1; mode=block".to_string());
        }
        if self.config.nosniff {
            response
                .headers
                .insert("X-Content-Type-Options".to_string(), "nosniff".to_string());
        }
        if let Some(ref policy) = self.config.content_security_policy {
            response
                .headers
                .insert("Content-Security-Policy".to_string(), policy.clone());
        }
        response
    }
}
