use serde::Deserialize;

/// Where the token and the form handle travel, and how the handle cookie is
/// written.
#[derive(Debug, Clone)]
pub struct CsrfConfig {
    /// Form field carrying the echoed token
    pub field_name: String,

    /// Header that may carry the token instead of the form field
    pub header_name: String,

    /// Cookie carrying the form handle
    pub cookie_name: String,

    pub cookie_domain: Option<String>,

    pub cookie_path: String,

    /// HTTPS only
    pub cookie_secure: bool,

    pub cookie_http_only: bool,

    pub cookie_same_site: SameSite,
}

/// Cookie SameSite attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(SameSite::Strict),
            "lax" => Some(SameSite::Lax),
            "none" => Some(SameSite::None),
            _ => None,
        }
    }
}

impl CsrfConfig {
    pub fn new() -> Self {
        Self {
            field_name: "_csrf".to_string(),
            header_name: "X-CSRF-Token".to_string(),
            cookie_name: "csrf_form".to_string(),
            cookie_domain: None,
            cookie_path: "/".to_string(),
            cookie_secure: true,
            cookie_http_only: true,
            cookie_same_site: SameSite::Strict,
        }
    }

    pub fn with_field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = name.into();
        self
    }

    pub fn with_header_name(mut self, name: impl Into<String>) -> Self {
        self.header_name = name.into();
        self
    }

    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    pub fn with_cookie_domain(mut self, domain: impl Into<String>) -> Self {
        self.cookie_domain = Some(domain.into());
        self
    }

    pub fn with_cookie_path(mut self, path: impl Into<String>) -> Self {
        self.cookie_path = path.into();
        self
    }

    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    pub fn with_cookie_http_only(mut self, http_only: bool) -> Self {
        self.cookie_http_only = http_only;
        self
    }

    pub fn with_cookie_same_site(mut self, same_site: SameSite) -> Self {
        self.cookie_same_site = same_site;
        self
    }
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self::new()
    }
}
