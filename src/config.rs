//! FormGuard configuration.
//!
//! Loaded from `FORMGUARD_*` environment variables (a `.env` file is read
//! first when present) or from a TOML document:
//!
//! ```toml
//! csrf_field = "_csrf"
//! csrf_header = "X-CSRF-Token"
//! csrf_cookie = "csrf_form"
//! cookie_secure = true
//! cookie_same_site = "strict"
//! token_store = "signed"
//! memory_capacity = 10000
//! secret = "base64 encoded, at least 32 bytes"
//! sanitizer = "text"
//! ```

use crate::error::ConfigError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use formguard_csrf::{CsrfConfig, DEFAULT_MEMORY_CAPACITY, SameSite};
use formguard_xss::{SanitizerPreset, XssSanitizer};
use serde::Deserialize;
use std::path::Path;

/// Where issued tokens are bound between render and submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStoreMode {
    /// Server-side map of single-use form ids.
    #[default]
    Memory,
    /// HMAC-signed tokens; requires a configured secret.
    Signed,
}

impl TokenStoreMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Some(TokenStoreMode::Memory),
            "signed" => Some(TokenStoreMode::Signed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormGuardConfig {
    /// Form field carrying the echoed token
    pub csrf_field: String,

    /// Header that may carry the token instead
    pub csrf_header: String,

    /// Cookie carrying the form handle
    pub csrf_cookie: String,

    pub cookie_secure: bool,

    pub cookie_same_site: SameSite,

    pub token_store: TokenStoreMode,

    /// Outstanding form renders the memory store keeps before evicting the
    /// oldest
    pub memory_capacity: usize,

    /// Base64-encoded secret, at least 32 bytes once decoded
    pub secret: Option<String>,

    /// Sanitizer applied to text fields
    pub sanitizer: SanitizerPreset,
}

impl Default for FormGuardConfig {
    fn default() -> Self {
        Self {
            csrf_field: "_csrf".to_string(),
            csrf_header: "X-CSRF-Token".to_string(),
            csrf_cookie: "csrf_form".to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::Strict,
            token_store: TokenStoreMode::Memory,
            memory_capacity: DEFAULT_MEMORY_CAPACITY,
            secret: None,
            sanitizer: SanitizerPreset::Text,
        }
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

impl FormGuardConfig {
    /// Read `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset keys keep their
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("FORMGUARD_CSRF_FIELD") {
            config.csrf_field = v;
        }
        if let Some(v) = lookup("FORMGUARD_CSRF_HEADER") {
            config.csrf_header = v;
        }
        if let Some(v) = lookup("FORMGUARD_CSRF_COOKIE") {
            config.csrf_cookie = v;
        }
        if let Some(v) = lookup("FORMGUARD_COOKIE_SECURE") {
            config.cookie_secure = parse_bool("FORMGUARD_COOKIE_SECURE", &v)?;
        }
        if let Some(v) = lookup("FORMGUARD_COOKIE_SAMESITE") {
            config.cookie_same_site =
                SameSite::parse(&v).ok_or_else(|| invalid("FORMGUARD_COOKIE_SAMESITE", &v))?;
        }
        if let Some(v) = lookup("FORMGUARD_TOKEN_STORE") {
            config.token_store =
                TokenStoreMode::parse(&v).ok_or_else(|| invalid("FORMGUARD_TOKEN_STORE", &v))?;
        }
        if let Some(v) = lookup("FORMGUARD_MEMORY_CAPACITY") {
            config.memory_capacity = v
                .trim()
                .parse()
                .map_err(|_| invalid("FORMGUARD_MEMORY_CAPACITY", &v))?;
        }
        if let Some(v) = lookup("FORMGUARD_SECRET") {
            config.secret = Some(v);
        }
        if let Some(v) = lookup("FORMGUARD_SANITIZER") {
            config.sanitizer =
                SanitizerPreset::parse(&v).ok_or_else(|| invalid("FORMGUARD_SANITIZER", &v))?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("TOML parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.csrf_field.trim().is_empty() {
            return Err(invalid("csrf_field", &self.csrf_field));
        }
        if self.csrf_cookie.trim().is_empty() {
            return Err(invalid("csrf_cookie", &self.csrf_cookie));
        }
        if self.memory_capacity == 0 {
            return Err(invalid("memory_capacity", "0"));
        }

        let secret = self.secret_bytes()?;
        if self.token_store == TokenStoreMode::Signed && secret.is_none() {
            return Err(ConfigError::Secret(
                "the signed token store requires a secret".to_string(),
            ));
        }
        Ok(())
    }

    /// Decoded secret, if one is configured.
    pub fn secret_bytes(&self) -> Result<Option<Vec<u8>>, ConfigError> {
        let Some(ref encoded) = self.secret else {
            return Ok(None);
        };

        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| ConfigError::Secret(e.to_string()))?;
        if bytes.len() < 32 {
            return Err(ConfigError::Secret(format!(
                "must be at least 32 bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Some(bytes))
    }

    pub fn csrf_config(&self) -> CsrfConfig {
        CsrfConfig::new()
            .with_field_name(self.csrf_field.clone())
            .with_header_name(self.csrf_header.clone())
            .with_cookie_name(self.csrf_cookie.clone())
            .with_cookie_secure(self.cookie_secure)
            .with_cookie_same_site(self.cookie_same_site)
    }

    pub fn sanitizer(&self) -> XssSanitizer {
        XssSanitizer::from_preset(self.sanitizer)
    }
}
