use crate::error::{CsrfError, Result};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// A CSRF token issued for one rendered form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsrfToken {
    /// Opaque value the client echoes back
    pub value: String,

    /// When the token was issued
    pub created_at: DateTime<Utc>,
}

impl CsrfToken {
    /// Generate a token from 32 bytes of OS-seeded randomness.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let random_bytes: [u8; 32] = rng.r#gen();

        Self {
            value: URL_SAFE_NO_PAD.encode(random_bytes),
            created_at: Utc::now(),
        }
    }

    /// Wrap an already known value.
    pub fn from_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            created_at: Utc::now(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Exact comparison against a submitted value, in constant time.
    pub fn matches(&self, submitted: &str) -> bool {
        constant_time_eq(self.value.as_bytes(), submitted.as_bytes())
    }

    /// Encode as `base64(json).base64(hmac)`, verifiable with the same secret.
    pub fn encode(&self, secret: &[u8]) -> Result<String> {
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(self)?);

        let mut mac = Self::mac(secret)?;
        mac.update(payload.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{}.{}", payload, signature))
    }

    /// Verify the signature of an encoded token and decode it.
    pub fn decode(encoded: &str, secret: &[u8]) -> Result<Self> {
        let (payload, signature) = encoded
            .split_once('.')
            .ok_or_else(|| CsrfError::Malformed("missing signature".to_string()))?;

        let signature = URL_SAFE_NO_PAD.decode(signature)?;
        let mut mac = Self::mac(secret)?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| CsrfError::InvalidSignature)?;

        let json = URL_SAFE_NO_PAD.decode(payload)?;
        Ok(serde_json::from_slice(&json)?)
    }

    fn mac(secret: &[u8]) -> Result<HmacSha256> {
        HmacSha256::new_from_slice(secret).map_err(|e| CsrfError::Internal(e.to_string()))
    }
}

impl std::fmt::Display for CsrfToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// Byte-wise equality whose running time depends only on the lengths.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
