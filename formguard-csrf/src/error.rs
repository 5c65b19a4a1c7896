use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsrfError {
    #[error("Invalid CSRF token signature")]
    InvalidSignature,

    #[error("Malformed signed token: {0}")]
    Malformed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, CsrfError>;
