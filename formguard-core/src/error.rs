// Transport-level errors

use crate::HttpStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Unsupported Media Type: {0}")]
    UnsupportedMediaType(String),

    #[error("Unprocessable Entity: {0}")]
    UnprocessableEntity(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn http_status(&self) -> HttpStatus {
        match self {
            Error::BadRequest(_) | Error::Deserialization(_) => HttpStatus::BadRequest,
            Error::Forbidden(_) => HttpStatus::Forbidden,
            Error::NotFound(_) => HttpStatus::NotFound,
            Error::MethodNotAllowed(_) => HttpStatus::MethodNotAllowed,
            Error::UnsupportedMediaType(_) => HttpStatus::UnsupportedMediaType,
            Error::UnprocessableEntity(_) => HttpStatus::UnprocessableEntity,
            Error::Serialization(_) | Error::Internal(_) => HttpStatus::InternalServerError,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.http_status().code()
    }

    pub fn is_client_error(&self) -> bool {
        self.http_status().is_client_error()
    }

    pub fn is_server_error(&self) -> bool {
        self.http_status().is_server_error()
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(Error::Forbidden("csrf".into()).status_code(), 403);
        assert_eq!(Error::Deserialization("body".into()).status_code(), 400);
        assert_eq!(Error::UnprocessableEntity("age".into()).status_code(), 422);
        assert_eq!(Error::Internal("sink".into()).status_code(), 500);
    }

    #[test]
    fn test_error_classes() {
        assert!(Error::BadRequest(String::new()).is_client_error());
        assert!(Error::Serialization(String::new()).is_server_error());
    }
}
