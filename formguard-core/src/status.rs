// HTTP status codes used by FormGuard responses

/// The subset of HTTP status codes a form endpoint answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpStatus {
    Ok = 200,
    Created = 201,
    NoContent = 204,
    SeeOther = 303,
    BadRequest = 400,
    Forbidden = 403,
    NotFound = 404,
    MethodNotAllowed = 405,
    PayloadTooLarge = 413,
    UnsupportedMediaType = 415,
    UnprocessableEntity = 422,
    InternalServerError = 500,
    ServiceUnavailable = 503,
}

impl HttpStatus {
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Canonical reason phrase.
    pub fn reason(&self) -> &'static str {
        match self {
            HttpStatus::Ok => "OK",
            HttpStatus::Created => "Created",
            HttpStatus::NoContent => "No Content",
            HttpStatus::SeeOther => "See Other",
            HttpStatus::BadRequest => "Bad Request",
            HttpStatus::Forbidden => "Forbidden",
            HttpStatus::NotFound => "Not Found",
            HttpStatus::MethodNotAllowed => "Method Not Allowed",
            HttpStatus::PayloadTooLarge => "Payload Too Large",
            HttpStatus::UnsupportedMediaType => "Unsupported Media Type",
            HttpStatus::UnprocessableEntity => "Unprocessable Entity",
            HttpStatus::InternalServerError => "Internal Server Error",
            HttpStatus::ServiceUnavailable => "Service Unavailable",
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code())
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.code())
    }

    pub fn is_server_error(&self) -> bool {
        self.code() >= 500
    }

    pub fn from_code(code: u16) -> Option<Self> {
        let status = match code {
            200 => HttpStatus::Ok,
            201 => HttpStatus::Created,
            204 => HttpStatus::NoContent,
            303 => HttpStatus::SeeOther,
            400 => HttpStatus::BadRequest,
            403 => HttpStatus::Forbidden,
            404 => HttpStatus::NotFound,
            405 => HttpStatus::MethodNotAllowed,
            413 => HttpStatus::PayloadTooLarge,
            415 => HttpStatus::UnsupportedMediaType,
            422 => HttpStatus::UnprocessableEntity,
            500 => HttpStatus::InternalServerError,
            503 => HttpStatus::ServiceUnavailable,
            _ => return None,
        };
        Some(status)
    }
}

impl std::fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for status in [
            HttpStatus::Created,
            HttpStatus::Forbidden,
            HttpStatus::UnprocessableEntity,
        ] {
            assert_eq!(HttpStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(HttpStatus::from_code(418), None);
    }

    #[test]
    fn test_classes() {
        assert!(HttpStatus::Created.is_success());
        assert!(HttpStatus::Forbidden.is_client_error());
        assert!(!HttpStatus::Forbidden.is_server_error());
        assert!(HttpStatus::InternalServerError.is_server_error());
    }

    #[test]
    fn test_display() {
        assert_eq!(HttpStatus::UnprocessableEntity.to_string(), "422 Unprocessable Entity");
    }
}
