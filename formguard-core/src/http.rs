// HTTP request and response types

use crate::{Error, HttpStatus};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// An HTTP request as seen by a form endpoint.
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Header value by name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .or_else(|| {
                self.headers
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, value)| value)
            })
            .map(String::as_str)
    }

    /// Media type of the body without parameters, lowercased.
    pub fn content_type(&self) -> Option<String> {
        self.header("Content-Type").map(|value| {
            value
                .split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        })
    }

    /// Value of a cookie sent in the `Cookie` header.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.header("Cookie")?.split(';').find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then_some(value)
        })
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_slice(&self.body).map_err(|e| Error::Deserialization(e.to_string()))
    }
}

/// An HTTP response produced by a form endpoint.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn with_status(status: HttpStatus) -> Self {
        Self::new(status.code())
    }

    pub fn ok() -> Self {
        Self::with_status(HttpStatus::Ok)
    }

    pub fn created() -> Self {
        Self::with_status(HttpStatus::Created)
    }

    pub fn bad_request() -> Self {
        Self::with_status(HttpStatus::BadRequest)
    }

    pub fn forbidden() -> Self {
        Self::with_status(HttpStatus::Forbidden)
    }

    pub fn unprocessable_entity() -> Self {
        Self::with_status(HttpStatus::UnprocessableEntity)
    }

    pub fn internal_server_error() -> Self {
        Self::with_status(HttpStatus::InternalServerError)
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Serialize `value` as the JSON body.
    pub fn with_json<T: Serialize>(mut self, value: &T) -> Result<Self, Error> {
        self.body = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }

    /// A JSON `{"error": ...}` response carrying the error's status.
    pub fn from_error(error: &Error) -> Self {
        let body = serde_json::json!({ "error": error.to_string() });
        Self::new(error.status_code())
            .with_header("Content-Type", "application/json")
            .with_body(body.to_string())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_slice(&self.body).map_err(|e| Error::Deserialization(e.to_string()))
    }
}
