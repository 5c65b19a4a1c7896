//! URL-encoded form bodies

use crate::Error;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Parse an `application/x-www-form-urlencoded` body into `T`.
pub fn parse_form<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_urlencoded::from_bytes(body)
        .map_err(|e| Error::BadRequest(format!("Failed to parse form data: {}", e)))
}

/// Parse a URL-encoded body into a field map.
///
/// A repeated field keeps its first value, matching how browsers' `FormData.get`
/// reads a submission.
pub fn parse_form_map(body: &[u8]) -> Result<HashMap<String, String>, Error> {
    let pairs: Vec<(String, String)> = parse_form(body)?;

    let mut fields = HashMap::with_capacity(pairs.len());
    for (key, value) in pairs {
        fields.entry(key).or_insert(value);
    }
    Ok(fields)
}
