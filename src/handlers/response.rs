//! Response envelope shared by every handler
//!
//! All bodies are JSON and carry a permissive CORS origin header. Preflight
//! requests get a fixed answer without touching the database.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::utils::errors::{DirectoryError, Result};

pub const ALLOW_ORIGIN: (&str, &str) = ("Access-Control-Allow-Origin", "*");
pub const ALLOW_METHODS: (&str, &str) = ("Access-Control-Allow-Methods", "GET, POST, OPTIONS");
pub const ALLOW_HEADERS: (&str, &str) = ("Access-Control-Allow-Headers", "Content-Type");
pub const MAX_AGE: (&str, &str) = ("Access-Control-Max-Age", "86400");

/// Fixed answer to an `OPTIONS` request
pub fn preflight() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(ALLOW_ORIGIN)
        .insert_header(ALLOW_METHODS)
        .insert_header(ALLOW_HEADERS)
        .insert_header(MAX_AGE)
        .finish()
}

pub fn json<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header(ALLOW_ORIGIN)
        .json(body)
}

/// Decode a JSON request body; an empty body reads as `{}`
pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}".as_slice()
    } else {
        body
    };

    serde_json::from_slice(body).map_err(invalid_body)
}

/// Decode a query string; when a key repeats, the last value wins
pub fn parse_query<T: DeserializeOwned>(query: &str) -> Result<T> {
    let params: Map<String, Value> = url::form_urlencoded::parse(query.as_bytes())
        .map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
        .collect();

    serde_json::from_value(Value::Object(params))
        .map_err(|e| DirectoryError::validation(format!("Invalid query string: {}", e)))
}

pub fn invalid_body(error: serde_json::Error) -> DirectoryError {
    DirectoryError::validation(format!("Invalid request body: {}", error))
}
