//! Response construction and transformation.
//!
//! # Responsibilities
//! - Define the response value every dispatch produces
//! - Provide builders for the common status/JSON-body shapes
//! - Attach the correlation header (X-Request-ID)
//!
//! # Design Decisions
//! - `HeaderMap` keeps header keys case-insensitive-unique for free
//! - Header values that are not valid HTTP are dropped rather than
//!   failing the dispatch
//! - Bodies are JSON values; serialization to bytes is the transport
//!   binding's job

use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde_json::{json, Value};

/// Correlation header carried by every response leaving the dispatcher.
pub const X_REQUEST_ID: &str = "x-request-id";

/// The final, normalized outcome of one dispatch.
#[derive(Debug, Clone)]
pub struct DispatchResponse {
    pub status: StatusCode,
    pub body: Value,
    pub headers: HeaderMap,
}

impl DispatchResponse {
    /// Create a response with the given status and an empty JSON body.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            body: Value::Null,
            headers: HeaderMap::new(),
        }
    }

    /// A 200 response with the given JSON body.
    pub fn ok(body: Value) -> Self {
        Self::new(StatusCode::OK).with_body(body)
    }

    /// A response with the given status and a `{"message": ...}` body.
    pub fn message(status: StatusCode, message: impl Into<Value>) -> Self {
        Self::new(status).with_body(json!({ "message": message.into() }))
    }

    /// Replace the body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// Builder form of [`set_header`](Self::set_header).
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.set_header(name, value);
        self
    }

    /// Insert a header, replacing any existing value under the same
    /// (case-insensitive) name. Invalid names or values are ignored.
    pub fn set_header(&mut self, name: &str, value: &str) {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
    }

    /// Read a header value back as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Attach the correlation header.
    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.set_header(X_REQUEST_ID, request_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_keys_are_case_insensitive() {
        let response = DispatchResponse::ok(json!({}))
            .with_header("X-Custom", "a")
            .with_header("x-custom", "b");
        assert_eq!(response.header("X-CUSTOM"), Some("b"));
        assert_eq!(response.headers.len(), 1);
    }

    #[test]
    fn test_message_body_shape() {
        let response = DispatchResponse::message(StatusCode::NOT_FOUND, "no route");
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body, json!({ "message": "no route" }));
    }

    #[test]
    fn test_invalid_header_value_is_dropped() {
        let response = DispatchResponse::ok(json!({})).with_header("x-bad", "line\nbreak");
        assert!(response.header("x-bad").is_none());
    }

    #[test]
    fn test_request_id_attachment() {
        let response = DispatchResponse::ok(json!({})).with_request_id("req-1");
        assert_eq!(response.header(X_REQUEST_ID), Some("req-1"));
    }
}
