//! Request adaptation at the transport boundary.
//!
//! # Responsibilities
//! - Parse the raw request body into JSON for the dispatch core
//! - Assemble the opaque raw event (method, path, query, headers) that
//!   condition predicates and computed CORS origins consume
//!
//! # Design Decisions
//! - An empty body is "no body", not an empty JSON document
//! - A non-empty body that is not valid JSON is rejected at the boundary
//!   before the dispatch core is consulted
//! - Header values that are not UTF-8 are omitted from the raw event

use axum::http::request::Parts;
use serde_json::{json, Map, Value};

/// Parse request bytes into an optional JSON body.
pub fn parse_body(bytes: &[u8]) -> Result<Option<Value>, serde_json::Error> {
    if bytes.is_empty() {
        return Ok(None);
    }
    serde_json::from_slice(bytes).map(Some)
}

/// Build the raw platform event handed to conditions and CORS policies.
pub fn build_raw_event(parts: &Parts, request_id: &str) -> Value {
    let mut headers = Map::new();
    for (name, value) in parts.headers.iter() {
        if let Ok(value) = value.to_str() {
            headers.insert(name.as_str().to_string(), Value::String(value.to_string()));
        }
    }
    json!({
        "method": parts.method.as_str(),
        "path": parts.uri.path(),
        "query": parts.uri.query(),
        "headers": headers,
        "request_id": request_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;

    #[test]
    fn test_empty_body_is_none() {
        assert_eq!(parse_body(b"").unwrap(), None);
    }

    #[test]
    fn test_json_body_parses() {
        let body = parse_body(br#"{"name":"ada"}"#).unwrap();
        assert_eq!(body, Some(json!({ "name": "ada" })));
    }

    #[test]
    fn test_non_json_body_is_rejected() {
        assert!(parse_body(b"not json").is_err());
    }

    #[test]
    fn test_raw_event_shape() {
        let (parts, _) = Request::builder()
            .method("POST")
            .uri("http://localhost/users/42?dry_run=1")
            .header("x-source", "ci")
            .body(Body::empty())
            .unwrap()
            .into_parts();
        let event = build_raw_event(&parts, "req-1");
        assert_eq!(event["method"], "POST");
        assert_eq!(event["path"], "/users/42");
        assert_eq!(event["query"], "dry_run=1");
        assert_eq!(event["headers"]["x-source"], "ci");
        assert_eq!(event["request_id"], "req-1");
    }
}
