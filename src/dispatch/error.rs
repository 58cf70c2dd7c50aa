//! Dispatch error taxonomy.
//!
//! # Responsibilities
//! - Classify every way a dispatch can fail short of a handler response
//! - Map each failure class to its HTTP status and response body
//!
//! # Design Decisions
//! - Handler faults are contained here, never escalated to a transport
//!   crash: one handler's failure cannot abort the dispatcher process
//! - Every error converts into a well-formed response carrying the
//!   correlation header; no error path bypasses that contract
//! - Ambiguous matches are not an error: the registry resolves them
//!   deterministically before this taxonomy is ever consulted

use axum::http::{Method, StatusCode};
use serde_json::json;
use thiserror::Error;

use crate::dispatch::response::DispatchResponse;

/// A failure produced by a handler: either a returned `Err` or the
/// message recovered from a panic.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct HandlerError(pub String);

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        Self(err.to_string())
    }
}

/// Everything that can terminate a dispatch before a successful handler
/// response.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No registered route matched path, method and condition set.
    #[error("no route matches {method} {path}")]
    RouteNotFound { method: Method, path: String },

    /// One or more validators rejected the request body.
    #[error("request validation failed")]
    Validation(Vec<String>),

    /// The handler returned an error or panicked.
    #[error("handler failed: {0}")]
    Handler(HandlerError),
}

impl DispatchError {
    /// The HTTP status this error surfaces as.
    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            DispatchError::Validation(_) => StatusCode::BAD_REQUEST,
            DispatchError::Handler(_) => StatusCode::NOT_IMPLEMENTED,
        }
    }

    /// Convert into the response the caller sees, correlation header
    /// included.
    pub fn into_response(self, request_id: &str) -> DispatchResponse {
        let status = self.status();
        let body = match &self {
            DispatchError::Validation(messages) => json!({ "message": messages }),
            // The 501 body carries the handler's own message, unwrapped.
            DispatchError::Handler(err) => json!({ "message": err.0.clone() }),
            not_found => json!({ "message": not_found.to_string() }),
        };
        DispatchResponse::new(status)
            .with_body(body)
            .with_request_id(request_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::response::X_REQUEST_ID;

    #[test]
    fn test_status_mapping() {
        let not_found = DispatchError::RouteNotFound {
            method: Method::GET,
            path: "/missing".into(),
        };
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            DispatchError::Validation(vec!["bad".into()]).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            DispatchError::Handler("boom".into()).status(),
            StatusCode::NOT_IMPLEMENTED
        );
    }

    #[test]
    fn test_validation_body_carries_message_list() {
        let response =
            DispatchError::Validation(vec!["name is required".into(), "age must be a number".into()])
                .into_response("req-9");
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.body,
            json!({ "message": ["name is required", "age must be a number"] })
        );
        assert_eq!(response.header(X_REQUEST_ID), Some("req-9"));
    }

    #[test]
    fn test_handler_failure_body_carries_message_string() {
        let response = DispatchError::Handler("boom".into()).into_response("req-1");
        assert_eq!(response.status, StatusCode::NOT_IMPLEMENTED);
        assert_eq!(response.body, json!({ "message": "boom" }));
    }
}
