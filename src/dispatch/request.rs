//! Per-request value types.
//!
//! # Responsibilities
//! - Carry one incoming request through the dispatch pipeline
//! - Hand handlers the request together with extracted path parameters
//!
//! # Design Decisions
//! - `IncomingRequest` is immutable for the duration of one dispatch
//! - The raw platform event travels as opaque JSON; only the dispatcher's
//!   own fields (path, method, body, request id) are typed
//! - No cross-request state: values are created per dispatch and dropped
//!   with the response

use axum::http::Method;
use serde_json::Value;

use crate::routing::PathParams;

/// One incoming request, as handed to the dispatcher by the transport
/// binding.
#[derive(Debug, Clone)]
pub struct IncomingRequest {
    /// Request path, e.g. `/users/42`.
    pub path: String,

    /// HTTP method.
    pub method: Method,

    /// Parsed JSON request body, if one was sent.
    pub body: Option<Value>,

    /// Correlation id, echoed back on every response.
    pub request_id: String,

    /// The raw platform event (method, path, query, headers) for condition
    /// predicates and computed CORS origins.
    pub raw_event: Value,
}

/// What a resolved handler actually receives: the request plus the path
/// parameters its route pattern captured.
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    pub request: IncomingRequest,
    pub path_params: PathParams,
}

impl HandlerRequest {
    /// Look up a captured path parameter by name.
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(String::as_str)
    }

    /// The request body, or JSON null when none was sent.
    pub fn body(&self) -> &Value {
        self.request.body.as_ref().unwrap_or(&Value::Null)
    }
}
