//! Cross-origin response decoration.
//!
//! # Responsibilities
//! - Hold a route's CORS configuration (origin, credentials, allow-lists)
//! - Attach `Access-Control-Allow-*` headers to a produced response
//!
//! # Design Decisions
//! - The origin is either a static string or computed per request from
//!   the raw event and the response about to be sent
//! - Origin and credentials headers are always set; methods and headers
//!   only when an allow-list was configured
//! - The decorator runs after the pipeline settles: it augments whatever
//!   response a resolved route produced, including the 400 and 501
//!   short-circuit paths. The 404 no-route response carries no CORS
//!   headers since there is no route to supply a policy.

use axum::http::Method;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::dispatch::response::DispatchResponse;

/// How the `Access-Control-Allow-Origin` value is produced.
#[derive(Clone)]
enum Origin {
    Static(String),
    Computed(Arc<dyn Fn(&Value, &DispatchResponse) -> String + Send + Sync>),
}

/// Per-route CORS configuration.
#[derive(Clone)]
pub struct CorsPolicy {
    origin: Origin,
    allow_credentials: bool,
    allowed_methods: Option<Vec<Method>>,
    allowed_headers: Option<Vec<String>>,
}

impl CorsPolicy {
    /// A policy with a fixed allowed origin.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: Origin::Static(origin.into()),
            allow_credentials: false,
            allowed_methods: None,
            allowed_headers: None,
        }
    }

    /// A policy whose origin is computed from the raw event and the
    /// outgoing response.
    pub fn computed<F>(origin: F) -> Self
    where
        F: Fn(&Value, &DispatchResponse) -> String + Send + Sync + 'static,
    {
        Self {
            origin: Origin::Computed(Arc::new(origin)),
            allow_credentials: false,
            allowed_methods: None,
            allowed_headers: None,
        }
    }

    pub fn allow_credentials(mut self, allow: bool) -> Self {
        self.allow_credentials = allow;
        self
    }

    pub fn with_methods(mut self, methods: Vec<Method>) -> Self {
        self.allowed_methods = Some(methods);
        self
    }

    pub fn with_headers(mut self, headers: Vec<String>) -> Self {
        self.allowed_headers = Some(headers);
        self
    }

    /// Attach the policy's headers to a produced response.
    pub fn apply(&self, raw_event: &Value, response: &mut DispatchResponse) {
        let origin = match &self.origin {
            Origin::Static(origin) => origin.clone(),
            Origin::Computed(f) => f(raw_event, response),
        };
        response.set_header("Access-Control-Allow-Origin", &origin);
        response.set_header(
            "Access-Control-Allow-Credentials",
            if self.allow_credentials { "true" } else { "false" },
        );
        if let Some(methods) = &self.allowed_methods {
            let joined = methods
                .iter()
                .map(Method::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            response.set_header("Access-Control-Allow-Methods", &joined);
        }
        if let Some(headers) = &self.allowed_headers {
            response.set_header("Access-Control-Allow-Headers", &headers.join(", "));
        }
    }
}

impl fmt::Debug for CorsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let origin = match &self.origin {
            Origin::Static(origin) => origin.as_str(),
            Origin::Computed(_) => "<computed>",
        };
        f.debug_struct("CorsPolicy")
            .field("origin", &origin)
            .field("allow_credentials", &self.allow_credentials)
            .field("allowed_methods", &self.allowed_methods)
            .field("allowed_headers", &self.allowed_headers)
            .finish()
    }
}
