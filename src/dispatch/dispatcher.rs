//! Request dispatch orchestration.
//!
//! # Responsibilities
//! - Drive one request through resolve → validate → invoke → normalize
//!   → CORS decoration
//! - Produce the terminal 404 when no route matches
//! - Record tracing events and metrics at each decision point
//!
//! # Design Decisions
//! - The pipeline is explicit function composition in one place, visible
//!   at a glance rather than implied by wrapper registration order
//! - `dispatch` takes `&self` and holds no lock; the registry is frozen
//!   before serving, so arbitrarily many dispatches can run concurrently
//! - Every outcome is a well-formed response; `dispatch` never errors
//! - No retries, timeouts or cancellation here; those belong to the
//!   transport boundary

use std::sync::Arc;
use std::time::Instant;

use crate::dispatch::error::DispatchError;
use crate::dispatch::normalizer;
use crate::dispatch::request::IncomingRequest;
use crate::dispatch::response::DispatchResponse;
use crate::dispatch::validation::{run_validations, Validator};
use crate::observability::metrics;
use crate::routing::{RouteMatch, RouteRegistry};

/// Dispatches incoming requests against a frozen route registry.
pub struct Dispatcher {
    registry: Arc<RouteRegistry>,
    validator: Arc<dyn Validator>,
}

impl Dispatcher {
    pub fn new(registry: Arc<RouteRegistry>, validator: Arc<dyn Validator>) -> Self {
        Self {
            registry,
            validator,
        }
    }

    /// Dispatch one request to completion.
    pub async fn dispatch(&self, request: IncomingRequest) -> DispatchResponse {
        let start = Instant::now();
        let method = request.method.to_string();

        let Some(RouteMatch { route, path_params }) = self.registry.resolve(
            &request.path,
            &request.method,
            request.body.as_ref(),
            &request.raw_event,
        ) else {
            tracing::warn!(
                request_id = %request.request_id,
                method = %request.method,
                path = %request.path,
                "No route matched"
            );
            metrics::record_dispatch(&method, 404, "none", start);
            let err = DispatchError::RouteNotFound {
                method: request.method,
                path: request.path,
            };
            return err.into_response(&request.request_id);
        };

        tracing::debug!(
            request_id = %request.request_id,
            method = %request.method,
            path = %request.path,
            route = %route.pattern(),
            "Dispatching request"
        );

        let validation_errors =
            run_validations(self.validator.as_ref(), route.validations(), request.body.as_ref())
                .await;

        let raw_event = request.raw_event.clone();
        let route_label = route.pattern().as_str().to_string();
        let mut response = normalizer::normalize(route, path_params, request, validation_errors).await;

        // Route-owned CORS applies to every outcome of a resolved route,
        // the 400/501 short-circuits included.
        if let Some(policy) = route.cors() {
            policy.apply(&raw_event, &mut response);
        }

        metrics::record_dispatch(&method, response.status.as_u16(), &route_label, start);
        response
    }

    pub fn registry(&self) -> &Arc<RouteRegistry> {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::cors::CorsPolicy;
    use crate::dispatch::request::HandlerRequest;
    use crate::dispatch::response::X_REQUEST_ID;
    use crate::dispatch::validation::FnValidator;
    use crate::routing::RegistryBuilder;
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};

    fn pass_validator() -> Arc<dyn Validator> {
        Arc::new(FnValidator::new(|_: &Value, _: &Value| String::new()))
    }

    fn request(path: &str, method: Method, body: Option<Value>) -> IncomingRequest {
        IncomingRequest {
            path: path.into(),
            method,
            body,
            request_id: "req-0".into(),
            raw_event: json!({}),
        }
    }

    #[tokio::test]
    async fn test_empty_registry_yields_404_with_request_id() {
        let dispatcher = Dispatcher::new(Arc::new(RegistryBuilder::new().build()), pass_validator());
        let response = dispatcher.dispatch(request("/missing", Method::GET, None)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.header(X_REQUEST_ID), Some("req-0"));
        assert_eq!(response.body, json!({ "message": "no route matches GET /missing" }));
    }

    #[tokio::test]
    async fn test_full_pipeline_success() {
        let registry = RegistryBuilder::new()
            .route(crate::routing::Route::new(
                "/users/{id}",
                Method::GET,
                |req: HandlerRequest| async move {
                    Ok(DispatchResponse::ok(json!({ "id": req.path_param("id") })))
                },
            ))
            .build();
        let dispatcher = Dispatcher::new(Arc::new(registry), pass_validator());
        let response = dispatcher.dispatch(request("/users/42", Method::GET, None)).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!({ "id": "42" }));
        assert_eq!(response.header(X_REQUEST_ID), Some("req-0"));
    }

    #[tokio::test]
    async fn test_validation_schemas_flow_through() {
        let validator: Arc<dyn Validator> = Arc::new(FnValidator::new(|body: &Value, schema: &Value| {
            let field = schema["required"].as_str().unwrap_or_default();
            if body.get(field).is_some() {
                String::new()
            } else {
                format!("{} is required", field)
            }
        }));
        let registry = RegistryBuilder::new()
            .route(
                crate::routing::Route::new("/users", Method::POST, |_req: HandlerRequest| async move {
                    Ok(DispatchResponse::ok(json!({})))
                })
                .with_validation(json!({ "required": "name" }))
                .with_validation(json!({ "required": "email" })),
            )
            .build();
        let dispatcher = Dispatcher::new(Arc::new(registry), validator);
        let response = dispatcher
            .dispatch(request("/users", Method::POST, Some(json!({ "name": "ada" }))))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body, json!({ "message": ["email is required"] }));
    }

    #[tokio::test]
    async fn test_cors_applies_to_validation_400() {
        let reject: Arc<dyn Validator> =
            Arc::new(FnValidator::new(|_: &Value, _: &Value| "body is invalid".to_string()));
        let registry = RegistryBuilder::new()
            .route(
                crate::routing::Route::new("/users", Method::POST, |_req: HandlerRequest| async move {
                    Ok(DispatchResponse::ok(json!({})))
                })
                .with_validation(json!({}))
                .with_cors(CorsPolicy::new("https://app.example.com")),
            )
            .build();
        let dispatcher = Dispatcher::new(Arc::new(registry), reject);
        let response = dispatcher
            .dispatch(request("/users", Method::POST, Some(json!({}))))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.header("Access-Control-Allow-Origin"),
            Some("https://app.example.com")
        );
    }

    #[tokio::test]
    async fn test_404_carries_no_cors_headers() {
        let dispatcher = Dispatcher::new(Arc::new(RegistryBuilder::new().build()), pass_validator());
        let response = dispatcher.dispatch(request("/missing", Method::GET, None)).await;
        assert!(response.header("Access-Control-Allow-Origin").is_none());
    }
}
