//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all dispatch handler
//! - Wire up middleware (tracing, timeout, request ID, body limit)
//! - Bind the server to a listener and serve until shutdown
//! - Adapt platform requests into `IncomingRequest` values and
//!   `DispatchResponse` values back into HTTP responses
//!
//! # Design Decisions
//! - The binding is the only place that knows about axum requests; the
//!   dispatch core sees its own types exclusively
//! - The request timeout lives here, not in the core (a hung handler is
//!   the transport's problem)
//! - Responses are serialized as JSON; a handler-set Content-Type wins

use axum::{
    body::Body,
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderValue, Request, StatusCode},
    response::Response,
    routing::any,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::config::RouterConfig;
use crate::dispatch::{DispatchResponse, Dispatcher, IncomingRequest, X_REQUEST_ID};
use crate::http::request::{build_raw_event, parse_body};

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub max_body_size: usize,
}

/// HTTP server binding the dispatcher to the platform.
pub struct HttpServer {
    router: Router,
    config: RouterConfig,
}

impl HttpServer {
    /// Create a new HTTP server around a dispatcher.
    pub fn new(config: RouterConfig, dispatcher: Arc<Dispatcher>) -> Self {
        let state = AppState {
            dispatcher,
            max_body_size: config.security.max_body_size,
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RouterConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    )))
                    .layer(DefaultBodyLimit::max(config.security.max_body_size)),
            )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }
}

/// Catch-all handler: adapt the platform request and hand it to the
/// dispatcher.
async fn dispatch_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Response {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, state.max_body_size).await {
        Ok(bytes) => bytes,
        Err(_) => {
            return into_http(
                DispatchResponse::message(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "request body too large",
                )
                .with_request_id(&request_id),
            );
        }
    };
    let body = match parse_body(&bytes) {
        Ok(body) => body,
        Err(_) => {
            tracing::debug!(request_id = %request_id, "Rejecting non-JSON request body");
            return into_http(
                DispatchResponse::message(
                    StatusCode::BAD_REQUEST,
                    "request body is not valid JSON",
                )
                .with_request_id(&request_id),
            );
        }
    };

    let raw_event = build_raw_event(&parts, &request_id);
    let incoming = IncomingRequest {
        path: parts.uri.path().to_string(),
        method: parts.method,
        body,
        request_id,
        raw_event,
    };

    into_http(state.dispatcher.dispatch(incoming).await)
}

/// Serialize a dispatch response onto the wire.
fn into_http(response: DispatchResponse) -> Response {
    let has_body = !response.body.is_null();
    let body = if has_body {
        Body::from(response.body.to_string())
    } else {
        Body::empty()
    };

    let mut http_response = Response::new(body);
    *http_response.status_mut() = response.status;
    *http_response.headers_mut() = response.headers;
    if has_body {
        http_response
            .headers_mut()
            .entry(header::CONTENT_TYPE)
            .or_insert(HeaderValue::from_static("application/json"));
    }
    http_response
}

/// Wait for shutdown: Ctrl+C or the coordinator's broadcast.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if result.is_ok() {
                tracing::info!("Shutdown signal received");
            }
        }
        _ = shutdown.recv() => {
            tracing::info!("Shutdown triggered");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_into_http_serializes_json_body() {
        let response = into_http(DispatchResponse::ok(json!({ "a": 1 })).with_request_id("r"));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(response.headers().get(X_REQUEST_ID).unwrap(), "r");
    }

    #[test]
    fn test_into_http_null_body_is_empty() {
        let response = into_http(DispatchResponse::new(StatusCode::NO_CONTENT));
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_handler_set_content_type_wins() {
        let response = into_http(
            DispatchResponse::ok(json!("hello")).with_header("content-type", "text/plain"),
        );
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain"
        );
    }
}
