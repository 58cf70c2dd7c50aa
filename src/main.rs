//! Serverless router binary.
//!
//! Startup order: logging, config, metrics, route registration (the
//! explicit phase that ends with a frozen registry), listener, serve.

use std::sync::Arc;

use axum::http::Method;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use serverless_router::dispatch::{
    CorsPolicy, DispatchResponse, Dispatcher, FnValidator, HandlerRequest, Validator,
};
use serverless_router::routing::{RegistryBuilder, Route, RouteRegistry};
use serverless_router::{config, observability, HttpServer, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load_or_default()?;

    observability::logging::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "serverless-router starting"
    );
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.security.max_body_size,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(_) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    // Registration phase: the registry is frozen before the listener
    // accepts its first connection.
    let registry = Arc::new(build_registry());
    let validator: Arc<dyn Validator> = Arc::new(required_fields_validator());
    let dispatcher = Arc::new(Dispatcher::new(registry, validator));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, dispatcher);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Register the bundled routes.
fn build_registry() -> RouteRegistry {
    RegistryBuilder::new()
        .route(Route::new("/status", Method::GET, |_req: HandlerRequest| async move {
            Ok(DispatchResponse::ok(json!({
                "version": env!("CARGO_PKG_VERSION"),
                "status": "operational",
            })))
        }))
        .route(Route::new(
            "/users/{id}",
            Method::GET,
            |req: HandlerRequest| async move {
                Ok(DispatchResponse::ok(json!({
                    "id": req.path_param("id"),
                })))
            },
        ))
        .route(
            Route::new("/users", Method::POST, |req: HandlerRequest| async move {
                Ok(DispatchResponse::new(axum::http::StatusCode::CREATED)
                    .with_body(json!({ "created": req.body() })))
            })
            .with_validation(json!({ "required": ["name"] }))
            .with_validation(json!({ "required": ["email"] }))
            .with_cors(
                CorsPolicy::new("*").with_methods(vec![Method::GET, Method::POST]),
            ),
        )
        // Bulk submissions take precedence over the plain order route.
        .route(
            Route::new("/orders", Method::POST, |req: HandlerRequest| async move {
                let count = req.body()["items"].as_array().map_or(0, Vec::len);
                Ok(DispatchResponse::ok(json!({ "accepted": count, "mode": "bulk" })))
            })
            .with_condition(|body: &Value, _: &Value| body["kind"] == "bulk")
            .with_priority(10),
        )
        .route(Route::new(
            "/orders",
            Method::POST,
            |_req: HandlerRequest| async move {
                Ok(DispatchResponse::ok(json!({ "accepted": 1, "mode": "single" })))
            },
        ))
        .build()
}

/// The bundled validator: each schema names required top-level fields.
fn required_fields_validator() -> FnValidator<impl Fn(&Value, &Value) -> String + Send + Sync> {
    FnValidator::new(|body: &Value, schema: &Value| {
        let required = schema["required"].as_array().cloned().unwrap_or_default();
        let missing: Vec<&str> = required
            .iter()
            .filter_map(Value::as_str)
            .filter(|field| body.get(field).is_none())
            .collect();
        if missing.is_empty() {
            String::new()
        } else {
            format!("missing required field: {}", missing.join(", "))
        }
    })
}
