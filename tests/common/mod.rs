//! Shared utilities for integration testing.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use serverless_router::config::RouterConfig;
use serverless_router::dispatch::{Dispatcher, FnValidator, Validator};
use serverless_router::routing::RouteRegistry;
use serverless_router::{HttpServer, Shutdown};

/// Spawn a router on an ephemeral loopback port.
///
/// Returns the base URL and the shutdown coordinator keeping the server
/// alive for the duration of the test.
pub async fn spawn_router(
    registry: RouteRegistry,
    validator: Arc<dyn Validator>,
) -> (String, Shutdown) {
    let mut config = RouterConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();

    let dispatcher = Arc::new(Dispatcher::new(Arc::new(registry), validator));
    let listener = tokio::net::TcpListener::bind(&config.listener.bind_address)
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, dispatcher);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Give the listener a moment to start accepting.
    tokio::time::sleep(Duration::from_millis(100)).await;

    (format!("http://{}", addr), shutdown)
}

/// A validator that accepts every body.
#[allow(dead_code)]
pub fn pass_validator() -> Arc<dyn Validator> {
    Arc::new(FnValidator::new(|_: &Value, _: &Value| String::new()))
}
