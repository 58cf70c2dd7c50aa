//! Response normalization around handler invocation.
//!
//! # Responsibilities
//! - Short-circuit to 400 when validation rejected the body
//! - Invoke the resolved handler and await its completion
//! - Contain handler faults (returned errors and panics) as 501
//! - Guarantee the correlation header on every outgoing response
//!
//! # Design Decisions
//! - The handler is never called when validation failed
//! - A panic unwinding out of a handler future is caught and surfaced
//!   like a returned error; handler faults never abort the process
//! - The normalizer owns the correlation-header contract so no caller
//!   can produce a response without it

use futures_util::FutureExt;
use std::panic::AssertUnwindSafe;

use crate::dispatch::error::{DispatchError, HandlerError};
use crate::dispatch::request::{HandlerRequest, IncomingRequest};
use crate::dispatch::response::DispatchResponse;
use crate::routing::{PathParams, Route};

/// Run the resolved route's handler (unless validation failed) and
/// normalize whatever comes out of it.
pub async fn normalize(
    route: &Route,
    path_params: PathParams,
    request: IncomingRequest,
    validation_errors: Vec<String>,
) -> DispatchResponse {
    let request_id = request.request_id.clone();

    if !validation_errors.is_empty() {
        tracing::debug!(
            request_id = %request_id,
            route = %route.pattern(),
            errors = validation_errors.len(),
            "Request body rejected by validation"
        );
        return DispatchError::Validation(validation_errors).into_response(&request_id);
    }

    let handler_request = HandlerRequest {
        request,
        path_params,
    };
    let invocation = AssertUnwindSafe(route.handler().call(handler_request)).catch_unwind();

    match invocation.await {
        Ok(Ok(response)) => response.with_request_id(&request_id),
        Ok(Err(err)) => {
            tracing::warn!(
                request_id = %request_id,
                route = %route.pattern(),
                error = %err,
                "Handler failed"
            );
            DispatchError::Handler(err).into_response(&request_id)
        }
        Err(panic) => {
            let err = HandlerError(panic_message(panic));
            tracing::error!(
                request_id = %request_id,
                route = %route.pattern(),
                error = %err,
                "Handler panicked"
            );
            DispatchError::Handler(err).into_response(&request_id)
        }
    }
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}
