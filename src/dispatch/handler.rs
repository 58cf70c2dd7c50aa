//! The handler capability.
//!
//! # Responsibilities
//! - Define the single operation every registered handler implements
//! - Adapt plain async functions and closures into that capability
//!
//! # Design Decisions
//! - Handlers are stored in the registry as plain `Arc<dyn Handler>`
//!   data, not language-level method bindings
//! - The future is boxed so routes stay homogeneous values; handlers
//!   run rarely enough that the allocation is irrelevant

use futures_util::future::BoxFuture;
use std::future::Future;

use crate::dispatch::error::HandlerError;
use crate::dispatch::request::HandlerRequest;
use crate::dispatch::response::DispatchResponse;

/// The future a handler invocation returns.
pub type HandlerFuture = BoxFuture<'static, Result<DispatchResponse, HandlerError>>;

/// A registered request handler: one async operation from request to
/// response.
pub trait Handler: Send + Sync {
    fn call(&self, request: HandlerRequest) -> HandlerFuture;
}

/// Any `Fn(HandlerRequest) -> impl Future<Output = Result<..>>` is a
/// handler, so routes can be registered with async closures directly.
impl<F, Fut> Handler for F
where
    F: Fn(HandlerRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<DispatchResponse, HandlerError>> + Send + 'static,
{
    fn call(&self, request: HandlerRequest) -> HandlerFuture {
        Box::pin(self(request))
    }
}
