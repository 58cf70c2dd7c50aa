//! Dispatch pipeline subsystem.
//!
//! # Data Flow
//! ```text
//! IncomingRequest (path, method, body, request id, raw event)
//!     → dispatcher.rs (orchestration)
//!     → routing::registry (resolve route, extract path params)
//!     → validation.rs (run schemas, collect distinct errors)
//!     → normalizer.rs (invoke handler, contain faults, 400/501 mapping)
//!     → cors.rs (decorate resolved-route responses)
//!     → DispatchResponse (status, JSON body, headers, X-Request-ID)
//! ```
//!
//! # Design Decisions
//! - Pipeline order is explicit composition inside `Dispatcher::dispatch`
//! - Handlers and validators are capability traits stored as plain data
//! - Every response carries the correlation header, error paths included
//! - RouteNotFound → 404, ValidationFailed → 400, HandlerFailure → 501

pub mod cors;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod normalizer;
pub mod request;
pub mod response;
pub mod validation;

pub use cors::CorsPolicy;
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, HandlerError};
pub use handler::{Handler, HandlerFuture};
pub use request::{HandlerRequest, IncomingRequest};
pub use response::{DispatchResponse, X_REQUEST_ID};
pub use validation::{FnValidator, Validator};
