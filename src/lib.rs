//! Serverless endpoint registry and dispatcher.
//!
//! Handlers are registered against path patterns during an explicit
//! startup phase; a frozen registry then resolves each incoming request
//! to the single best-matching handler, runs request-body validation,
//! invokes the handler, and normalizes the result with a correlation
//! header, CORS metadata and standardized error responses.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────┐
//!                    │               SERVERLESS ROUTER                 │
//!                    │                                                 │
//!   Request          │  ┌─────────┐    ┌──────────┐    ┌───────────┐  │
//!   ─────────────────┼─▶│  http   │───▶│ dispatch │───▶│  routing  │  │
//!                    │  │ binding │    │ pipeline │    │ registry  │  │
//!                    │  └─────────┘    └────┬─────┘    └───────────┘  │
//!                    │                      │                         │
//!                    │                      ▼                         │
//!                    │   validate → invoke handler → normalize        │
//!                    │            → CORS decorate                     │
//!                    │                      │                         │
//!   Response         │  ┌─────────┐        │                         │
//!   ◀────────────────┼──│  http   │◀───────┘                         │
//!                    │  │ binding │                                   │
//!                    │  └─────────┘                                   │
//!                    │                                                 │
//!                    │  ┌──────────────────────────────────────────┐  │
//!                    │  │        Cross-Cutting Concerns             │  │
//!                    │  │  config   observability   lifecycle       │  │
//!                    │  └──────────────────────────────────────────┘  │
//!                    └────────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod dispatch;
pub mod routing;

// Outer surface
pub mod config;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::RouterConfig;
pub use dispatch::{
    CorsPolicy, DispatchResponse, Dispatcher, FnValidator, HandlerError, HandlerRequest,
    IncomingRequest, Validator, X_REQUEST_ID,
};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{RegistryBuilder, Route, RouteRegistry};
