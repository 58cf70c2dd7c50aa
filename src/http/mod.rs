//! HTTP transport binding subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, catch-all route)
//!     → request.rs (JSON body parse, raw event assembly)
//!     → dispatch::Dispatcher (resolve, validate, invoke, normalize)
//!     → server.rs (DispatchResponse → HTTP response)
//!     → Send to client
//! ```

pub mod request;
pub mod server;

pub use server::HttpServer;
