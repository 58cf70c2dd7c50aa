//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Register routes → Freeze registry → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight dispatches → Exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then registry, then listener
//! - Registration must complete before the first request is served
//! - Shutdown is a broadcast; every long-running task subscribes

pub mod shutdown;

pub use shutdown::Shutdown;
