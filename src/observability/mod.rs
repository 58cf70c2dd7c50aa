//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher and binding produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging; the request id flows through every event
//! - Metrics are cheap (atomic increments) and labeled by method,
//!   status and route pattern

pub mod logging;
pub mod metrics;
