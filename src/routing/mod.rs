//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, method, body, event)
//!     → registry.rs (filter by method, structural match, conditions)
//!     → pattern.rs (segment matching, param extraction)
//!     → Return: RouteMatch or None
//!
//! Route Registration (at startup):
//!     Route builders
//!     → Compile path patterns
//!     → RegistryBuilder::build()
//!     → Freeze as immutable RouteRegistry
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, immutable at runtime
//! - No regex in hot path (segment matching only)
//! - Deterministic: same input always resolves to the same route
//! - Overlaps resolved by priority, then registration order

pub mod pattern;
pub mod registry;

pub use pattern::{PathParams, PathPattern};
pub use registry::{Condition, RegistryBuilder, Route, RouteMatch, RouteRegistry};
