//! Route registration and resolution.
//!
//! # Responsibilities
//! - Hold every registered route as plain, immutable data
//! - Resolve an incoming (path, method, body, event) to the single
//!   best-matching route
//! - Break ties among overlapping candidates deterministically
//!
//! # Design Decisions
//! - Registration happens through an explicit builder during startup;
//!   `build()` freezes the set before the first request is served
//! - Duplicate (pattern, method) registrations are legal and resolved at
//!   request time, never at registration time
//! - Selection order: condition filter, then priority descending, then
//!   registration order ascending. The matcher does no implicit
//!   specificity ranking; priority is the explicit override for
//!   overlapping patterns
//! - Resolution is a pure read over the frozen set, so concurrent
//!   dispatches need no locking

use axum::http::Method;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::dispatch::cors::CorsPolicy;
use crate::dispatch::handler::Handler;
use crate::routing::pattern::{PathParams, PathPattern};

/// A predicate deciding whether a route applies to a given request.
pub trait Condition: Send + Sync {
    fn applies(&self, body: &Value, raw_event: &Value) -> bool;
}

impl<F> Condition for F
where
    F: Fn(&Value, &Value) -> bool + Send + Sync,
{
    fn applies(&self, body: &Value, raw_event: &Value) -> bool {
        self(body, raw_event)
    }
}

/// One registered route: pattern, method, handler and the optional
/// condition, priority, validations and CORS policy.
pub struct Route {
    pattern: PathPattern,
    method: Method,
    handler: Arc<dyn Handler>,
    condition: Option<Arc<dyn Condition>>,
    priority: i32,
    validations: Vec<Value>,
    cors: Option<CorsPolicy>,
}

impl Route {
    pub fn new(pattern: impl Into<String>, method: Method, handler: impl Handler + 'static) -> Self {
        Self {
            pattern: PathPattern::parse(pattern),
            method,
            handler: Arc::new(handler),
            condition: None,
            priority: 0,
            validations: Vec::new(),
            cors: None,
        }
    }

    /// Restrict the route to requests the predicate accepts.
    pub fn with_condition(mut self, condition: impl Condition + 'static) -> Self {
        self.condition = Some(Arc::new(condition));
        self
    }

    /// Override the resolution priority (higher wins; default 0).
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Append a validation schema. Repeatable; schemas run in the order
    /// they were added.
    pub fn with_validation(mut self, schema: Value) -> Self {
        self.validations.push(schema);
        self
    }

    /// Attach a CORS policy applied to every response of this route.
    pub fn with_cors(mut self, policy: CorsPolicy) -> Self {
        self.cors = Some(policy);
        self
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn validations(&self) -> &[Value] {
        &self.validations
    }

    pub fn cors(&self) -> Option<&CorsPolicy> {
        self.cors.as_ref()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern.as_str())
            .field("method", &self.method)
            .field("priority", &self.priority)
            .field("conditioned", &self.condition.is_some())
            .field("validations", &self.validations.len())
            .finish()
    }
}

/// A resolved route plus the path parameters its pattern captured.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub path_params: PathParams,
}

/// Collects routes during the startup registration phase.
#[derive(Default)]
pub struct RegistryBuilder {
    routes: Vec<Route>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route. Never overwrites, never deduplicates.
    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Freeze the registered set. No registration after this point.
    pub fn build(self) -> RouteRegistry {
        tracing::info!(routes = self.routes.len(), "Route registry frozen");
        RouteRegistry {
            routes: self.routes,
        }
    }
}

/// The immutable, process-wide route set.
pub struct RouteRegistry {
    routes: Vec<Route>,
}

impl RouteRegistry {
    /// Resolve a request to the best-matching route.
    ///
    /// Returns `None` when no route matches path, method and condition
    /// set, including when the registry is empty.
    pub fn resolve(
        &self,
        path: &str,
        method: &Method,
        body: Option<&Value>,
        raw_event: &Value,
    ) -> Option<RouteMatch<'_>> {
        let body = body.unwrap_or(&Value::Null);
        let mut best: Option<(&Route, PathParams)> = None;

        for route in &self.routes {
            if route.method != *method {
                continue;
            }
            let Some(params) = route.pattern.match_path(path) else {
                continue;
            };
            if let Some(condition) = &route.condition {
                if !condition.applies(body, raw_event) {
                    continue;
                }
            }
            // Strictly-greater keeps the first-registered route on ties.
            match &best {
                Some((current, _)) if route.priority <= current.priority => {}
                _ => best = Some((route, params)),
            }
        }

        best.map(|(route, path_params)| RouteMatch { route, path_params })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
