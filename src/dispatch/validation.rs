//! Request-body validation interceptor.
//!
//! # Responsibilities
//! - Define the external validation capability the dispatcher consumes
//! - Run a route's validation schemas against the request body
//! - Collect distinct error messages across all schemas
//!
//! # Design Decisions
//! - The validation engine itself is out of scope; it is consumed as an
//!   opaque `validate(body, schema) -> message` capability where an
//!   empty message means the body passed
//! - Every schema runs, no short-circuit: the caller sees all
//!   violations in one response instead of one at a time
//! - Duplicate message text collapses, first occurrence wins
//! - A missing body is presented to the validator as JSON null

use futures_util::future::BoxFuture;
use serde_json::Value;

/// The external validation capability.
///
/// Implementations evaluate `body` against `schema` and return an error
/// message, or the empty string when the body is valid.
pub trait Validator: Send + Sync {
    fn validate<'a>(&'a self, body: &'a Value, schema: &'a Value) -> BoxFuture<'a, String>;
}

/// Adapts a synchronous closure into a [`Validator`].
pub struct FnValidator<F>(F);

impl<F> FnValidator<F>
where
    F: Fn(&Value, &Value) -> String + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Validator for FnValidator<F>
where
    F: Fn(&Value, &Value) -> String + Send + Sync,
{
    fn validate<'a>(&'a self, body: &'a Value, schema: &'a Value) -> BoxFuture<'a, String> {
        let message = (self.0)(body, schema);
        Box::pin(async move { message })
    }
}

/// Run every schema in order and collect the distinct error messages.
///
/// Returns an empty vector when the body passes all validations.
pub async fn run_validations(
    validator: &dyn Validator,
    schemas: &[Value],
    body: Option<&Value>,
) -> Vec<String> {
    let body = body.unwrap_or(&Value::Null);
    let mut messages: Vec<String> = Vec::new();
    for schema in schemas {
        let message = validator.validate(body, schema).await;
        if !message.is_empty() && !messages.contains(&message) {
            messages.push(message);
        }
    }
    messages
}
