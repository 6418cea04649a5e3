//! # Validation Guard (Guard Variant)
//!
//! A request gate: validates one input source against a configured schema
//! and either lets the unmodified request proceed or responds with the
//! structured error. Unlike the pipe extractors, the guard never
//! transforms input — downstream extractors see the request exactly as it
//! arrived (unknown keys included).
//!
//! The exception-construction step is a strategy parameter: supply an
//! [`ExceptionFactory`] to substitute a different error shape without
//! touching validation logic.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::{FromRequestParts, Query, RawPathParams, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use intake_core::{validate, Issue, IssueCode, Schema, SchemaError};

use crate::exception::ValidationException;
use crate::source::Source;

/// Caller-supplied strategy turning an issue sequence into a response.
pub type ExceptionFactory = Arc<dyn Fn(Vec<Issue>) -> Response + Send + Sync>;

/// Gate requests on a schema without transforming them.
///
/// Cheap to clone; one guard value serves concurrent requests. Wire it
/// through `axum::middleware::from_fn`:
///
/// ```ignore
/// let guard = ValidationGuard::new(schema)?;
/// let app = Router::new()
///     .route("/posts", post(create_post))
///     .layer(middleware::from_fn(move |req, next| {
///         let guard = guard.clone();
///         async move { guard.check(req, next).await }
///     }));
/// ```
#[derive(Clone)]
pub struct ValidationGuard {
    schema: Arc<Schema>,
    source: Source,
    factory: Option<ExceptionFactory>,
}

impl std::fmt::Debug for ValidationGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationGuard")
            .field("schema", &self.schema)
            .field("source", &self.source)
            .field("factory", &self.factory.as_ref().map(|_| "<factory>"))
            .finish()
    }
}

impl ValidationGuard {
    /// Build a guard over `schema`, gating the request body by default.
    ///
    /// The schema is audited here: configuration errors surface at setup
    /// time, not per-request.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found in the declaration.
    pub fn new(schema: Schema) -> Result<Self, SchemaError> {
        schema.ensure_well_formed()?;
        Ok(Self {
            schema: Arc::new(schema),
            source: Source::Body,
            factory: None,
        })
    }

    /// Select which request input the guard validates.
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    /// Substitute the exception-construction step.
    pub fn with_exception_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(Vec<Issue>) -> Response + Send + Sync + 'static,
    {
        self.factory = Some(Arc::new(factory));
        self
    }

    /// Middleware entry point: validate the configured source, then pass
    /// the request through or respond with the structured error.
    pub async fn check(&self, req: Request, next: Next) -> Response {
        match self.source {
            Source::Body => self.check_body(req, next).await,
            Source::Query => self.check_query(req, next).await,
            Source::Params => self.check_params(req, next).await,
        }
    }

    async fn check_body(&self, req: Request, next: Next) -> Response {
        let (parts, body) = req.into_parts();
        let bytes = match to_bytes(body, usize::MAX).await {
            Ok(bytes) => bytes,
            Err(err) => {
                return self.reject(vec![malformed(format!(
                    "Failed to read request body: {err}"
                ))]);
            }
        };
        let raw: Value = match serde_json::from_slice(&bytes) {
            Ok(raw) => raw,
            Err(err) => return self.reject(vec![malformed(format!("JSON syntax error: {err}"))]),
        };
        if let Err(issues) = validate(&self.schema, &raw) {
            return self.reject(issues);
        }
        // Gate, don't transform: the original bytes flow downstream.
        let req = Request::from_parts(parts, Body::from(bytes));
        next.run(req).await
    }

    async fn check_query(&self, req: Request, next: Next) -> Response {
        let raw = match Query::<HashMap<String, String>>::try_from_uri(req.uri()) {
            Ok(Query(pairs)) => Value::Object(
                pairs
                    .into_iter()
                    .map(|(key, value)| (key, Value::String(value)))
                    .collect(),
            ),
            Err(rejection) => return self.reject(vec![malformed(rejection.body_text())]),
        };
        if let Err(issues) = validate(&self.schema, &raw) {
            return self.reject(issues);
        }
        next.run(req).await
    }

    async fn check_params(&self, req: Request, next: Next) -> Response {
        let (mut parts, body) = req.into_parts();
        let raw = match RawPathParams::from_request_parts(&mut parts, &()).await {
            Ok(params) => Value::Object(
                params
                    .iter()
                    .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
                    .collect(),
            ),
            Err(rejection) => return self.reject(vec![malformed(rejection.body_text())]),
        };
        let req = Request::from_parts(parts, body);
        if let Err(issues) = validate(&self.schema, &raw) {
            return self.reject(issues);
        }
        next.run(req).await
    }

    fn reject(&self, issues: Vec<Issue>) -> Response {
        tracing::warn!(
            source = %self.source,
            issues = issues.len(),
            "request gated by validation guard"
        );
        match &self.factory {
            Some(factory) => factory(issues),
            None => ValidationException::new(issues).into_response(),
        }
    }
}

fn malformed(message: String) -> Issue {
    Issue::new(IssueCode::Custom("malformed_payload".to_string()), message)
}
