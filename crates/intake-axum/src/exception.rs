//! # Structured Validation Exception
//!
//! Maps validation failure to the fixed HTTP error shape:
//!
//! ```json
//! { "statusCode": 400, "message": "Validation failed", "errors": [ ... ] }
//! ```
//!
//! The exception is immutable once constructed and exposes the original
//! issue sequence for programmatic inspection by error-handling layers.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;

use intake_core::{Issue, IssueCode};

/// Carries the raw issue sequence and renders the stable JSON error shape.
#[derive(Debug, Clone)]
pub struct ValidationException {
    status: StatusCode,
    message: String,
    issues: Vec<Issue>,
}

impl ValidationException {
    /// Wrap an issue sequence with the default summary and status 400.
    pub fn new(issues: Vec<Issue>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "Validation failed".to_string(),
            issues,
        }
    }

    /// Override the summary line, keeping the shape and status.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// The HTTP status the exception renders with.
    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    /// The summary line.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The original issue sequence, in evaluation order.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// The serialized body shape.
    pub fn to_body(&self) -> Value {
        json!({
            "statusCode": self.status.as_u16(),
            "message": self.message,
            "errors": self.issues,
        })
    }
}

impl fmt::Display for ValidationException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} issue(s))", self.message, self.issues.len())
    }
}

impl IntoResponse for ValidationException {
    fn into_response(self) -> Response {
        let body = self.to_body();
        (self.status, Json(body)).into_response()
    }
}

/// Rejection raised by the validated extractors.
#[derive(Debug, Error)]
pub enum ValidationRejection {
    /// The payload could not be read or parsed at all (I/O, syntax,
    /// content type). Rendered as the structured shape with one
    /// root-path issue, so clients see a single error dialect.
    #[error("malformed request payload: {0}")]
    Malformed(String),

    /// The payload parsed but violated the schema.
    #[error("request validation failed with {} issue(s)", .0.issues().len())]
    Invalid(ValidationException),

    /// The validated value does not deserialize into the DTO type: the
    /// Rust type and its declared schema disagree. A developer mistake,
    /// rendered as a bare 500.
    #[error("validated value does not decode into the DTO type: {0}")]
    Decode(String),
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        match self {
            ValidationRejection::Malformed(message) => {
                let issue = Issue::new(IssueCode::Custom("malformed_payload".to_string()), message);
                ValidationException::new(vec![issue]).into_response()
            }
            ValidationRejection::Invalid(exception) => exception.into_response(),
            ValidationRejection::Decode(message) => {
                tracing::error!(error = %message, "DTO type and declared schema disagree");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "statusCode": 500,
                        "message": "Internal Server Error",
                    })),
                )
                    .into_response()
            }
        }
    }
}
