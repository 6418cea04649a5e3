//! # Validated Extractors (Pipe Variant)
//!
//! Drop-in replacements for axum's extractors that validate against a
//! DTO's declared schema before deserializing. On success the handler
//! receives the parsed DTO; on failure the request is rejected with the
//! structured 400 shape. The extractor resolves the schema from the DTO
//! type bound at the handler parameter — declare once, validate per
//! request.

use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Query, RawPathParams, Request};
use axum::http::request::Parts;
use axum::Json;
use serde_json::Value;

use intake_core::{parse_dto, Dto, DtoError};

use crate::exception::{ValidationException, ValidationRejection};
use crate::source::Source;

/// Validate and deserialize a raw value into a DTO, mapping failures to
/// the rejection taxonomy. Shared by all pipe extractors.
pub(crate) fn run_pipe<T: Dto>(raw: &Value, source: Source) -> Result<T, ValidationRejection> {
    match parse_dto::<T>(raw) {
        Ok(dto) => {
            tracing::debug!(source = %source, "request payload validated");
            Ok(dto)
        }
        Err(DtoError::Invalid(issues)) => {
            tracing::warn!(source = %source, issues = issues.len(), "request validation failed");
            Err(ValidationRejection::Invalid(ValidationException::new(issues)))
        }
        Err(DtoError::Decode(err)) => Err(ValidationRejection::Decode(err.to_string())),
    }
}

/// JSON body, validated against `T`'s schema.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: Dto + Send,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let message = match rejection {
                    JsonRejection::JsonDataError(e) => {
                        format!("Invalid JSON data: {}", e.body_text())
                    }
                    JsonRejection::JsonSyntaxError(e) => {
                        format!("JSON syntax error: {}", e.body_text())
                    }
                    JsonRejection::MissingJsonContentType(_) => {
                        "Content-Type must be application/json".to_string()
                    }
                    JsonRejection::BytesRejection(_) => {
                        "Failed to read request body".to_string()
                    }
                    other => other.body_text(),
                };
                ValidationRejection::Malformed(message)
            })?;
        run_pipe(&raw, Source::Body).map(ValidatedJson)
    }
}

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> std::ops::DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Query string, decoded to string pairs and validated against `T`'s
/// schema. Query values arrive as strings; schemas for this source
/// declare string-kind fields.
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: Dto + Send,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map_err(|rejection| ValidationRejection::Malformed(rejection.body_text()))?;
        let raw = Value::Object(
            pairs
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect(),
        );
        run_pipe(&raw, Source::Query).map(ValidatedQuery)
    }
}

impl<T> std::ops::Deref for ValidatedQuery<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Matched path parameters, validated against `T`'s schema. Like the
/// query source, values arrive as strings.
pub struct ValidatedParams<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedParams<T>
where
    T: Dto + Send,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = RawPathParams::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ValidationRejection::Malformed(rejection.body_text()))?;
        let raw = Value::Object(
            params
                .iter()
                .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
                .collect(),
        );
        run_pipe(&raw, Source::Params).map(ValidatedParams)
    }
}

impl<T> std::ops::Deref for ValidatedParams<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
