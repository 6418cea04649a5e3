//! # DTO Binding
//!
//! Binds a validation schema to a concrete Rust payload type. The trait is
//! the factory: implementing [`Dto`] for a struct declares "this type's
//! instances are exactly the values accepted by this schema", and the
//! surface crates introspect the binding to validate before deserializing.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::issue::Issue;
use crate::schema::Schema;
use crate::validate::validate;

/// A payload type bound to a validation schema.
///
/// `schema()` must be pure and idempotent: every call builds a fresh,
/// behaviorally identical schema. Two types may bind the same schema and
/// remain independent identities.
pub trait Dto: DeserializeOwned {
    /// The schema instances of this type are validated against.
    fn schema() -> Schema;
}

/// Failure to produce a DTO from raw input.
#[derive(Error, Debug)]
pub enum DtoError {
    /// The input violated the schema. Carries the ordered issue sequence.
    #[error("validation failed with {} issue(s)", .0.len())]
    Invalid(Vec<Issue>),

    /// The validated value does not deserialize into the target type —
    /// the Rust type and its declared schema disagree. A developer
    /// mistake, not a client error.
    #[error("validated value does not decode into the DTO type: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Validate `input` against `T`'s schema, then deserialize into `T`.
///
/// # Errors
///
/// [`DtoError::Invalid`] for client input violating the schema;
/// [`DtoError::Decode`] when the type and schema disagree.
pub fn parse_dto<T: Dto>(input: &Value) -> Result<T, DtoError> {
    let validated = validate(&T::schema(), input).map_err(DtoError::Invalid)?;
    serde_json::from_value(validated).map_err(DtoError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct CreatePost {
        title: String,
        views: Option<u32>,
    }

    impl Dto for CreatePost {
        fn schema() -> Schema {
            Schema::object([
                ("title", Schema::string().min_length(1)),
                ("views", Schema::number().integer().minimum(0.0).optional()),
            ])
        }
    }

    #[test]
    fn test_parse_dto_returns_typed_value() {
        let post: CreatePost = parse_dto(&json!({ "title": "hi", "views": 2 })).unwrap();
        assert_eq!(
            post,
            CreatePost {
                title: "hi".to_string(),
                views: Some(2)
            }
        );
    }

    #[test]
    fn test_optional_field_maps_to_none() {
        let post: CreatePost = parse_dto(&json!({ "title": "hi" })).unwrap();
        assert_eq!(post.views, None);
    }

    #[test]
    fn test_invalid_input_carries_issues() {
        let err = parse_dto::<CreatePost>(&json!({ "title": "" })).unwrap_err();
        let DtoError::Invalid(issues) = err else {
            panic!("expected Invalid");
        };
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn test_schema_is_idempotent() {
        // Two calls produce independent but behaviorally identical schemas.
        let a = CreatePost::schema();
        let b = CreatePost::schema();
        let input = json!({ "title": "hi" });
        assert_eq!(
            crate::validate::validate(&a, &input).is_ok(),
            crate::validate::validate(&b, &input).is_ok()
        );
    }

    #[test]
    fn test_type_schema_disagreement_is_decode_error() {
        #[derive(Debug, Deserialize)]
        struct Mismatched {
            #[allow(dead_code)]
            count: u32,
        }
        impl Dto for Mismatched {
            fn schema() -> Schema {
                // Declares a string where the type wants a number.
                Schema::object([("count", Schema::string())])
            }
        }
        let err = parse_dto::<Mismatched>(&json!({ "count": "three" })).unwrap_err();
        assert!(matches!(err, DtoError::Decode(_)));
    }
}
