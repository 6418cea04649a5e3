//! # intake-core — Declarative Request-Payload Schemas
//!
//! The foundation of the intake toolkit. Applications declare a validation
//! schema once and derive runtime validators, typed DTOs, and (via
//! `intake-openapi`) API-documentation objects from the same declaration.
//!
//! ## Key Design Principles
//!
//! 1. **Closed tagged-variant schema model.** Supported node kinds are one
//!    enum ([`SchemaKind`]); every consumer matches exhaustively. No dynamic
//!    introspection, no silent fallthrough.
//!
//! 2. **Failure is a value.** [`validate`] returns `Result<Value, Vec<Issue>>`;
//!    expected validation failure never panics and is never thrown across the
//!    call boundary. Each [`Issue`] carries a machine-readable code, the exact
//!    path into the input, and constraint-specific parameters.
//!
//! 3. **Immutable builders.** Schema constructors and the date-string chain
//!    consume and return values; a finished schema is `Send + Sync` and
//!    shared across concurrent requests without coordination.
//!
//! 4. **Configuration errors fail at setup.** Ill-formed declarations are
//!    reported by [`Schema::ensure_well_formed`] as [`SchemaError`] — once,
//!    at startup, never per-request.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `intake-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All operations are synchronous, pure, and stateless across calls.

pub mod datestring;
pub mod dto;
pub mod error;
pub mod issue;
pub mod schema;
pub mod validate;

pub use datestring::{
    is_date_string_issue, DateStringFormat, DateStringPayload, DateStringSchema,
};
pub use dto::{parse_dto, Dto, DtoError};
pub use error::SchemaError;
pub use issue::{Issue, IssueCode, PathSegment};
pub use schema::{Schema, SchemaKind};
pub use validate::validate;
