//! # intake-openapi — Documentation Converter
//!
//! Walks an `intake-core` schema and emits the equivalent documentation
//! object in the conventional API-schema dialect (`type` / `properties` /
//! `items` / `required` / `enum` / `format` / `description` /
//! `additionalProperties`), ready for the host framework's
//! documentation-generation module.
//!
//! Conversion happens at documentation-generation time, independent of the
//! request flow: no caching, no shared state, deterministic output for a
//! given schema.
//!
//! ## Crate Policy
//!
//! - Depends only on `intake-core` internally.
//! - Conversion is total over [`SchemaKind`](intake_core::SchemaKind):
//!   every kind maps to a defined node shape or to an explicit
//!   unsupported marker. Wrong documentation is worse than visibly
//!   missing documentation.

pub mod convert;
pub mod node;

pub use convert::{document, to_documentation};
pub use node::{DocNode, DocType};
