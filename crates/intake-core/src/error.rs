//! # Schema Configuration Errors
//!
//! Errors raised when a schema declaration itself is ill-formed. These are
//! developer mistakes, not client-input failures: they are surfaced once at
//! setup time via [`Schema::ensure_well_formed`](crate::Schema::ensure_well_formed)
//! (or guard construction in the surface crates), never per-request.
//!
//! ## Design
//!
//! - Client-input failures are represented as [`Issue`](crate::Issue) values
//!   and never pass through this type.
//! - Each variant names the offending constraint and carries the concrete
//!   declared values, so startup logs point straight at the bad declaration.

use thiserror::Error;

/// An ill-formed schema declaration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// String length bounds exclude every value.
    #[error("string length bounds are inverted: min_length {min} > max_length {max}")]
    InvertedLengthBounds {
        /// Declared minimum length.
        min: usize,
        /// Declared maximum length.
        max: usize,
    },

    /// Numeric bounds exclude every value.
    #[error("numeric bounds are inverted: minimum {min} > maximum {max}")]
    InvertedValueBounds {
        /// Declared minimum.
        min: f64,
        /// Declared maximum.
        max: f64,
    },

    /// Calendar year bounds exclude every date.
    #[error("year bounds are inverted: min_year {min} > max_year {max}")]
    InvertedYearBounds {
        /// Declared minimum year.
        min: i32,
        /// Declared maximum year.
        max: i32,
    },

    /// An enum schema with no variants can never validate.
    #[error("enum schema declares no variants")]
    EmptyEnum,

    /// The same field name was declared twice on one object schema.
    #[error("object schema declares duplicate field {0:?}")]
    DuplicateField(String),

    /// A constraint method was applied to a schema kind it does not support
    /// (e.g. `min_length` on a number schema).
    #[error("constraint `{constraint}` does not apply to a {kind} schema")]
    MisappliedConstraint {
        /// The constraint method that was called.
        constraint: &'static str,
        /// The schema kind it was called on.
        kind: &'static str,
    },

    /// Two chained date-string refinements that no value can satisfy together.
    #[error("date-string chain combines `{first}` with `{second}`, which no value satisfies")]
    ConflictingDateChecks {
        /// The earlier refinement in the chain.
        first: &'static str,
        /// The contradicting refinement.
        second: &'static str,
    },
}
