//! # intake-axum — Validated Request Surface
//!
//! The axum integration for the intake toolkit. Two variants over the same
//! validation core:
//!
//! - **Pipe** — [`ValidatedJson`], [`ValidatedQuery`], [`ValidatedParams`]:
//!   extractors that validate a request source against a DTO's declared
//!   schema and hand the handler the parsed, typed value.
//! - **Guard** — [`ValidationGuard`]: middleware that gates a request on a
//!   schema without transforming it.
//!
//! Validation failure always surfaces to the client as the fixed shape
//! `{ "statusCode": 400, "message": "Validation failed", "errors": [...] }`
//! ([`ValidationException`]); it is never retried and never swallowed —
//! input correctness is a client signal, not a transient fault.
//!
//! ```ignore
//! async fn create_post(ValidatedJson(post): ValidatedJson<CreatePost>) -> Json<Post> {
//!     // `post` is validated and typed.
//! }
//! ```
//!
//! ## Crate Policy
//!
//! - No business logic here: schema semantics live in `intake-core`; this
//!   crate only adapts them to the request lifecycle.
//! - All failure paths map to structured responses; nothing panics on
//!   client input.

pub mod exception;
pub mod extract;
pub mod guard;
pub mod source;

pub use exception::{ValidationException, ValidationRejection};
pub use extract::{ValidatedJson, ValidatedParams, ValidatedQuery};
pub use guard::{ExceptionFactory, ValidationGuard};
pub use source::Source;
