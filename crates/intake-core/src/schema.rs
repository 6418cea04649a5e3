//! # Schema Model — Closed Tagged-Variant Declarations
//!
//! An immutable, declarative description of the expected shape and
//! constraints of a value. The supported node kinds form a closed enum
//! ([`SchemaKind`]) so every consumer — the validation engine, the
//! documentation converter — matches exhaustively; adding a kind forces
//! every consumer to handle it at compile time.
//!
//! ## Construction
//!
//! Schemas are built with chainable consuming methods:
//!
//! ```
//! use intake_core::Schema;
//!
//! let schema = Schema::object([
//!     ("title", Schema::string().min_length(1)),
//!     ("views", Schema::number().integer().minimum(0.0).optional()),
//! ]);
//! ```
//!
//! Applying a constraint to a kind that does not support it (for example
//! `min_length` on a number) is recorded and reported by
//! [`Schema::ensure_well_formed`] — a configuration error surfaced at
//! setup time, never per-request.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::datestring::DateStringSchema;
use crate::error::SchemaError;

/// A declarative description of expected shape and constraints.
///
/// Carries kind-independent metadata (optionality, description) alongside
/// the kind-specific constraint set. Immutable once built and `Send + Sync`,
/// so one schema value serves concurrent validations without coordination.
#[derive(Debug, Clone)]
pub struct Schema {
    kind: SchemaKind,
    optional: bool,
    description: Option<String>,
    misuse: Option<(&'static str, &'static str)>,
}

/// The closed set of supported schema node kinds.
#[derive(Debug, Clone)]
pub enum SchemaKind {
    /// UTF-8 string with optional length bounds.
    String(StringSchema),
    /// Number with optional bounds and an integer flag.
    Number(NumberSchema),
    /// Boolean.
    Boolean,
    /// One of a declared, ordered set of string variants.
    Enum(EnumSchema),
    /// Object with declared, ordered fields.
    Object(ObjectSchema),
    /// Array of a single element schema.
    Array(ArraySchema),
    /// Map with arbitrary string keys and a single value schema.
    Record(RecordSchema),
    /// Extended date-string constraint chain.
    DateString(DateStringSchema),
    /// User-supplied opaque check; has no documentation mapping.
    Custom(CustomSchema),
}

impl SchemaKind {
    /// Lowercase kind name, used in messages and unsupported-node markers.
    pub fn name(&self) -> &'static str {
        match self {
            SchemaKind::String(_) => "string",
            SchemaKind::Number(_) => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Enum(_) => "enum",
            SchemaKind::Object(_) => "object",
            SchemaKind::Array(_) => "array",
            SchemaKind::Record(_) => "record",
            SchemaKind::DateString(_) => "date-string",
            SchemaKind::Custom(_) => "custom",
        }
    }
}

/// Length constraints for string schemas.
#[derive(Debug, Clone, Default)]
pub struct StringSchema {
    /// Minimum length in characters, inclusive.
    pub min_length: Option<usize>,
    /// Maximum length in characters, inclusive.
    pub max_length: Option<usize>,
}

/// Bounds and integrality for number schemas.
#[derive(Debug, Clone, Default)]
pub struct NumberSchema {
    /// Minimum value, inclusive.
    pub minimum: Option<f64>,
    /// Maximum value, inclusive.
    pub maximum: Option<f64>,
    /// Require the value to be a whole number.
    pub integer: bool,
}

/// Declared enum variants, in declaration order.
#[derive(Debug, Clone)]
pub struct EnumSchema {
    /// Accepted string values.
    pub variants: Vec<String>,
}

/// Declared object fields, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    /// Field name to field schema, insertion-ordered.
    pub fields: IndexMap<String, Schema>,
    pub(crate) duplicate: Option<String>,
}

/// Element schema for arrays.
#[derive(Debug, Clone)]
pub struct ArraySchema {
    /// Schema every element must satisfy.
    pub element: Box<Schema>,
}

/// Value schema for records (string-keyed maps).
#[derive(Debug, Clone)]
pub struct RecordSchema {
    /// Schema every value must satisfy.
    pub value: Box<Schema>,
}

/// A user-supplied check over the raw value.
///
/// The check returns `Ok(())` or a human-readable message; failures become
/// issues with a custom code equal to `name`. Custom schemas validate but
/// cannot be documented — the converter marks them unsupported.
#[derive(Clone)]
pub struct CustomSchema {
    /// Issue code and unsupported-node marker for this check.
    pub name: String,
    pub(crate) check: Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>,
}

impl fmt::Debug for CustomSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomSchema")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Schema {
    fn from_kind(kind: SchemaKind) -> Self {
        Self {
            kind,
            optional: false,
            description: None,
            misuse: None,
        }
    }

    /// A string schema with no constraints.
    pub fn string() -> Self {
        Self::from_kind(SchemaKind::String(StringSchema::default()))
    }

    /// A number schema with no constraints.
    pub fn number() -> Self {
        Self::from_kind(SchemaKind::Number(NumberSchema::default()))
    }

    /// A boolean schema.
    pub fn boolean() -> Self {
        Self::from_kind(SchemaKind::Boolean)
    }

    /// An enum schema accepting exactly the given variants, in order.
    pub fn enumeration<I, V>(variants: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self::from_kind(SchemaKind::Enum(EnumSchema {
            variants: variants.into_iter().map(Into::into).collect(),
        }))
    }

    /// An object schema with the given fields, preserving declaration order.
    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        let mut map = IndexMap::new();
        let mut duplicate = None;
        for (name, schema) in fields {
            let name = name.into();
            if map.contains_key(&name) && duplicate.is_none() {
                duplicate = Some(name.clone());
            }
            map.insert(name, schema);
        }
        Self::from_kind(SchemaKind::Object(ObjectSchema {
            fields: map,
            duplicate,
        }))
    }

    /// An array schema whose elements satisfy `element`.
    pub fn array(element: Schema) -> Self {
        Self::from_kind(SchemaKind::Array(ArraySchema {
            element: Box::new(element),
        }))
    }

    /// A record schema whose values satisfy `value`.
    pub fn record(value: Schema) -> Self {
        Self::from_kind(SchemaKind::Record(RecordSchema {
            value: Box::new(value),
        }))
    }

    /// An extended date-string schema.
    pub fn date_string(chain: DateStringSchema) -> Self {
        Self::from_kind(SchemaKind::DateString(chain))
    }

    /// A custom check; `name` doubles as issue code and documentation marker.
    pub fn custom<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        Self::from_kind(SchemaKind::Custom(CustomSchema {
            name: name.into(),
            check: Arc::new(check),
        }))
    }

    /// Mark this schema optional: an object field with this schema may be
    /// absent without producing an issue.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Attach a human-readable description, copied verbatim into
    /// documentation output.
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Minimum string length in characters, inclusive. String schemas only.
    pub fn min_length(mut self, n: usize) -> Self {
        if let SchemaKind::String(s) = &mut self.kind {
            s.min_length = Some(n);
        } else {
            self.record_misuse("min_length");
        }
        self
    }

    /// Maximum string length in characters, inclusive. String schemas only.
    pub fn max_length(mut self, n: usize) -> Self {
        if let SchemaKind::String(s) = &mut self.kind {
            s.max_length = Some(n);
        } else {
            self.record_misuse("max_length");
        }
        self
    }

    /// Minimum value, inclusive. Number schemas only.
    pub fn minimum(mut self, v: f64) -> Self {
        if let SchemaKind::Number(n) = &mut self.kind {
            n.minimum = Some(v);
        } else {
            self.record_misuse("minimum");
        }
        self
    }

    /// Maximum value, inclusive. Number schemas only.
    pub fn maximum(mut self, v: f64) -> Self {
        if let SchemaKind::Number(n) = &mut self.kind {
            n.maximum = Some(v);
        } else {
            self.record_misuse("maximum");
        }
        self
    }

    /// Require a whole number. Number schemas only.
    pub fn integer(mut self) -> Self {
        if let SchemaKind::Number(n) = &mut self.kind {
            n.integer = true;
        } else {
            self.record_misuse("integer");
        }
        self
    }

    fn record_misuse(&mut self, constraint: &'static str) {
        let kind = self.kind.name();
        if self.misuse.is_none() {
            self.misuse = Some((constraint, kind));
        }
    }

    /// The kind-specific constraint set.
    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    /// Whether this schema declared itself optional.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// The attached description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Audit the whole schema tree for configuration errors.
    ///
    /// Call once at application startup (guard construction does this for
    /// you). Validation itself assumes a well-formed schema.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found in declaration order.
    pub fn ensure_well_formed(&self) -> Result<(), SchemaError> {
        if let Some((constraint, kind)) = self.misuse {
            return Err(SchemaError::MisappliedConstraint { constraint, kind });
        }
        match &self.kind {
            SchemaKind::String(s) => {
                if let (Some(min), Some(max)) = (s.min_length, s.max_length) {
                    if min > max {
                        return Err(SchemaError::InvertedLengthBounds { min, max });
                    }
                }
                Ok(())
            }
            SchemaKind::Number(n) => {
                if let (Some(min), Some(max)) = (n.minimum, n.maximum) {
                    if min > max {
                        return Err(SchemaError::InvertedValueBounds { min, max });
                    }
                }
                Ok(())
            }
            SchemaKind::Boolean | SchemaKind::Custom(_) => Ok(()),
            SchemaKind::Enum(e) => {
                if e.variants.is_empty() {
                    return Err(SchemaError::EmptyEnum);
                }
                Ok(())
            }
            SchemaKind::Object(o) => {
                if let Some(name) = &o.duplicate {
                    return Err(SchemaError::DuplicateField(name.clone()));
                }
                for field in o.fields.values() {
                    field.ensure_well_formed()?;
                }
                Ok(())
            }
            SchemaKind::Array(a) => a.element.ensure_well_formed(),
            SchemaKind::Record(r) => r.value.ensure_well_formed(),
            SchemaKind::DateString(d) => d.ensure_well_formed(),
        }
    }
}

impl From<DateStringSchema> for Schema {
    fn from(chain: DateStringSchema) -> Self {
        Schema::date_string(chain)
    }
}
