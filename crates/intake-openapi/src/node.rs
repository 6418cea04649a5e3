//! # Documentation Nodes
//!
//! The output dialect of the converter: a JSON-serializable tree following
//! the conventional API-schema documentation vocabulary (`type`,
//! `properties`, `items`, `required`, `enum`, `format`, `description`,
//! `additionalProperties`). Unset fields are omitted from the serialized
//! form, so leaf nodes stay minimal.

use indexmap::IndexMap;
use serde::Serialize;

/// Documentation-dialect type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
}

/// One node of the documentation tree.
///
/// The tree mirrors the source schema tree one-for-one: each schema node
/// converts to exactly one `DocNode` with the same nesting. Built fresh per
/// conversion call; never cached, never mutated after construction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocNode {
    /// Dialect type name. Absent on unsupported nodes.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<DocType>,

    /// Human-readable description, copied verbatim from the schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// String format hint (`date`, `date-time`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'static str>,

    /// Accepted values of an enum node, in declared order.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,

    /// Inclusive numeric lower bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,

    /// Inclusive numeric upper bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,

    /// Inclusive minimum string length.
    #[serde(rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    /// Inclusive maximum string length.
    #[serde(rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    /// Field name to node, in declared order. Object nodes only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, DocNode>>,

    /// Names of the fields whose schema is not optional. Omitted when
    /// every field is optional.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    /// Element node. Array nodes only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<DocNode>>,

    /// Value node of a record (string-keyed map).
    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<Box<DocNode>>,

    /// Present when the source schema construct has no documentation
    /// mapping; carries the construct's name so doc generation degrades
    /// visibly instead of lying.
    #[serde(rename = "x-unsupported", skip_serializing_if = "Option::is_none")]
    pub unsupported: Option<String>,
}

impl DocNode {
    /// A node with only the dialect type set.
    pub fn of_type(ty: DocType) -> Self {
        Self {
            ty: Some(ty),
            ..Self::default()
        }
    }
}
