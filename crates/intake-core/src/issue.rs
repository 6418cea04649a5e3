//! # Validation Issues — Structured Constraint Violations
//!
//! One [`Issue`] per failed constraint, carrying a machine-readable code,
//! a human-readable message, the exact path into the input that failed,
//! and constraint-specific extra parameters. A validation result is an
//! ordered sequence of issues in depth-first schema-tree evaluation order.
//!
//! ## Wire Shape
//!
//! Issues serialize with their parameters flattened alongside the fixed
//! fields, so an error payload reads:
//!
//! ```json
//! { "code": "too_small", "message": "String must contain at least 8 character(s)",
//!   "path": ["password"], "minimum": 8 }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One segment of the path from the input root to a failing value.
///
/// Serializes untagged: object keys render as strings, array positions
/// as numbers, so a path reads `["items", 2, "name"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// An object field name.
    Key(String),
    /// An array element index.
    Index(usize),
}

impl PathSegment {
    /// Shorthand for a field-name segment.
    pub fn key(name: impl Into<String>) -> Self {
        Self::Key(name.into())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) => f.write_str(k),
            PathSegment::Index(i) => write!(f, "{i}"),
        }
    }
}

/// Machine-readable issue codes.
///
/// The closed variants cover the generic constraint taxonomy plus the
/// extended date-string codes; [`IssueCode::Custom`] carries codes from
/// user-supplied checks. Custom codes serialize as their bare string, so
/// the wire shape is uniform across all kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueCode {
    /// Value has the wrong JSON type (also covers missing required fields).
    #[serde(rename = "invalid_type")]
    InvalidType,
    /// Value is below a declared minimum (length, magnitude, or year).
    #[serde(rename = "too_small")]
    TooSmall,
    /// Value exceeds a declared maximum (length, magnitude, or year).
    #[serde(rename = "too_big")]
    TooBig,
    /// Value is not one of the declared enum variants.
    #[serde(rename = "invalid_enum_value")]
    InvalidEnumValue,
    /// Extended validator: value does not parse as a date at all.
    #[serde(rename = "invalid-date-string")]
    InvalidDateString,
    /// Extended validator: value parses but violates the lexical grammar.
    #[serde(rename = "invalid-format")]
    InvalidFormat,
    /// Extended validator: value is on the wrong side of evaluation time.
    #[serde(rename = "invalid-direction")]
    InvalidDirection,
    /// Extended validator: value falls in the wrong day-of-week class.
    #[serde(rename = "invalid-day-class")]
    InvalidDayClass,
    /// A code emitted by a user-supplied custom check.
    #[serde(untagged)]
    Custom(String),
}

/// One structured constraint violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Machine-readable code identifying the violated constraint class.
    pub code: IssueCode,
    /// Human-readable description of the violation.
    pub message: String,
    /// Ordered segments locating the failing value within the input.
    pub path: Vec<PathSegment>,
    /// Constraint-specific extra fields, flattened into the wire shape.
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl Issue {
    /// Create an issue with an empty path and no extra parameters.
    pub fn new(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Vec::new(),
            params: Map::new(),
        }
    }

    /// Attach an extra parameter, returning the extended issue.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Replace the path with the given segments.
    pub fn at(mut self, path: Vec<PathSegment>) -> Self {
        self.path = path;
        self
    }

    /// Render the path as a dotted string, or `(root)` for the empty path.
    pub fn path_display(&self) -> String {
        if self.path.is_empty() {
            "(root)".to_string()
        } else {
            self.path
                .iter()
                .map(PathSegment::to_string)
                .collect::<Vec<_>>()
                .join(".")
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path_display(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_issue_serializes_with_flattened_params() {
        let issue = Issue::new(IssueCode::TooSmall, "String must contain at least 8 character(s)")
            .at(vec![PathSegment::key("password")])
            .with_param("minimum", 8);
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(
            value,
            json!({
                "code": "too_small",
                "message": "String must contain at least 8 character(s)",
                "path": ["password"],
                "minimum": 8
            })
        );
    }

    #[test]
    fn test_custom_code_serializes_as_bare_string() {
        let issue = Issue::new(IssueCode::Custom("not_a_slug".into()), "Not a slug");
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(value["code"], "not_a_slug");
    }

    #[test]
    fn test_path_mixes_keys_and_indices() {
        let issue = Issue::new(IssueCode::InvalidType, "Expected string, received number").at(vec![
            PathSegment::key("items"),
            PathSegment::Index(2),
            PathSegment::key("name"),
        ]);
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(value["path"], json!(["items", 2, "name"]));
        assert_eq!(issue.path_display(), "items.2.name");
    }

    #[test]
    fn test_roundtrip_preserves_params() {
        let json = json!({
            "code": "invalid-direction",
            "message": "Date must be in the past",
            "path": ["when"],
            "expected": "past",
            "dateString": true
        });
        let issue: Issue = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(issue.code, IssueCode::InvalidDirection);
        assert_eq!(issue.params["expected"], "past");
        assert_eq!(serde_json::to_value(&issue).unwrap(), json);
    }

    #[test]
    fn test_display_uses_root_marker_for_empty_path() {
        let issue = Issue::new(IssueCode::InvalidType, "Expected object, received null");
        assert_eq!(issue.to_string(), "(root): Expected object, received null");
    }
}
