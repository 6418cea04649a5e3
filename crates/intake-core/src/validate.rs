//! # Validation Engine
//!
//! Depth-first walk of a schema tree over a JSON value. Expected
//! validation failure is a normal, representable result — the engine never
//! panics on client input and never mutates it; a new value is returned,
//! with coercions applied (date-string casting, unknown object keys
//! stripped).
//!
//! Issues are produced in evaluation order: depth-first through the schema
//! tree, fields in declaration order, array elements by index. Every
//! issue's path identifies the exact nested location in the input.

use serde_json::{Map, Value};

use crate::issue::{Issue, IssueCode, PathSegment};
use crate::schema::{Schema, SchemaKind};

/// Validate `input` against `schema`.
///
/// Returns the parsed (possibly coerced) value, or the ordered sequence of
/// issues. The schema is assumed well-formed; audit it once at setup with
/// [`Schema::ensure_well_formed`].
pub fn validate(schema: &Schema, input: &Value) -> Result<Value, Vec<Issue>> {
    let mut issues = Vec::new();
    let mut path = Vec::new();
    let output = walk(schema, input, &mut path, &mut issues);
    if issues.is_empty() {
        Ok(output.unwrap_or(Value::Null))
    } else {
        Err(issues)
    }
}

fn walk(
    schema: &Schema,
    input: &Value,
    path: &mut Vec<PathSegment>,
    issues: &mut Vec<Issue>,
) -> Option<Value> {
    match schema.kind() {
        SchemaKind::String(s) => {
            let Value::String(text) = input else {
                issues.push(type_issue("string", input, path));
                return None;
            };
            let len = text.chars().count();
            if let Some(min) = s.min_length {
                if len < min {
                    issues.push(
                        Issue::new(
                            IssueCode::TooSmall,
                            format!("String must contain at least {min} character(s)"),
                        )
                        .at(path.clone())
                        .with_param("minimum", min),
                    );
                }
            }
            if let Some(max) = s.max_length {
                if len > max {
                    issues.push(
                        Issue::new(
                            IssueCode::TooBig,
                            format!("String must contain at most {max} character(s)"),
                        )
                        .at(path.clone())
                        .with_param("maximum", max),
                    );
                }
            }
            Some(input.clone())
        }

        SchemaKind::Number(n) => {
            let value = match input {
                Value::Number(num) => num.as_f64(),
                _ => None,
            };
            let Some(value) = value else {
                issues.push(type_issue("number", input, path));
                return None;
            };
            if n.integer && value.fract() != 0.0 {
                issues.push(
                    Issue::new(IssueCode::InvalidType, "Expected integer, received float")
                        .at(path.clone())
                        .with_param("expected", "integer")
                        .with_param("received", "float"),
                );
            }
            if let Some(min) = n.minimum {
                if value < min {
                    issues.push(
                        Issue::new(
                            IssueCode::TooSmall,
                            format!("Number must be greater than or equal to {min}"),
                        )
                        .at(path.clone())
                        .with_param("minimum", min),
                    );
                }
            }
            if let Some(max) = n.maximum {
                if value > max {
                    issues.push(
                        Issue::new(
                            IssueCode::TooBig,
                            format!("Number must be less than or equal to {max}"),
                        )
                        .at(path.clone())
                        .with_param("maximum", max),
                    );
                }
            }
            Some(input.clone())
        }

        SchemaKind::Boolean => {
            if let Value::Bool(_) = input {
                Some(input.clone())
            } else {
                issues.push(type_issue("boolean", input, path));
                None
            }
        }

        SchemaKind::Enum(e) => {
            let Value::String(text) = input else {
                issues.push(type_issue("string", input, path));
                return None;
            };
            if e.variants.iter().any(|v| v == text) {
                Some(input.clone())
            } else {
                let expected = e
                    .variants
                    .iter()
                    .map(|v| format!("'{v}'"))
                    .collect::<Vec<_>>()
                    .join(" | ");
                issues.push(
                    Issue::new(
                        IssueCode::InvalidEnumValue,
                        format!("Invalid enum value. Expected {expected}, received '{text}'"),
                    )
                    .at(path.clone())
                    .with_param("options", e.variants.clone()),
                );
                None
            }
        }

        SchemaKind::Object(o) => {
            let Value::Object(map) = input else {
                issues.push(type_issue("object", input, path));
                return None;
            };
            let mut out = Map::new();
            for (name, field) in &o.fields {
                match map.get(name) {
                    Some(value) => {
                        path.push(PathSegment::Key(name.clone()));
                        if let Some(validated) = walk(field, value, path, issues) {
                            out.insert(name.clone(), validated);
                        }
                        path.pop();
                    }
                    None if field.is_optional() => {}
                    None => {
                        path.push(PathSegment::Key(name.clone()));
                        issues.push(
                            Issue::new(IssueCode::InvalidType, "Required")
                                .at(path.clone())
                                .with_param("expected", field.kind().name())
                                .with_param("received", "undefined"),
                        );
                        path.pop();
                    }
                }
            }
            // Keys not declared on the schema are stripped from the output.
            Some(Value::Object(out))
        }

        SchemaKind::Array(a) => {
            let Value::Array(items) = input else {
                issues.push(type_issue("array", input, path));
                return None;
            };
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                path.push(PathSegment::Index(index));
                out.push(walk(&a.element, item, path, issues).unwrap_or(Value::Null));
                path.pop();
            }
            Some(Value::Array(out))
        }

        SchemaKind::Record(r) => {
            let Value::Object(map) = input else {
                issues.push(type_issue("object", input, path));
                return None;
            };
            let mut out = Map::new();
            for (key, value) in map {
                path.push(PathSegment::Key(key.clone()));
                if let Some(validated) = walk(&r.value, value, path, issues) {
                    out.insert(key.clone(), validated);
                }
                path.pop();
            }
            Some(Value::Object(out))
        }

        SchemaKind::DateString(d) => {
            let Value::String(text) = input else {
                issues.push(type_issue("string", input, path));
                return None;
            };
            match d.validate(text) {
                Ok(accepted) => Some(Value::String(accepted)),
                Err(list) => {
                    for issue in list {
                        issues.push(issue.at(path.clone()));
                    }
                    None
                }
            }
        }

        SchemaKind::Custom(c) => match (c.check)(input) {
            Ok(()) => Some(input.clone()),
            Err(message) => {
                issues.push(
                    Issue::new(IssueCode::Custom(c.name.clone()), message).at(path.clone()),
                );
                None
            }
        },
    }
}

fn type_issue(expected: &'static str, input: &Value, path: &[PathSegment]) -> Issue {
    let received = type_name(input);
    Issue::new(
        IssueCode::InvalidType,
        format!("Expected {expected}, received {received}"),
    )
    .at(path.to_vec())
    .with_param("expected", expected)
    .with_param("received", received)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
