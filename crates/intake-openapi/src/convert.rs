//! # Schema → Documentation Conversion
//!
//! Pure structural recursion from an `intake-core` schema tree to the
//! documentation dialect. The match over [`SchemaKind`] is exhaustive: a
//! kind either has a defined mapping rule or produces an explicit
//! unsupported node — there is no silent fallthrough and no wrong `type`.

use indexmap::IndexMap;

use intake_core::{Dto, Schema, SchemaKind};

use crate::node::{DocNode, DocType};

/// Convert a schema tree into its documentation tree.
///
/// Deterministic for a given schema, side-effect free, and allocates a
/// fresh tree on every call.
pub fn to_documentation(schema: &Schema) -> DocNode {
    let mut node = match schema.kind() {
        SchemaKind::String(s) => {
            let mut node = DocNode::of_type(DocType::String);
            node.min_length = s.min_length;
            node.max_length = s.max_length;
            node
        }

        SchemaKind::Number(n) => {
            let ty = if n.integer {
                DocType::Integer
            } else {
                DocType::Number
            };
            let mut node = DocNode::of_type(ty);
            node.minimum = n.minimum;
            node.maximum = n.maximum;
            node
        }

        SchemaKind::Boolean => DocNode::of_type(DocType::Boolean),

        SchemaKind::Enum(e) => {
            let mut node = DocNode::of_type(DocType::String);
            node.enum_values = Some(e.variants.clone());
            node
        }

        SchemaKind::Object(o) => {
            let mut properties = IndexMap::with_capacity(o.fields.len());
            let mut required = Vec::new();
            for (name, field) in &o.fields {
                properties.insert(name.clone(), to_documentation(field));
                if !field.is_optional() {
                    required.push(name.clone());
                }
            }
            let mut node = DocNode::of_type(DocType::Object);
            node.properties = Some(properties);
            node.required = (!required.is_empty()).then_some(required);
            node
        }

        SchemaKind::Array(a) => {
            let mut node = DocNode::of_type(DocType::Array);
            node.items = Some(Box::new(to_documentation(&a.element)));
            node
        }

        SchemaKind::Record(r) => {
            let mut node = DocNode::of_type(DocType::Object);
            node.additional_properties = Some(Box::new(to_documentation(&r.value)));
            node
        }

        // Temporal refinements (past/future, year bounds, day class) have
        // no documentation-dialect equivalent; only the lexical format maps.
        SchemaKind::DateString(d) => {
            let mut node = DocNode::of_type(DocType::String);
            node.format = Some(d.declared_format().as_str());
            node
        }

        SchemaKind::Custom(c) => DocNode {
            unsupported: Some(c.name.clone()),
            ..DocNode::default()
        },
    };

    if let Some(text) = schema.description() {
        node.description = Some(text.to_string());
    }
    node
}

/// Documentation tree for a DTO type's schema.
pub fn document<T: Dto>() -> DocNode {
    to_documentation(&T::schema())
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_core::{DateStringFormat, DateStringSchema};
    use serde_json::json;

    #[test]
    fn test_object_required_lists_exactly_non_optional_fields() {
        let schema = Schema::object([
            ("a", Schema::string()),
            ("b", Schema::number().optional()),
        ]);
        let node = to_documentation(&schema);
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "object",
                "properties": {
                    "a": { "type": "string" },
                    "b": { "type": "number" }
                },
                "required": ["a"]
            })
        );
    }

    #[test]
    fn test_all_optional_object_omits_required() {
        let schema = Schema::object([("a", Schema::string().optional())]);
        let value = serde_json::to_value(to_documentation(&schema)).unwrap();
        assert_eq!(value.get("required"), None);
    }

    #[test]
    fn test_string_bounds_map_to_dialect_names() {
        let schema = Schema::string().min_length(8).max_length(64);
        let value = serde_json::to_value(to_documentation(&schema)).unwrap();
        assert_eq!(
            value,
            json!({ "type": "string", "minLength": 8, "maxLength": 64 })
        );
    }

    #[test]
    fn test_number_bounds_and_integer_flag() {
        let value =
            serde_json::to_value(to_documentation(&Schema::number().minimum(0.0).maximum(10.0)))
                .unwrap();
        assert_eq!(
            value,
            json!({ "type": "number", "minimum": 0.0, "maximum": 10.0 })
        );

        let value =
            serde_json::to_value(to_documentation(&Schema::number().integer())).unwrap();
        assert_eq!(value, json!({ "type": "integer" }));
    }

    #[test]
    fn test_enum_preserves_declared_order() {
        let schema = Schema::enumeration(["zebra", "ant", "mole"]);
        let value = serde_json::to_value(to_documentation(&schema)).unwrap();
        assert_eq!(
            value,
            json!({ "type": "string", "enum": ["zebra", "ant", "mole"] })
        );
    }

    #[test]
    fn test_properties_preserve_declared_field_order() {
        let schema = Schema::object([
            ("zeta", Schema::string()),
            ("alpha", Schema::number()),
        ]);
        let value = serde_json::to_value(to_documentation(&schema)).unwrap();
        let keys: Vec<&String> = value["properties"]
            .as_object()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn test_array_items_recurse() {
        let schema = Schema::array(Schema::object([("name", Schema::string())]));
        let value = serde_json::to_value(to_documentation(&schema)).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": { "name": { "type": "string" } },
                    "required": ["name"]
                }
            })
        );
    }

    #[test]
    fn test_record_maps_to_additional_properties() {
        let schema = Schema::record(Schema::string());
        let value = serde_json::to_value(to_documentation(&schema)).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "object",
                "additionalProperties": { "type": "string" }
            })
        );
    }

    #[test]
    fn test_description_copied_verbatim() {
        let schema = Schema::string().describe("The post title, as shown in lists.");
        let value = serde_json::to_value(to_documentation(&schema)).unwrap();
        assert_eq!(value["description"], "The post title, as shown in lists.");
    }

    #[test]
    fn test_date_string_maps_format_and_ignores_temporal_checks() {
        let date = Schema::date_string(
            DateStringSchema::new()
                .format(DateStringFormat::Date)
                .past()
                .week_day(),
        );
        let value = serde_json::to_value(to_documentation(&date)).unwrap();
        assert_eq!(value, json!({ "type": "string", "format": "date" }));

        let datetime = Schema::date_string(DateStringSchema::new());
        let value = serde_json::to_value(to_documentation(&datetime)).unwrap();
        assert_eq!(value, json!({ "type": "string", "format": "date-time" }));
    }

    #[test]
    fn test_custom_schema_is_marked_unsupported() {
        let schema = Schema::custom("not_a_slug", |_| Ok(()));
        let value = serde_json::to_value(to_documentation(&schema)).unwrap();
        assert_eq!(value, json!({ "x-unsupported": "not_a_slug" }));
        assert_eq!(value.get("type"), None);
    }

    #[test]
    fn test_tree_shape_mirrors_schema_shape() {
        let schema = Schema::object([(
            "posts",
            Schema::array(Schema::object([
                ("title", Schema::string().describe("Title")),
                ("tags", Schema::record(Schema::boolean()).optional()),
            ])),
        )]);
        let node = to_documentation(&schema);
        let posts = &node.properties.as_ref().unwrap()["posts"];
        let element = posts.items.as_ref().unwrap();
        let tags = &element.properties.as_ref().unwrap()["tags"];
        assert!(tags.additional_properties.is_some());
        assert_eq!(element.required.as_deref(), Some(&["title".to_string()][..]));
    }
}
