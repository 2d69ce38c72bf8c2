//! Scoped relationship-attribute payload codec.
//!
//! Some endpoints return a bare `{typeName, attributes}` payload describing
//! only the relationship-side attributes of one edge. It shares the field
//! decode logic of the main entity path but has no tri-state or envelope
//! bucketing.

use serde_json::Value;
use tracing::debug;

use crate::error::DeserializeError;
use crate::model::RelationshipAttributes;
use crate::registry::FieldKind;
use crate::serde::asset::decode_field_value;
use crate::serde::value::json_kind;
use crate::serde::SerdeContext;

pub fn deserialize_relationship_attributes(
    ctx: &SerdeContext<'_>,
    node: &Value,
) -> Result<RelationshipAttributes, DeserializeError> {
    let obj = node.as_object().ok_or_else(|| DeserializeError::NotAnObject {
        context: "relationship attributes",
        found: json_kind(node),
    })?;
    let wire_type = obj.get("typeName").and_then(|v| v.as_str());
    let descriptor = ctx.registry.resolve(wire_type.unwrap_or_default());
    let mut out = RelationshipAttributes {
        type_name: wire_type.unwrap_or(descriptor.type_name()).to_string(),
        ..RelationshipAttributes::default()
    };

    let members = match obj.get("attributes") {
        Some(Value::Object(inner)) => inner,
        _ => obj,
    };
    let flat = !matches!(obj.get("attributes"), Some(Value::Object(_)));
    for (name, value) in members {
        if flat && name == "typeName" {
            continue;
        }
        if value.is_null() {
            continue;
        }
        match descriptor.field(name) {
            Some(fd) if fd.kind == FieldKind::CustomMetadataCarrier => {
                debug!(field = name.as_str(), "custom metadata carrier in payload, skipping");
            }
            Some(fd) => {
                out.attributes
                    .insert(name.clone(), decode_field_value(ctx, fd, name, value)?);
            }
            None => {
                debug!(field = name.as_str(), type_name = out.type_name.as_str(),
                    "no descriptor for relationship attribute, keeping verbatim");
                out.unmapped.insert(name.clone(), value.clone());
            }
        }
    }
    Ok(out)
}
