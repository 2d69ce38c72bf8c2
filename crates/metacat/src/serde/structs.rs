//! Struct attribute codec.
//!
//! Struct-valued attributes arrive in two wire forms: nested, where the
//! object carries a `typeName` plus an `attributes` object, and flat, where
//! the member fields sit directly beside `typeName`. Both decode to the same
//! [`StructInstance`]; encoding always emits the flat form.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{DeserializeError, SerializeError};
use crate::model::StructInstance;
use crate::serde::value::{attr_from_json, attr_to_json, json_kind};

/// Decodes a struct payload. `default_type` is the type name the owning
/// field descriptor declares, used when the payload omits `typeName`.
pub fn decode_struct(
    field: &str,
    default_type: &str,
    node: &Value,
) -> Result<StructInstance, DeserializeError> {
    let obj = node.as_object().ok_or_else(|| DeserializeError::ShapeMismatch {
        field: field.to_string(),
        expected: "struct object",
        found: json_kind(node),
    })?;
    let type_name = obj
        .get("typeName")
        .and_then(|v| v.as_str())
        .unwrap_or(default_type)
        .to_string();

    // Nested form wraps the members in an `attributes` object; anything else
    // is the flat form with members at the top level.
    let (members, flat): (&Map<String, Value>, bool) = match obj.get("attributes") {
        Some(Value::Object(inner)) => (inner, false),
        _ => (obj, true),
    };

    let mut attributes = BTreeMap::new();
    for (key, value) in members {
        if flat && key == "typeName" {
            continue;
        }
        if let Some(decoded) = attr_from_json(value) {
            attributes.insert(key.clone(), decoded);
        }
    }
    Ok(StructInstance { type_name, attributes })
}

/// Encodes a struct in the flat wire form.
pub fn encode_struct(instance: &StructInstance) -> Result<Value, SerializeError> {
    let mut obj = Map::new();
    if !instance.type_name.is_empty() {
        obj.insert("typeName".to_string(), Value::String(instance.type_name.clone()));
    }
    for (key, value) in &instance.attributes {
        obj.insert(key.clone(), attr_to_json(value)?);
    }
    Ok(Value::Object(obj))
}
