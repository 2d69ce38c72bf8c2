//! Shape-dispatched value codec.
//!
//! Decoding is driven by the [`ValueShape`] a field descriptor declares, so
//! wire payloads that disagree with the declared shape surface as
//! [`DeserializeError::ShapeMismatch`] instead of silently coercing.
//! Encoding needs no descriptor: every [`AttrValue`] knows its own wire form.

use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

use crate::error::{DeserializeError, SerializeError};
use crate::model::{AttrValue, Reference, Semantic};
use crate::registry::{ElemShape, ScalarKind, ValueShape};
use crate::serde::structs::{decode_struct, encode_struct};

/// Human-readable name of a JSON node's kind, for error messages.
pub(crate) fn json_kind(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// DECODING
// ============================================================================

/// Decodes `node` against a declared shape. `field` only feeds error messages.
pub fn decode_shaped(
    field: &str,
    shape: ValueShape,
    node: &Value,
) -> Result<AttrValue, DeserializeError> {
    match shape {
        ValueShape::Scalar(kind) => decode_scalar(field, kind, node),
        ValueShape::List(elem) => {
            Ok(AttrValue::List(decode_elements(field, elem, node)?))
        }
        ValueShape::Set(elem) => {
            Ok(AttrValue::set_of(decode_elements(field, elem, node)?))
        }
        ValueShape::Map => {
            let obj = node.as_object().ok_or_else(|| DeserializeError::ShapeMismatch {
                field: field.to_string(),
                expected: "object",
                found: json_kind(node),
            })?;
            let mut entries = BTreeMap::new();
            for (key, value) in obj {
                if let Some(decoded) = attr_from_json(value) {
                    entries.insert(key.clone(), decoded);
                }
            }
            Ok(AttrValue::Map(entries))
        }
        ValueShape::Struct(type_name) => {
            Ok(AttrValue::Struct(decode_struct(field, type_name, node)?))
        }
        ValueShape::Reference => {
            Ok(AttrValue::Relation(Box::new(decode_reference(field, node)?)))
        }
    }
}

fn decode_scalar(
    field: &str,
    kind: ScalarKind,
    node: &Value,
) -> Result<AttrValue, DeserializeError> {
    let mismatch = |expected: &'static str| DeserializeError::ShapeMismatch {
        field: field.to_string(),
        expected,
        found: json_kind(node),
    };
    match kind {
        ScalarKind::Text => node
            .as_str()
            .map(|s| AttrValue::Text(s.to_string()))
            .ok_or_else(|| mismatch("string")),
        ScalarKind::Bool => node.as_bool().map(AttrValue::Bool).ok_or_else(|| mismatch("boolean")),
        ScalarKind::Int => node.as_i64().map(AttrValue::Int).ok_or_else(|| mismatch("integer")),
        ScalarKind::Float => node.as_f64().map(AttrValue::Float).ok_or_else(|| mismatch("number")),
        ScalarKind::Enum(variants) => {
            let text = node.as_str().ok_or_else(|| mismatch("string"))?;
            if variants.iter().any(|v| *v == text) {
                Ok(AttrValue::Text(text.to_string()))
            } else {
                Err(DeserializeError::UnknownEnumVariant {
                    field: field.to_string(),
                    value: text.to_string(),
                })
            }
        }
    }
}

/// Decodes a wire array element by element. Arrays of arrays are rejected:
/// element shapes are scalars, structs, or references, never collections.
fn decode_elements(
    field: &str,
    elem: ElemShape,
    node: &Value,
) -> Result<Vec<AttrValue>, DeserializeError> {
    let items = node.as_array().ok_or_else(|| DeserializeError::ShapeMismatch {
        field: field.to_string(),
        expected: "array",
        found: json_kind(node),
    })?;
    let mut decoded = Vec::with_capacity(items.len());
    for item in items {
        if item.is_array() {
            return Err(DeserializeError::NestedArray { field: field.to_string() });
        }
        if item.is_null() {
            continue;
        }
        decoded.push(match elem {
            ElemShape::Scalar(kind) => decode_scalar(field, kind, item)?,
            ElemShape::Struct(type_name) => {
                AttrValue::Struct(decode_struct(field, type_name, item)?)
            }
            ElemShape::Reference => {
                AttrValue::Relation(Box::new(decode_reference(field, item)?))
            }
        });
    }
    Ok(decoded)
}

/// Schemaless fallback for values with no declared shape, such as map
/// entries, struct attributes, and uniqueAttributes. `None` means JSON null.
pub fn attr_from_json(node: &Value) -> Option<AttrValue> {
    match node {
        Value::Null => None,
        Value::Bool(b) => Some(AttrValue::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(AttrValue::Int(i))
            } else {
                n.as_f64().map(AttrValue::Float)
            }
        }
        Value::String(s) => Some(AttrValue::Text(s.clone())),
        Value::Array(items) => {
            Some(AttrValue::List(items.iter().filter_map(attr_from_json).collect()))
        }
        Value::Object(obj) => {
            let mut entries = BTreeMap::new();
            for (key, value) in obj {
                if let Some(decoded) = attr_from_json(value) {
                    entries.insert(key.clone(), decoded);
                }
            }
            Some(AttrValue::Map(entries))
        }
    }
}

/// Decodes a relationship reference object.
pub fn decode_reference(field: &str, node: &Value) -> Result<Reference, DeserializeError> {
    let obj = node.as_object().ok_or_else(|| DeserializeError::ShapeMismatch {
        field: field.to_string(),
        expected: "reference object",
        found: json_kind(node),
    })?;
    let type_name = obj
        .get("typeName")
        .and_then(|v| v.as_str())
        .ok_or(DeserializeError::MissingField {
            context: "relationship reference",
            field: "typeName",
        })?;
    let mut reference = Reference {
        type_name: type_name.to_string(),
        guid: obj.get("guid").and_then(|v| v.as_str()).map(str::to_string),
        unique_attributes: None,
        relationship_type: obj
            .get("relationshipType")
            .and_then(|v| v.as_str())
            .map(str::to_string),
        semantic: Semantic::default(),
    };
    if let Some(unique) = obj.get("uniqueAttributes").and_then(|v| v.as_object()) {
        let mut entries = BTreeMap::new();
        for (key, value) in unique {
            if let Some(decoded) = attr_from_json(value) {
                entries.insert(key.clone(), decoded);
            }
        }
        reference.unique_attributes = Some(entries);
    }
    Ok(reference)
}

// ============================================================================
// ENCODING
// ============================================================================

/// Encodes any in-memory value back to its wire form.
///
/// A non-finite float has no JSON representation and is an encode error,
/// never a silent `null` (which the decoder would read back as a clear).
pub fn attr_to_json(value: &AttrValue) -> Result<Value, SerializeError> {
    match value {
        AttrValue::Text(s) => Ok(Value::String(s.clone())),
        AttrValue::Bool(b) => Ok(Value::Bool(*b)),
        AttrValue::Int(i) => Ok(Value::Number(Number::from(*i))),
        AttrValue::Float(f) => Number::from_f64(*f).map(Value::Number).ok_or_else(|| {
            SerializeError::Encode {
                context: "float value",
                reason: format!("non-finite number {f}"),
            }
        }),
        AttrValue::List(items) | AttrValue::Set(items) => Ok(Value::Array(
            items.iter().map(attr_to_json).collect::<Result<_, _>>()?,
        )),
        AttrValue::Map(entries) => {
            let mut obj = Map::new();
            for (key, value) in entries {
                obj.insert(key.clone(), attr_to_json(value)?);
            }
            Ok(Value::Object(obj))
        }
        AttrValue::Struct(instance) => encode_struct(instance),
        AttrValue::Relation(reference) => encode_reference(reference),
    }
}

/// Encodes a relationship reference. The in-memory semantic is carried by the
/// serializer's bucket choice, not by the reference object itself.
pub fn encode_reference(reference: &Reference) -> Result<Value, SerializeError> {
    let mut obj = Map::new();
    obj.insert("typeName".to_string(), Value::String(reference.type_name.clone()));
    if let Some(guid) = &reference.guid {
        obj.insert("guid".to_string(), Value::String(guid.clone()));
    }
    if let Some(unique) = &reference.unique_attributes {
        let mut unique_obj = Map::new();
        for (key, value) in unique {
            unique_obj.insert(key.clone(), attr_to_json(value)?);
        }
        obj.insert("uniqueAttributes".to_string(), Value::Object(unique_obj));
    }
    if let Some(relationship_type) = &reference.relationship_type {
        obj.insert("relationshipType".to_string(), Value::String(relationship_type.clone()));
    }
    Ok(Value::Object(obj))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TEXT: ValueShape = ValueShape::Scalar(ScalarKind::Text);

    #[test]
    fn test_decode_scalar_text() {
        let decoded = decode_shaped("name", TEXT, &json!("orders")).unwrap();
        assert_eq!(decoded, AttrValue::Text("orders".to_string()));
    }

    #[test]
    fn test_decode_scalar_shape_mismatch() {
        let err = decode_shaped("name", TEXT, &json!(42)).unwrap_err();
        assert!(matches!(
            err,
            DeserializeError::ShapeMismatch { expected: "string", found: "number", .. }
        ));
    }

    #[test]
    fn test_decode_enum_rejects_unknown_variant() {
        let shape = ValueShape::Scalar(ScalarKind::Enum(&["VERIFIED", "DRAFT"]));
        let err = decode_shaped("certificateStatus", shape, &json!("BOGUS")).unwrap_err();
        assert!(matches!(err, DeserializeError::UnknownEnumVariant { .. }));
    }

    #[test]
    fn test_decode_set_dedups_preserving_order() {
        let shape = ValueShape::Set(ElemShape::Scalar(ScalarKind::Text));
        let decoded = decode_shaped("ownerUsers", shape, &json!(["b", "a", "b"])).unwrap();
        assert_eq!(
            decoded,
            AttrValue::Set(vec![
                AttrValue::Text("b".to_string()),
                AttrValue::Text("a".to_string()),
            ])
        );
    }

    #[test]
    fn test_decode_list_keeps_duplicates() {
        let shape = ValueShape::List(ElemShape::Scalar(ScalarKind::Int));
        let decoded = decode_shaped("counts", shape, &json!([1, 1, 2])).unwrap();
        assert_eq!(decoded.as_items().unwrap().len(), 3);
    }

    #[test]
    fn test_nested_array_rejected() {
        let shape = ValueShape::List(ElemShape::Scalar(ScalarKind::Text));
        let err = decode_shaped("assetTags", shape, &json!([["inner"]])).unwrap_err();
        assert!(matches!(err, DeserializeError::NestedArray { .. }));
    }

    #[test]
    fn test_decode_reference_requires_type_name() {
        let err = decode_reference("readme", &json!({"guid": "g1"})).unwrap_err();
        assert!(matches!(
            err,
            DeserializeError::MissingField { field: "typeName", .. }
        ));
    }

    #[test]
    fn test_reference_round_trip() {
        let wire = json!({
            "typeName": "Readme",
            "guid": "g1",
            "uniqueAttributes": {"qualifiedName": "default/readme/1"}
        });
        let decoded = decode_reference("readme", &wire).unwrap();
        assert_eq!(encode_reference(&decoded).unwrap(), wire);
    }

    #[test]
    fn test_attr_from_json_splits_int_and_float() {
        assert_eq!(attr_from_json(&json!(7)), Some(AttrValue::Int(7)));
        assert_eq!(attr_from_json(&json!(7.5)), Some(AttrValue::Float(7.5)));
        assert_eq!(attr_from_json(&json!(null)), None);
    }

    #[test]
    fn test_non_finite_float_is_an_encode_error() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = attr_to_json(&AttrValue::Float(bad)).unwrap_err();
            assert!(matches!(err, SerializeError::Encode { .. }));
        }
        // Nested occurrences fail too instead of degrading to null.
        let nested = AttrValue::List(vec![AttrValue::Float(f64::NAN)]);
        assert!(attr_to_json(&nested).is_err());
    }
}
