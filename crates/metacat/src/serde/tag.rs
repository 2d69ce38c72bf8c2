//! Tag codec.
//!
//! On the wire a tag's `typeName` is the platform's hashed internal ID; in
//! memory it is the human-readable name. Decoding tolerates IDs that no
//! longer resolve by substituting the deleted sentinel, since tag
//! definitions can be purged after entities referencing them were recorded.
//! Encoding is always strict: a request naming an unknown tag is a bug.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{DeserializeError, SerializeError};
use crate::model::{AssetStatus, Tag};
use crate::serde::value::json_kind;
use crate::serde::SerdeContext;
use crate::translate::{OnMissing, DELETED_SENTINEL};

/// Resolves a hashed tag ID to its readable name, applying the caller's
/// missing-ID policy.
pub fn resolve_tag_name(
    ctx: &SerdeContext<'_>,
    id: &str,
    on_missing: OnMissing,
) -> Result<String, DeserializeError> {
    let resolved = ctx
        .translator
        .tag_name(id)
        .map_err(|source| DeserializeError::Translation {
            what: "tag ID",
            key: id.to_string(),
            source,
        })?;
    match resolved {
        Some(name) => Ok(name),
        None => match on_missing {
            OnMissing::Deleted => {
                debug!(tag_id = id, "tag ID no longer resolves, substituting deleted sentinel");
                Ok(DELETED_SENTINEL.to_string())
            }
            OnMissing::Fail => Err(DeserializeError::UnknownTagId { id: id.to_string() }),
        },
    }
}

pub fn decode_tag(
    ctx: &SerdeContext<'_>,
    node: &Value,
    on_missing: OnMissing,
) -> Result<Tag, DeserializeError> {
    let obj = node.as_object().ok_or_else(|| DeserializeError::NotAnObject {
        context: "tag",
        found: json_kind(node),
    })?;
    let id = obj
        .get("typeName")
        .and_then(|v| v.as_str())
        .ok_or(DeserializeError::MissingField { context: "tag", field: "typeName" })?;

    let mut tag = Tag::new(resolve_tag_name(ctx, id, on_missing)?);
    tag.entity_guid = obj.get("entityGuid").and_then(|v| v.as_str()).map(str::to_string);
    if let Some(status) = obj.get("entityStatus").and_then(|v| v.as_str()) {
        tag.entity_status = Some(AssetStatus::from_wire(status).ok_or_else(|| {
            DeserializeError::InvalidStatus { value: status.to_string() }
        })?);
    }
    tag.propagate = obj.get("propagate").and_then(|v| v.as_bool());
    tag.remove_propagations_on_entity_delete = obj
        .get("removePropagationsOnEntityDelete")
        .and_then(|v| v.as_bool());
    tag.restrict_propagation_through_lineage = obj
        .get("restrictPropagationThroughLineage")
        .and_then(|v| v.as_bool());
    tag.restrict_propagation_through_hierarchy = obj
        .get("restrictPropagationThroughHierarchy")
        .and_then(|v| v.as_bool());
    Ok(tag)
}

pub fn encode_tag(ctx: &SerdeContext<'_>, tag: &Tag) -> Result<Value, SerializeError> {
    let id = ctx
        .translator
        .tag_id(&tag.type_name)
        .map_err(|source| SerializeError::Translation {
            what: "tag name",
            key: tag.type_name.clone(),
            source,
        })?
        .ok_or_else(|| SerializeError::UnknownTagName { name: tag.type_name.clone() })?;

    let mut obj = Map::new();
    obj.insert("typeName".to_string(), Value::String(id));
    if let Some(guid) = &tag.entity_guid {
        obj.insert("entityGuid".to_string(), Value::String(guid.clone()));
    }
    if let Some(status) = tag.entity_status {
        obj.insert("entityStatus".to_string(), Value::String(status.as_wire().to_string()));
    }
    if let Some(propagate) = tag.propagate {
        obj.insert("propagate".to_string(), Value::Bool(propagate));
    }
    if let Some(remove) = tag.remove_propagations_on_entity_delete {
        obj.insert("removePropagationsOnEntityDelete".to_string(), Value::Bool(remove));
    }
    if let Some(restrict) = tag.restrict_propagation_through_lineage {
        obj.insert("restrictPropagationThroughLineage".to_string(), Value::Bool(restrict));
    }
    if let Some(restrict) = tag.restrict_propagation_through_hierarchy {
        obj.insert("restrictPropagationThroughHierarchy".to_string(), Value::Bool(restrict));
    }
    Ok(Value::Object(obj))
}
