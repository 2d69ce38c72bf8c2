//! The entity envelope codec.
//!
//! Deserialization runs in fixed stages: resolve the type descriptor
//! (falling back for unknown discriminators), read the common envelope
//! fields, short-circuit reference-shaped envelopes, then merge
//! `relationshipAttributes` over `attributes` with the relationship side
//! winning per-field conflicts. Attributes with no descriptor are either
//! translated as flattened custom metadata (`<setId>.<attrId>` keys) or
//! retained verbatim for round-tripping.
//!
//! Serialization walks the descriptor table and the tri-state field map:
//! absent fields are omitted, cleared fields emit `null` (scalars) or `[]`
//! (collections), and relationship values are partitioned across the
//! replace/append/remove buckets by each reference's semantic.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{DeserializeError, SerializeError};
use crate::model::{Asset, AssetStatus, AttrValue, FieldState, Meaning, Semantic};
use crate::registry::{FieldDescriptor, FieldKind, FieldTranslation};
use crate::serde::custom_metadata::{
    from_business_attributes, from_flat_attributes, to_business_attributes,
};
use crate::serde::tag::{decode_tag, encode_tag, resolve_tag_name};
use crate::serde::value::{attr_from_json, attr_to_json, decode_shaped, json_kind};
use crate::serde::SerdeContext;
use crate::translate::OnMissing;
use crate::util::encoding::{decode_text, encode_text};

// ============================================================================
// DECODING
// ============================================================================

/// Decodes an entity envelope that may be null.
pub fn deserialize_asset_opt(
    ctx: &SerdeContext<'_>,
    node: &Value,
) -> Result<Option<Asset>, DeserializeError> {
    if node.is_null() {
        return Ok(None);
    }
    deserialize_asset(ctx, node).map(Some)
}

pub fn deserialize_asset(
    ctx: &SerdeContext<'_>,
    node: &Value,
) -> Result<Asset, DeserializeError> {
    deserialize_asset_with(ctx, node, OnMissing::Fail)
}

/// Decodes an entity envelope with an explicit policy for custom metadata
/// IDs the translator no longer knows. Live entity reads stay strict; audit
/// snapshots decode leniently because their definitions may be purged.
pub(crate) fn deserialize_asset_with(
    ctx: &SerdeContext<'_>,
    node: &Value,
    cm_on_missing: OnMissing,
) -> Result<Asset, DeserializeError> {
    let obj = node.as_object().ok_or_else(|| DeserializeError::NotAnObject {
        context: "entity envelope",
        found: json_kind(node),
    })?;

    let wire_type = obj.get("typeName").and_then(|v| v.as_str());
    let descriptor = ctx.registry.resolve(wire_type.unwrap_or_default());
    // Keep the wire discriminator even when it resolved to the fallback, so
    // an unknown type round-trips unchanged.
    let mut asset = Asset::new(wire_type.unwrap_or(descriptor.type_name()));

    asset.guid = obj.get("guid").and_then(|v| v.as_str()).map(str::to_string);
    if let Some(status) = obj.get("status").and_then(|v| v.as_str()) {
        asset.status = Some(parse_status(status)?);
    }
    asset.created_by = obj.get("createdBy").and_then(|v| v.as_str()).map(str::to_string);
    asset.updated_by = obj.get("updatedBy").and_then(|v| v.as_str()).map(str::to_string);
    asset.create_time = obj.get("createTime").and_then(|v| v.as_i64());
    asset.update_time = obj.get("updateTime").and_then(|v| v.as_i64());

    if let Some(tasks) = obj.get("pendingTasks").and_then(|v| v.as_array()) {
        asset.pending_tasks = tasks
            .iter()
            .filter_map(|t| t.as_str().map(str::to_string))
            .collect();
    }
    if let Some(meanings) = obj.get("meanings") {
        if !meanings.is_null() {
            asset.meanings = serde_json::from_value::<Vec<Meaning>>(meanings.clone())
                .map_err(|e| DeserializeError::MalformedValue {
                    context: "meanings",
                    reason: e.to_string(),
                })?;
        }
    }
    if let Some(tags) = obj.get("classifications").and_then(|v| v.as_array()) {
        for tag in tags {
            asset.tags.push(decode_tag(ctx, tag, OnMissing::Deleted)?);
        }
    }
    if let Some(ids) = obj.get("classificationNames").and_then(|v| v.as_array()) {
        for id in ids {
            if let Some(id) = id.as_str() {
                asset
                    .tag_names
                    .push(resolve_tag_name(ctx, id, OnMissing::Deleted)?);
            }
        }
    }

    // A non-null relationshipGuid marks a reference-shaped envelope: it
    // identifies an edge, not an entity, so the attribute merge is skipped.
    if let Some(rel_guid) = obj.get("relationshipGuid").and_then(|v| v.as_str()) {
        asset.relationship_guid = Some(rel_guid.to_string());
        asset.relationship_type = obj
            .get("relationshipType")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        if let Some(status) = obj.get("relationshipStatus").and_then(|v| v.as_str()) {
            asset.relationship_status = Some(parse_status(status)?);
        }
        if let Some(unique) = obj.get("uniqueAttributes").and_then(|v| v.as_object()) {
            let mut entries = BTreeMap::new();
            for (key, value) in unique {
                if let Some(decoded) = attr_from_json(value) {
                    entries.insert(key.clone(), decoded);
                }
            }
            asset.unique_attributes = Some(entries);
        }
        asset.raw = Some(node.clone());
        return Ok(asset);
    }

    // Relationship attributes first; any field they set wins over the same
    // field in the plain attributes bucket.
    let mut merged: FxHashSet<&str> = FxHashSet::default();
    if let Some(rel_attrs) = obj.get("relationshipAttributes").and_then(|v| v.as_object()) {
        for (name, value) in rel_attrs {
            merged.insert(name.as_str());
            match descriptor.field(name) {
                Some(fd) => apply_field(ctx, &mut asset, fd, name, value)?,
                None => {
                    debug!(field = name.as_str(), "no descriptor, keeping verbatim");
                    asset.unmapped.insert(name.clone(), value.clone());
                }
            }
        }
    }

    let mut leftovers: BTreeMap<String, Value> = BTreeMap::new();
    if let Some(attrs) = obj.get("attributes").and_then(|v| v.as_object()) {
        for (name, value) in attrs {
            if merged.contains(name.as_str()) {
                continue;
            }
            match descriptor.field(name) {
                Some(fd) => apply_field(ctx, &mut asset, fd, name, value)?,
                None => {
                    leftovers.insert(name.clone(), value.clone());
                }
            }
        }
    }

    let business = obj
        .get("businessAttributes")
        .and_then(|v| v.as_object())
        .filter(|bucket| !bucket.is_empty());
    let (flat_cm, passthrough) = from_flat_attributes(ctx, leftovers, cm_on_missing)?;
    match business {
        Some(bucket) => {
            if !flat_cm.is_empty() {
                return Err(DeserializeError::ConflictingCustomMetadata {
                    guid: asset.guid.clone().unwrap_or_default(),
                });
            }
            asset.custom_metadata = from_business_attributes(ctx, bucket, cm_on_missing)?;
        }
        None => asset.custom_metadata = flat_cm,
    }
    asset.unmapped.extend(passthrough);

    asset.raw = Some(node.clone());
    Ok(asset)
}

fn parse_status(status: &str) -> Result<AssetStatus, DeserializeError> {
    AssetStatus::from_wire(status)
        .ok_or_else(|| DeserializeError::InvalidStatus { value: status.to_string() })
}

/// Decodes one descriptor-known field into the tri-state map. A wire `null`
/// is the explicit cleared state.
fn apply_field(
    ctx: &SerdeContext<'_>,
    asset: &mut Asset,
    fd: &FieldDescriptor,
    name: &str,
    value: &Value,
) -> Result<(), DeserializeError> {
    if fd.kind == FieldKind::CustomMetadataCarrier {
        debug!(field = name, "custom metadata carrier inside attributes, skipping");
        return Ok(());
    }
    if value.is_null() {
        asset.clear_attr(name);
        return Ok(());
    }
    asset.set_attr(name, decode_field_value(ctx, fd, name, value)?);
    Ok(())
}

/// Decodes a non-null value through the field's declared shape and
/// translation. Shared by the entity merge and the standalone
/// relationship-attributes codec so hashed tag IDs and encoded text resolve
/// the same way on both paths.
pub(crate) fn decode_field_value(
    ctx: &SerdeContext<'_>,
    fd: &FieldDescriptor,
    name: &str,
    value: &Value,
) -> Result<AttrValue, DeserializeError> {
    let decoded = match fd.translation {
        FieldTranslation::None => decode_shaped(name, fd.shape, value)?,
        FieldTranslation::TagName => {
            let id = value.as_str().ok_or_else(|| DeserializeError::ShapeMismatch {
                field: name.to_string(),
                expected: "string",
                found: json_kind(value),
            })?;
            AttrValue::Text(resolve_tag_name(ctx, id, OnMissing::Deleted)?)
        }
        FieldTranslation::TagNameList => {
            let ids = value.as_array().ok_or_else(|| DeserializeError::ShapeMismatch {
                field: name.to_string(),
                expected: "array",
                found: json_kind(value),
            })?;
            let mut names = Vec::with_capacity(ids.len());
            for id in ids {
                let id = id.as_str().ok_or_else(|| DeserializeError::ShapeMismatch {
                    field: name.to_string(),
                    expected: "string",
                    found: json_kind(id),
                })?;
                names.push(AttrValue::Text(resolve_tag_name(ctx, id, OnMissing::Deleted)?));
            }
            if fd.shape.is_collection() {
                AttrValue::set_of(names)
            } else {
                AttrValue::List(names)
            }
        }
        FieldTranslation::EncodedText => {
            let encoded = value.as_str().ok_or_else(|| DeserializeError::ShapeMismatch {
                field: name.to_string(),
                expected: "string",
                found: json_kind(value),
            })?;
            AttrValue::Text(decode_text(encoded).map_err(|e| {
                DeserializeError::InvalidEncodedText {
                    field: name.to_string(),
                    reason: e.to_string(),
                }
            })?)
        }
    };
    Ok(decoded)
}

// ============================================================================
// ENCODING
// ============================================================================

pub fn serialize_asset(ctx: &SerdeContext<'_>, asset: &Asset) -> Result<Value, SerializeError> {
    let descriptor = ctx.registry.resolve(&asset.type_name);
    let mut root = Map::new();
    root.insert("typeName".to_string(), Value::String(asset.type_name.clone()));
    if let Some(guid) = &asset.guid {
        root.insert("guid".to_string(), Value::String(guid.clone()));
    }
    if let Some(status) = asset.status {
        root.insert("status".to_string(), Value::String(status.as_wire().to_string()));
    }
    if let Some(created_by) = &asset.created_by {
        root.insert("createdBy".to_string(), Value::String(created_by.clone()));
    }
    if let Some(updated_by) = &asset.updated_by {
        root.insert("updatedBy".to_string(), Value::String(updated_by.clone()));
    }
    if let Some(create_time) = asset.create_time {
        root.insert("createTime".to_string(), Value::Number(create_time.into()));
    }
    if let Some(update_time) = asset.update_time {
        root.insert("updateTime".to_string(), Value::Number(update_time.into()));
    }

    if !asset.tags.is_empty() {
        let mut tags = Vec::with_capacity(asset.tags.len());
        for tag in &asset.tags {
            tags.push(encode_tag(ctx, tag)?);
        }
        root.insert("classifications".to_string(), Value::Array(tags));
    }
    if !asset.tag_names.is_empty() {
        let mut ids = Vec::with_capacity(asset.tag_names.len());
        for name in &asset.tag_names {
            ids.push(Value::String(resolve_tag_id(ctx, name)?));
        }
        root.insert("classificationNames".to_string(), Value::Array(ids));
    }
    if !asset.meanings.is_empty() {
        let meanings = serde_json::to_value(&asset.meanings).map_err(|e| {
            SerializeError::Encode { context: "meanings", reason: e.to_string() }
        })?;
        root.insert("meanings".to_string(), meanings);
    }
    if !asset.pending_tasks.is_empty() {
        root.insert(
            "pendingTasks".to_string(),
            Value::Array(
                asset
                    .pending_tasks
                    .iter()
                    .map(|t| Value::String(t.clone()))
                    .collect(),
            ),
        );
    }

    // Reference-shaped assets serialize as the edge they identify.
    if let Some(rel_guid) = &asset.relationship_guid {
        root.insert("relationshipGuid".to_string(), Value::String(rel_guid.clone()));
        if let Some(rel_type) = &asset.relationship_type {
            root.insert("relationshipType".to_string(), Value::String(rel_type.clone()));
        }
        if let Some(status) = asset.relationship_status {
            root.insert(
                "relationshipStatus".to_string(),
                Value::String(status.as_wire().to_string()),
            );
        }
        if let Some(unique) = &asset.unique_attributes {
            let mut unique_obj = Map::new();
            for (key, value) in unique {
                unique_obj.insert(key.clone(), attr_to_json(value)?);
            }
            root.insert("uniqueAttributes".to_string(), Value::Object(unique_obj));
        }
        return Ok(Value::Object(root));
    }

    let mut attributes = Map::new();
    let mut append = Map::new();
    let mut remove = Map::new();

    for fd in descriptor.fields() {
        if fd.kind == FieldKind::CustomMetadataCarrier {
            continue;
        }
        let Some(state) = asset.field_state(fd.name) else {
            continue;
        };
        match state {
            FieldState::Cleared => {
                let cleared = if fd.shape.is_collection() {
                    Value::Array(Vec::new())
                } else {
                    Value::Null
                };
                attributes.insert(fd.name.to_string(), cleared);
            }
            FieldState::Present(value) => {
                if value.is_empty_collection() {
                    // Present-but-empty is not a clear request; omit it.
                    continue;
                }
                match fd.kind {
                    FieldKind::RelationshipSingle | FieldKind::RelationshipCollection => {
                        encode_relationship_field(
                            fd, value, &mut attributes, &mut append, &mut remove,
                        )?;
                    }
                    _ => {
                        let encoded = encode_plain_field(ctx, fd, value)?;
                        attributes.insert(fd.name.to_string(), encoded);
                    }
                }
            }
        }
    }
    // Fields set by hand with no descriptor still make it onto the wire:
    // present values encode generically, clears emit null. Mirrors the
    // decoder keeping unknown attributes instead of discarding them.
    for (name, state) in asset.fields() {
        if descriptor.field(name).is_some() {
            continue;
        }
        debug!(field = name, type_name = asset.type_name.as_str(),
            "field has no descriptor, encoding generically");
        match state {
            FieldState::Cleared => {
                attributes.insert(name.to_string(), Value::Null);
            }
            FieldState::Present(value) => {
                attributes.insert(name.to_string(), attr_to_json(value)?);
            }
        }
    }

    for (name, value) in &asset.unmapped {
        attributes.insert(name.clone(), value.clone());
    }
    if !asset.custom_metadata.is_empty() {
        root.insert(
            "businessAttributes".to_string(),
            to_business_attributes(ctx, &asset.custom_metadata)?,
        );
    }
    if !attributes.is_empty() {
        root.insert("attributes".to_string(), Value::Object(attributes));
    }
    if !append.is_empty() {
        root.insert("appendRelationshipAttributes".to_string(), Value::Object(append));
    }
    if !remove.is_empty() {
        root.insert("removeRelationshipAttributes".to_string(), Value::Object(remove));
    }
    Ok(Value::Object(root))
}

fn resolve_tag_id(ctx: &SerdeContext<'_>, name: &str) -> Result<String, SerializeError> {
    ctx.translator
        .tag_id(name)
        .map_err(|source| SerializeError::Translation {
            what: "tag name",
            key: name.to_string(),
            source,
        })?
        .ok_or_else(|| SerializeError::UnknownTagName { name: name.to_string() })
}

/// Splits a relationship value across the three envelope buckets by each
/// reference's semantic.
fn encode_relationship_field(
    fd: &FieldDescriptor,
    value: &AttrValue,
    attributes: &mut Map<String, Value>,
    append: &mut Map<String, Value>,
    remove: &mut Map<String, Value>,
) -> Result<(), SerializeError> {
    let bucket_for = |semantic: Semantic| match semantic {
        Semantic::Replace => 0usize,
        Semantic::Append => 1,
        Semantic::Remove => 2,
    };
    let mut buckets: [Vec<Value>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    match value {
        AttrValue::Relation(reference) => {
            buckets[bucket_for(reference.semantic)].push(attr_to_json(value)?);
        }
        AttrValue::List(items) | AttrValue::Set(items) => {
            for item in items {
                match item {
                    AttrValue::Relation(reference) => {
                        buckets[bucket_for(reference.semantic)].push(attr_to_json(item)?);
                    }
                    other => buckets[0].push(attr_to_json(other)?),
                }
            }
        }
        other => {
            buckets[0].push(attr_to_json(other)?);
        }
    }

    let single = fd.kind == FieldKind::RelationshipSingle;
    for (bucket, target) in buckets.into_iter().zip([attributes, append, remove]) {
        if bucket.is_empty() {
            continue;
        }
        let encoded = if single && bucket.len() == 1 {
            bucket.into_iter().next().unwrap_or(Value::Null)
        } else {
            Value::Array(bucket)
        };
        target.insert(fd.name.to_string(), encoded);
    }
    Ok(())
}

fn encode_plain_field(
    ctx: &SerdeContext<'_>,
    fd: &FieldDescriptor,
    value: &AttrValue,
) -> Result<Value, SerializeError> {
    match fd.translation {
        FieldTranslation::None => attr_to_json(value),
        FieldTranslation::TagName => match value.as_text() {
            Some(name) => Ok(Value::String(resolve_tag_id(ctx, name)?)),
            None => attr_to_json(value),
        },
        FieldTranslation::TagNameList => match value {
            AttrValue::List(items) | AttrValue::Set(items) => {
                let mut ids = Vec::with_capacity(items.len());
                for item in items {
                    match item.as_text() {
                        Some(name) => ids.push(Value::String(resolve_tag_id(ctx, name)?)),
                        None => ids.push(attr_to_json(item)?),
                    }
                }
                Ok(Value::Array(ids))
            }
            other => attr_to_json(other),
        },
        FieldTranslation::EncodedText => match value.as_text() {
            Some(text) => Ok(Value::String(encode_text(text))),
            None => attr_to_json(value),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Reference;
    use crate::registry::TypeRegistry;
    use crate::translate::{StaticTranslator, DELETED_SENTINEL};
    use serde_json::json;

    fn translator() -> StaticTranslator {
        StaticTranslator::new()
            .with_tag("t1hash", "PII")
            .with_tag("t2hash", "Sensitive")
            .with_custom_metadata_set("setHash1", "Governance")
            .with_custom_metadata_attr("setHash1", "attrHashA", "steward")
    }

    fn ctx(translator: &StaticTranslator) -> SerdeContext<'_> {
        SerdeContext::new(TypeRegistry::builtin(), translator)
    }

    #[test]
    fn test_round_trip_table() {
        let translator = translator();
        let ctx = ctx(&translator);
        let wire = json!({
            "typeName": "Table",
            "guid": "g1",
            "status": "ACTIVE",
            "attributes": {
                "name": "orders",
                "description": "order table",
                "columnCount": 12,
                "ownerUsers": ["bob", "alice"]
            }
        });
        let asset = deserialize_asset(&ctx, &wire).unwrap();
        assert_eq!(asset.attr("name"), Some(&AttrValue::Text("orders".into())));
        assert_eq!(asset.attr("columnCount"), Some(&AttrValue::Int(12)));

        let reserialized = serialize_asset(&ctx, &asset).unwrap();
        assert_eq!(reserialized, wire);
        // Decoding the output again must produce an equal asset.
        assert_eq!(deserialize_asset(&ctx, &reserialized).unwrap(), asset);
    }

    #[test]
    fn test_fully_populated_round_trip() {
        let translator = translator();
        let ctx = ctx(&translator);
        // Every envelope section at once: root metadata, tags by object and
        // by ID, meanings, pending tasks, custom metadata, plain and
        // translated attributes, and both relationship arities.
        let wire = json!({
            "typeName": "Table",
            "guid": "g1",
            "status": "ACTIVE",
            "createdBy": "alice",
            "updatedBy": "bob",
            "createTime": 1700000000000i64,
            "updateTime": 1700000005000i64,
            "classifications": [{"typeName": "t1hash", "propagate": true}],
            "classificationNames": ["t1hash", "t2hash"],
            "meanings": [{"termGuid": "term1", "displayText": "Orders"}],
            "pendingTasks": ["task1"],
            "businessAttributes": {"setHash1": {"attrHashA": "alice"}},
            "attributes": {
                "qualifiedName": "default/db/sales/orders",
                "name": "orders",
                "description": "order table",
                "certificateStatus": "VERIFIED",
                "isPartitioned": true,
                "popularityScore": 0.5,
                "columnCount": 2,
                "ownerUsers": ["bob", "alice"],
                "atlanSchema": {"typeName": "Schema", "guid": "s1"},
                "columns": [
                    {"typeName": "Column", "guid": "c1"},
                    {
                        "typeName": "Column",
                        "uniqueAttributes": {"qualifiedName": "default/db/sales/orders/c2"}
                    }
                ]
            }
        });
        let asset = deserialize_asset(&ctx, &wire).unwrap();
        assert_eq!(asset.tags[0].type_name, "PII");
        assert_eq!(asset.tag_names, vec!["PII".to_string(), "Sensitive".to_string()]);
        assert_eq!(asset.attr("popularityScore"), Some(&AttrValue::Float(0.5)));
        assert_eq!(
            asset.custom_metadata["Governance"].attributes["steward"],
            AttrValue::Text("alice".into())
        );

        let out = serialize_asset(&ctx, &asset).unwrap();
        assert_eq!(out, wire);
        assert_eq!(deserialize_asset(&ctx, &out).unwrap(), asset);
        let first = serde_json::to_string(&out).unwrap();
        let second = serde_json::to_string(&serialize_asset(&ctx, &asset).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_struct_and_map_attributes_round_trip() {
        let translator = translator();
        let ctx = ctx(&translator);
        let column_wire = json!({
            "typeName": "Column",
            "guid": "c1",
            "attributes": {
                "dataType": "DECIMAL",
                "numericScale": 2.0,
                "columnHistogram": {
                    "typeName": "Histogram",
                    "boundaries": [1.5, 2.5],
                    "frequencies": [10, 20]
                },
                "table": {"typeName": "Table", "guid": "t1"}
            }
        });
        let column = deserialize_asset(&ctx, &column_wire).unwrap();
        assert!(matches!(column.attr("columnHistogram"), Some(AttrValue::Struct(_))));
        assert_eq!(serialize_asset(&ctx, &column).unwrap(), column_wire);

        let resource_wire = json!({
            "typeName": "Resource",
            "guid": "r1",
            "attributes": {
                "link": "https://example.com/runbook",
                "resourceMetadata": {"icon": "book", "pinned": true}
            }
        });
        let resource = deserialize_asset(&ctx, &resource_wire).unwrap();
        assert!(matches!(resource.attr("resourceMetadata"), Some(AttrValue::Map(_))));
        assert_eq!(serialize_asset(&ctx, &resource).unwrap(), resource_wire);
    }

    #[test]
    fn test_relationship_attributes_win_conflicts() {
        let translator = translator();
        let ctx = ctx(&translator);
        let wire = json!({
            "typeName": "Table",
            "guid": "g1",
            "relationshipAttributes": {"description": "from the edge"},
            "attributes": {"description": "from the entity", "name": "orders"}
        });
        let asset = deserialize_asset(&ctx, &wire).unwrap();
        assert_eq!(
            asset.attr("description"),
            Some(&AttrValue::Text("from the edge".into()))
        );
        assert_eq!(asset.attr("name"), Some(&AttrValue::Text("orders".into())));
    }

    #[test]
    fn test_null_means_cleared_and_serializes_back() {
        let translator = translator();
        let ctx = ctx(&translator);
        let wire = json!({
            "typeName": "Table",
            "attributes": {"description": null, "ownerUsers": null}
        });
        let asset = deserialize_asset(&ctx, &wire).unwrap();
        assert!(asset.is_cleared("description"));
        assert!(asset.is_cleared("ownerUsers"));

        let out = serialize_asset(&ctx, &asset).unwrap();
        assert_eq!(out["attributes"]["description"], json!(null));
        // Collections clear with an explicit empty array.
        assert_eq!(out["attributes"]["ownerUsers"], json!([]));
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let translator = translator();
        let ctx = ctx(&translator);
        let mut asset = Asset::new("Table");
        asset.guid = Some("g1".to_string());
        asset.set_attr("name", "orders");
        let out = serialize_asset(&ctx, &asset).unwrap();
        let attrs = out["attributes"].as_object().unwrap();
        assert_eq!(attrs.len(), 1);
        assert!(attrs.contains_key("name"));
    }

    #[test]
    fn test_unknown_type_falls_back_but_keeps_discriminator() {
        let translator = translator();
        let ctx = ctx(&translator);
        let wire = json!({
            "typeName": "TotallyUnknownType123",
            "guid": "g1",
            "attributes": {"mysteryField": "kept"}
        });
        let asset = deserialize_asset(&ctx, &wire).unwrap();
        assert_eq!(asset.type_name, "TotallyUnknownType123");
        assert_eq!(asset.guid.as_deref(), Some("g1"));
        // No descriptor for the type's own fields, so everything lands in
        // the verbatim leftovers and survives the round trip.
        assert_eq!(asset.unmapped["mysteryField"], json!("kept"));
        let out = serialize_asset(&ctx, &asset).unwrap();
        assert_eq!(out["attributes"]["mysteryField"], json!("kept"));
    }

    #[test]
    fn test_reference_shaped_envelope_skips_merge() {
        let translator = translator();
        let ctx = ctx(&translator);
        let wire = json!({
            "typeName": "Table",
            "guid": "g1",
            "relationshipGuid": "edge1",
            "relationshipType": "table_columns",
            "relationshipStatus": "ACTIVE",
            "uniqueAttributes": {"qualifiedName": "default/db/s/orders"},
            "attributes": {"name": "ignored for references"}
        });
        let asset = deserialize_asset(&ctx, &wire).unwrap();
        assert_eq!(asset.relationship_guid.as_deref(), Some("edge1"));
        assert_eq!(asset.relationship_status, Some(AssetStatus::Active));
        assert!(asset.attr("name").is_none());
        assert_eq!(
            asset.unique_attributes.as_ref().unwrap()["qualifiedName"],
            AttrValue::Text("default/db/s/orders".into())
        );
    }

    #[test]
    fn test_relationship_partition_by_semantic() {
        let translator = translator();
        let ctx = ctx(&translator);
        let mut asset = Asset::new("Table");
        asset.set_attr(
            "columns",
            AttrValue::List(vec![
                AttrValue::Relation(Box::new(Reference::by_guid("Column", "c1"))),
                AttrValue::Relation(Box::new(
                    Reference::by_guid("Column", "c2").with_semantic(Semantic::Append),
                )),
                AttrValue::Relation(Box::new(
                    Reference::by_guid("Column", "c3").with_semantic(Semantic::Remove),
                )),
            ]),
        );
        let out = serialize_asset(&ctx, &asset).unwrap();
        assert_eq!(out["attributes"]["columns"][0]["guid"], json!("c1"));
        assert_eq!(out["appendRelationshipAttributes"]["columns"][0]["guid"], json!("c2"));
        assert_eq!(out["removeRelationshipAttributes"]["columns"][0]["guid"], json!("c3"));
    }

    #[test]
    fn test_single_relationship_append_bucket() {
        let translator = translator();
        let ctx = ctx(&translator);
        let mut asset = Asset::new("Table");
        asset.set_attr(
            "atlanSchema",
            AttrValue::Relation(Box::new(
                Reference::by_guid("Schema", "s1").with_semantic(Semantic::Append),
            )),
        );
        let out = serialize_asset(&ctx, &asset).unwrap();
        assert!(out.get("attributes").is_none());
        assert_eq!(
            out["appendRelationshipAttributes"]["atlanSchema"]["guid"],
            json!("s1")
        );
    }

    #[test]
    fn test_descriptorless_fields_encode_generically() {
        let translator = translator();
        let ctx = ctx(&translator);
        let mut asset = Asset::new("Table");
        asset.set_attr("sourceSpecificFlag", AttrValue::Bool(true));
        asset.clear_attr("sourceSpecificNote");
        let out = serialize_asset(&ctx, &asset).unwrap();
        // Hand-set fields with no descriptor still reach the wire.
        assert_eq!(out["attributes"]["sourceSpecificFlag"], json!(true));
        assert_eq!(out["attributes"]["sourceSpecificNote"], json!(null));
    }

    #[test]
    fn test_flat_custom_metadata_translates() {
        let translator = translator();
        let ctx = ctx(&translator);
        let wire = json!({
            "typeName": "Table",
            "guid": "g1",
            "attributes": {"setHash1.attrHashA": "alice", "name": "orders"}
        });
        let asset = deserialize_asset(&ctx, &wire).unwrap();
        assert_eq!(
            asset.custom_metadata["Governance"].attributes["steward"],
            AttrValue::Text("alice".into())
        );
        // Serialization always emits the nested bucket form.
        let out = serialize_asset(&ctx, &asset).unwrap();
        assert_eq!(out["businessAttributes"]["setHash1"]["attrHashA"], json!("alice"));
        assert!(out["attributes"].as_object().unwrap().get("setHash1.attrHashA").is_none());
    }

    #[test]
    fn test_both_custom_metadata_encodings_conflict() {
        let translator = translator();
        let ctx = ctx(&translator);
        let wire = json!({
            "typeName": "Table",
            "guid": "g1",
            "attributes": {"setHash1.attrHashA": "alice"},
            "businessAttributes": {"setHash1": {"attrHashA": "bob"}}
        });
        let err = deserialize_asset(&ctx, &wire).unwrap_err();
        assert!(matches!(err, DeserializeError::ConflictingCustomMetadata { .. }));
    }

    #[test]
    fn test_readme_description_percent_codec() {
        let translator = translator();
        let ctx = ctx(&translator);
        let wire = json!({
            "typeName": "Readme",
            "attributes": {"description": "50%25%20done"}
        });
        let asset = deserialize_asset(&ctx, &wire).unwrap();
        assert_eq!(asset.attr("description"), Some(&AttrValue::Text("50% done".into())));
        let out = serialize_asset(&ctx, &asset).unwrap();
        assert_eq!(out["attributes"]["description"], json!("50%25%20done"));
    }

    #[test]
    fn test_purpose_tag_list_translates_both_ways() {
        let translator = translator();
        let ctx = ctx(&translator);
        let wire = json!({
            "typeName": "Purpose",
            "attributes": {"purposeClassifications": ["t1hash", "t2hash", "t1hash"]}
        });
        let asset = deserialize_asset(&ctx, &wire).unwrap();
        assert_eq!(
            asset.attr("purposeClassifications"),
            Some(&AttrValue::Set(vec![
                AttrValue::Text("PII".into()),
                AttrValue::Text("Sensitive".into()),
            ]))
        );
        let out = serialize_asset(&ctx, &asset).unwrap();
        assert_eq!(
            out["attributes"]["purposeClassifications"],
            json!(["t1hash", "t2hash"])
        );
    }

    #[test]
    fn test_deleted_tag_id_in_classifications() {
        let translator = translator();
        let ctx = ctx(&translator);
        let wire = json!({
            "typeName": "Table",
            "classifications": [{"typeName": "purgedHash"}],
            "classificationNames": ["purgedHash"]
        });
        let asset = deserialize_asset(&ctx, &wire).unwrap();
        assert_eq!(asset.tags[0].type_name, DELETED_SENTINEL);
        assert_eq!(asset.tag_names[0], DELETED_SENTINEL);
    }

    #[test]
    fn test_repeated_serialization_is_byte_identical() {
        let translator = translator();
        let ctx = ctx(&translator);
        let wire = json!({
            "typeName": "Table",
            "guid": "g1",
            "attributes": {
                "name": "orders",
                "ownerUsers": ["bob", "alice"],
                "columnCount": 3
            },
            "classifications": [{"typeName": "t1hash"}]
        });
        let asset = deserialize_asset(&ctx, &wire).unwrap();
        let first = serde_json::to_string(&serialize_asset(&ctx, &asset).unwrap()).unwrap();
        let second = serde_json::to_string(&serialize_asset(&ctx, &asset).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_null_envelope_is_none() {
        let translator = translator();
        let ctx = ctx(&translator);
        assert_eq!(deserialize_asset_opt(&ctx, &json!(null)).unwrap(), None);
    }

    #[test]
    fn test_nested_array_attribute_rejected() {
        let translator = translator();
        let ctx = ctx(&translator);
        let wire = json!({
            "typeName": "Table",
            "attributes": {"ownerUsers": [["nested"]]}
        });
        let err = deserialize_asset(&ctx, &wire).unwrap_err();
        assert!(matches!(err, DeserializeError::NestedArray { .. }));
    }
}
