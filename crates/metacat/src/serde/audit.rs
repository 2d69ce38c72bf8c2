//! Audit-entry codec.
//!
//! An audit detail payload has no discriminator field; its variant is
//! inferred structurally. A `guid` means a full entity snapshot, a bare
//! `typeName` means a tag attach/detach, an `attributes` object alone means
//! a custom metadata change, and null means the entry carried no detail.
//! Audit payloads are historical, so identifier lookups that miss resolve
//! to the deleted sentinel instead of failing.

use serde_json::Value;

use crate::error::DeserializeError;
use crate::model::{AuditDetail, AuditEntry};
use crate::serde::asset::deserialize_asset_with;
use crate::serde::custom_metadata::from_business_attributes;
use crate::serde::tag::decode_tag;
use crate::serde::value::json_kind;
use crate::serde::SerdeContext;
use crate::translate::OnMissing;

pub fn deserialize_audit_entry(
    ctx: &SerdeContext<'_>,
    node: &Value,
) -> Result<AuditEntry, DeserializeError> {
    let obj = node.as_object().ok_or_else(|| DeserializeError::NotAnObject {
        context: "audit entry",
        found: json_kind(node),
    })?;
    Ok(AuditEntry {
        entity_guid: obj.get("entityGuid").and_then(|v| v.as_str()).map(str::to_string),
        action: obj.get("action").and_then(|v| v.as_str()).map(str::to_string),
        user: obj.get("user").and_then(|v| v.as_str()).map(str::to_string),
        timestamp: obj.get("timestamp").and_then(|v| v.as_i64()),
        detail: match obj.get("detail") {
            Some(detail) => deserialize_audit_detail(ctx, detail)?,
            None => None,
        },
    })
}

/// Infers and decodes the detail variant. Null in, `None` out.
pub fn deserialize_audit_detail(
    ctx: &SerdeContext<'_>,
    node: &Value,
) -> Result<Option<AuditDetail>, DeserializeError> {
    if node.is_null() {
        return Ok(None);
    }
    let obj = node.as_object().ok_or_else(|| DeserializeError::NotAnObject {
        context: "audit detail",
        found: json_kind(node),
    })?;

    if obj.get("guid").is_some_and(|v| !v.is_null()) {
        // Entity snapshots in history may carry custom metadata whose
        // definitions were purged since; decode those leniently.
        let asset = deserialize_asset_with(ctx, node, OnMissing::Deleted)?;
        return Ok(Some(AuditDetail::Entity(Box::new(asset))));
    }
    if obj.get("typeName").is_some_and(|v| !v.is_null()) {
        let tag = decode_tag(ctx, node, OnMissing::Deleted)?;
        return Ok(Some(AuditDetail::Tag(tag)));
    }
    if let Some(Value::Object(bucket)) = obj.get("attributes") {
        let cm = from_business_attributes(ctx, bucket, OnMissing::Deleted)?;
        return Ok(Some(AuditDetail::CustomMetadata(cm)));
    }
    Err(DeserializeError::MalformedAuditDetail {
        reason: "no guid, typeName, or attributes to infer the variant from",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TypeRegistry;
    use crate::translate::{StaticTranslator, DELETED_SENTINEL};
    use serde_json::json;

    fn translator() -> StaticTranslator {
        StaticTranslator::new()
            .with_tag("t1hash", "PII")
            .with_custom_metadata_set("setHash1", "Governance")
            .with_custom_metadata_attr("setHash1", "attrHashA", "steward")
    }

    #[test]
    fn test_null_detail_is_none() {
        let translator = translator();
        let ctx = SerdeContext::new(TypeRegistry::builtin(), &translator);
        assert_eq!(deserialize_audit_detail(&ctx, &json!(null)).unwrap(), None);
    }

    #[test]
    fn test_guid_wins_over_type_name() {
        let translator = translator();
        let ctx = SerdeContext::new(TypeRegistry::builtin(), &translator);
        let wire = json!({
            "typeName": "Table",
            "guid": "g1",
            "attributes": {"name": "orders"}
        });
        match deserialize_audit_detail(&ctx, &wire).unwrap() {
            Some(AuditDetail::Entity(asset)) => {
                assert_eq!(asset.guid.as_deref(), Some("g1"));
                assert_eq!(asset.type_name, "Table");
            }
            other => panic!("expected entity detail, got {other:?}"),
        }
    }

    #[test]
    fn test_entity_snapshot_tolerates_purged_custom_metadata() {
        let translator = translator();
        let ctx = SerdeContext::new(TypeRegistry::builtin(), &translator);
        // The set hash no longer resolves; a live entity read would fail,
        // but a historical snapshot decodes with the purged set dropped.
        let wire = json!({
            "guid": "g1",
            "typeName": "Table",
            "attributes": {"name": "orders", "goneSetHash.goneAttrHash": 1},
            "businessAttributes": {"purgedSetHash": {"purgedAttrHash": "x"}}
        });
        match deserialize_audit_detail(&ctx, &wire).unwrap() {
            Some(AuditDetail::Entity(asset)) => {
                assert_eq!(asset.guid.as_deref(), Some("g1"));
                assert!(asset.custom_metadata.is_empty());
            }
            other => panic!("expected entity detail, got {other:?}"),
        }
    }

    #[test]
    fn test_entity_snapshot_keeps_resolvable_custom_metadata_attrs() {
        let translator = translator();
        let ctx = SerdeContext::new(TypeRegistry::builtin(), &translator);
        let wire = json!({
            "guid": "g1",
            "typeName": "Table",
            "businessAttributes": {"setHash1": {"attrHashA": "alice", "ghostHash": 1}}
        });
        match deserialize_audit_detail(&ctx, &wire).unwrap() {
            Some(AuditDetail::Entity(asset)) => {
                let bag = &asset.custom_metadata["Governance"];
                assert_eq!(bag.attributes.len(), 1);
                assert!(bag.attributes.contains_key("steward"));
            }
            other => panic!("expected entity detail, got {other:?}"),
        }
    }

    #[test]
    fn test_type_name_without_guid_is_a_tag() {
        let translator = translator();
        let ctx = SerdeContext::new(TypeRegistry::builtin(), &translator);
        let wire = json!({"typeName": "t1hash", "propagate": true});
        match deserialize_audit_detail(&ctx, &wire).unwrap() {
            Some(AuditDetail::Tag(tag)) => assert_eq!(tag.type_name, "PII"),
            other => panic!("expected tag detail, got {other:?}"),
        }
    }

    #[test]
    fn test_deleted_tag_id_gets_sentinel() {
        let translator = translator();
        let ctx = SerdeContext::new(TypeRegistry::builtin(), &translator);
        let wire = json!({"typeName": "purgedHash"});
        match deserialize_audit_detail(&ctx, &wire).unwrap() {
            Some(AuditDetail::Tag(tag)) => assert_eq!(tag.type_name, DELETED_SENTINEL),
            other => panic!("expected tag detail, got {other:?}"),
        }
    }

    #[test]
    fn test_attributes_alone_is_custom_metadata() {
        let translator = translator();
        let ctx = SerdeContext::new(TypeRegistry::builtin(), &translator);
        let wire = json!({"attributes": {"setHash1": {"attrHashA": "alice"}}});
        match deserialize_audit_detail(&ctx, &wire).unwrap() {
            Some(AuditDetail::CustomMetadata(cm)) => {
                assert!(cm.contains_key("Governance"));
            }
            other => panic!("expected custom metadata detail, got {other:?}"),
        }
    }

    #[test]
    fn test_unrecognized_shape_rejected() {
        let translator = translator();
        let ctx = SerdeContext::new(TypeRegistry::builtin(), &translator);
        let err = deserialize_audit_detail(&ctx, &json!({"something": 1})).unwrap_err();
        assert!(matches!(err, DeserializeError::MalformedAuditDetail { .. }));
    }

    #[test]
    fn test_full_entry() {
        let translator = translator();
        let ctx = SerdeContext::new(TypeRegistry::builtin(), &translator);
        let wire = json!({
            "entityGuid": "g1",
            "action": "ENTITY_UPDATE",
            "user": "alice",
            "timestamp": 1700000000000i64,
            "detail": null
        });
        let entry = deserialize_audit_entry(&ctx, &wire).unwrap();
        assert_eq!(entry.entity_guid.as_deref(), Some("g1"));
        assert_eq!(entry.action.as_deref(), Some("ENTITY_UPDATE"));
        assert!(entry.detail.is_none());
    }
}
