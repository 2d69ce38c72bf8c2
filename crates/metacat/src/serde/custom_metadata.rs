//! Custom metadata translation.
//!
//! Custom metadata arrives in one of two wire encodings. The
//! `businessAttributes` bucket nests hashed set IDs over hashed attribute
//! IDs; search payloads instead flatten each pair into a single
//! `<setId>.<attrId>` key inside `attributes`. Both decode to the same
//! readable-name map on [`Asset`](crate::model::Asset), and serialization
//! always emits the nested bucket.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{DeserializeError, SerializeError, TranslationError};
use crate::model::CustomMetadataAttributes;
use crate::serde::value::{attr_from_json, attr_to_json, json_kind};
use crate::serde::SerdeContext;
use crate::translate::{OnMissing, DELETED_SENTINEL};

fn wrap_decode(what: &'static str, key: &str) -> impl FnOnce(TranslationError) -> DeserializeError {
    let key = key.to_string();
    move |source| DeserializeError::Translation { what, key, source }
}

fn resolve_set_name(
    ctx: &SerdeContext<'_>,
    set_id: &str,
    on_missing: OnMissing,
) -> Result<Option<String>, DeserializeError> {
    match ctx
        .translator
        .custom_metadata_set_name(set_id)
        .map_err(wrap_decode("custom metadata set ID", set_id))?
    {
        Some(name) => Ok(Some(name)),
        None => match on_missing {
            OnMissing::Deleted => {
                debug!(set_id, "custom metadata set ID no longer resolves");
                Ok(Some(DELETED_SENTINEL.to_string()))
            }
            OnMissing::Fail => Err(DeserializeError::UnknownCustomMetadataSet {
                id: set_id.to_string(),
            }),
        },
    }
}

fn resolve_attr_name(
    ctx: &SerdeContext<'_>,
    set_id: &str,
    attr_id: &str,
    on_missing: OnMissing,
) -> Result<Option<String>, DeserializeError> {
    match ctx
        .translator
        .custom_metadata_attr_name(set_id, attr_id)
        .map_err(wrap_decode("custom metadata attribute ID", attr_id))?
    {
        Some(name) => Ok(Some(name)),
        None => match on_missing {
            OnMissing::Deleted => {
                debug!(set_id, attr_id, "custom metadata attribute ID no longer resolves");
                Ok(None)
            }
            OnMissing::Fail => Err(DeserializeError::UnknownCustomMetadataAttr {
                set_id: set_id.to_string(),
                attr_id: attr_id.to_string(),
            }),
        },
    }
}

/// Decodes the nested `businessAttributes` bucket into a readable-name map.
pub fn from_business_attributes(
    ctx: &SerdeContext<'_>,
    bucket: &Map<String, Value>,
    on_missing: OnMissing,
) -> Result<BTreeMap<String, CustomMetadataAttributes>, DeserializeError> {
    let mut out: BTreeMap<String, CustomMetadataAttributes> = BTreeMap::new();
    for (set_id, set_value) in bucket {
        let entries = set_value.as_object().ok_or_else(|| DeserializeError::ShapeMismatch {
            field: set_id.clone(),
            expected: "custom metadata object",
            found: json_kind(set_value),
        })?;
        let Some(set_name) = resolve_set_name(ctx, set_id, on_missing)? else {
            continue;
        };
        let bag = out.entry(set_name).or_default();
        for (attr_id, attr_value) in entries {
            let Some(attr_name) = resolve_attr_name(ctx, set_id, attr_id, on_missing)? else {
                continue;
            };
            if let Some(decoded) = attr_from_json(attr_value) {
                bag.attributes.insert(attr_name, decoded);
            }
        }
    }
    out.retain(|_, bag| !bag.is_empty());
    Ok(out)
}

/// Splits leftover flattened `attributes` entries into translated custom
/// metadata (`<setId>.<attrId>` keys) and opaque passthrough values.
pub fn from_flat_attributes(
    ctx: &SerdeContext<'_>,
    leftovers: BTreeMap<String, Value>,
    on_missing: OnMissing,
) -> Result<
    (BTreeMap<String, CustomMetadataAttributes>, BTreeMap<String, Value>),
    DeserializeError,
> {
    let mut custom_metadata: BTreeMap<String, CustomMetadataAttributes> = BTreeMap::new();
    let mut passthrough = BTreeMap::new();
    for (key, value) in leftovers {
        let Some((set_id, attr_id)) = key.split_once('.') else {
            passthrough.insert(key, value);
            continue;
        };
        let Some(set_name) = resolve_set_name(ctx, set_id, on_missing)? else {
            continue;
        };
        let Some(attr_name) = resolve_attr_name(ctx, set_id, attr_id, on_missing)? else {
            continue;
        };
        if let Some(decoded) = attr_from_json(&value) {
            custom_metadata
                .entry(set_name)
                .or_default()
                .attributes
                .insert(attr_name, decoded);
        }
    }
    Ok((custom_metadata, passthrough))
}

/// Encodes the readable-name map back into the nested hashed-ID bucket.
pub fn to_business_attributes(
    ctx: &SerdeContext<'_>,
    custom_metadata: &BTreeMap<String, CustomMetadataAttributes>,
) -> Result<Value, SerializeError> {
    let mut bucket = Map::new();
    for (set_name, bag) in custom_metadata {
        let set_id = ctx
            .translator
            .custom_metadata_set_id(set_name)
            .map_err(|source| SerializeError::Translation {
                what: "custom metadata set name",
                key: set_name.clone(),
                source,
            })?
            .ok_or_else(|| SerializeError::UnknownCustomMetadataSetName {
                name: set_name.clone(),
            })?;
        let mut entries = Map::new();
        for (attr_name, attr_value) in &bag.attributes {
            let attr_id = ctx
                .translator
                .custom_metadata_attr_id(&set_id, attr_name)
                .map_err(|source| SerializeError::Translation {
                    what: "custom metadata attribute name",
                    key: attr_name.clone(),
                    source,
                })?
                .ok_or_else(|| SerializeError::UnknownCustomMetadataAttrName {
                    set_name: set_name.clone(),
                    attr_name: attr_name.clone(),
                })?;
            entries.insert(attr_id, attr_to_json(attr_value)?);
        }
        bucket.insert(set_id, Value::Object(entries));
    }
    Ok(Value::Object(bucket))
}
