//! The wire codec: entity envelopes, tags, custom metadata, relationship
//! payloads, audit entries, and admin requests.
//!
//! Everything runs through a [`SerdeContext`], which pairs the type
//! registry driving shape decisions with the identifier translator turning
//! hashed IDs into readable names and back. No global state: callers build
//! one context and thread it through.

use serde_json::Value;

use crate::error::{DeserializeError, SerializeError};
use crate::model::{AdminRequest, Asset, AuditDetail, AuditEntry, RelationshipAttributes, Tag};
use crate::registry::TypeRegistry;
use crate::translate::{IdTranslator, OnMissing};

pub mod asset;
pub mod audit;
pub mod custom_metadata;
pub mod relationship;
pub mod request;
pub mod structs;
pub mod tag;
pub mod value;

/// The registry and translator a codec run operates against.
#[derive(Clone, Copy)]
pub struct SerdeContext<'a> {
    pub registry: &'a TypeRegistry,
    pub translator: &'a dyn IdTranslator,
}

impl<'a> SerdeContext<'a> {
    pub fn new(registry: &'a TypeRegistry, translator: &'a dyn IdTranslator) -> Self {
        Self { registry, translator }
    }

    /// Decodes one entity envelope.
    pub fn deserialize_asset(&self, node: &Value) -> Result<Asset, DeserializeError> {
        asset::deserialize_asset(self, node)
    }

    /// Decodes an envelope that may be null.
    pub fn deserialize_asset_opt(&self, node: &Value) -> Result<Option<Asset>, DeserializeError> {
        asset::deserialize_asset_opt(self, node)
    }

    /// Encodes an asset back into the envelope form.
    pub fn serialize_asset(&self, asset: &Asset) -> Result<Value, SerializeError> {
        asset::serialize_asset(self, asset)
    }

    /// Decodes a tag attachment, applying the given missing-ID policy.
    pub fn deserialize_tag(&self, node: &Value, on_missing: OnMissing) -> Result<Tag, DeserializeError> {
        tag::decode_tag(self, node, on_missing)
    }

    /// Encodes a tag attachment; unknown names are an error.
    pub fn serialize_tag(&self, tag: &Tag) -> Result<Value, SerializeError> {
        tag::encode_tag(self, tag)
    }

    /// Decodes a scoped relationship-attribute payload.
    pub fn deserialize_relationship_attributes(
        &self,
        node: &Value,
    ) -> Result<RelationshipAttributes, DeserializeError> {
        relationship::deserialize_relationship_attributes(self, node)
    }

    /// Decodes one audit log entry.
    pub fn deserialize_audit_entry(&self, node: &Value) -> Result<AuditEntry, DeserializeError> {
        audit::deserialize_audit_entry(self, node)
    }

    /// Decodes a bare audit detail payload.
    pub fn deserialize_audit_detail(
        &self,
        node: &Value,
    ) -> Result<Option<AuditDetail>, DeserializeError> {
        audit::deserialize_audit_detail(self, node)
    }

    /// Decodes one admin request record.
    pub fn deserialize_request(&self, node: &Value) -> Result<AdminRequest, DeserializeError> {
        request::deserialize_request(node)
    }
}

impl std::fmt::Debug for SerdeContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerdeContext")
            .field("registry_types", &self.registry.len())
            .finish_non_exhaustive()
    }
}
