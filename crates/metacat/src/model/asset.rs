//! The asset object: common entity fields plus tri-state attribute storage.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::model::{AttrValue, CustomMetadataAttributes, Tag};

/// Entity lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetStatus {
    Active,
    Deleted,
    Purged,
}

impl AssetStatus {
    /// Parses the wire status string.
    pub fn from_wire(s: &str) -> Option<AssetStatus> {
        match s {
            "ACTIVE" => Some(AssetStatus::Active),
            "DELETED" => Some(AssetStatus::Deleted),
            "PURGED" => Some(AssetStatus::Purged),
            _ => None,
        }
    }

    /// Returns the wire status string.
    pub fn as_wire(self) -> &'static str {
        match self {
            AssetStatus::Active => "ACTIVE",
            AssetStatus::Deleted => "DELETED",
            AssetStatus::Purged => "PURGED",
        }
    }
}

/// An assigned glossary term header, as carried in the envelope's
/// `meanings` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    /// GUID of the assigned term.
    pub term_guid: String,
    /// GUID of the assignment relationship, when sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation_guid: Option<String>,
    /// Display text of the term, when sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
}

impl Meaning {
    /// Creates a meaning pointing at the given term.
    pub fn new(term_guid: impl Into<String>) -> Self {
        Self {
            term_guid: term_guid.into(),
            relation_guid: None,
            display_text: None,
        }
    }
}

/// Per-field tri-state: a field is absent (not tracked at all), explicitly
/// cleared, or present with a value.
///
/// `Cleared` is what the wire's explicit `null` / `[]` becomes in memory,
/// and what serializes back to it. Absence serializes to omission, so an
/// untouched field can never cause an accidental server-side clear.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldState {
    /// Explicitly cleared; serializes as `null` (scalar) or `[]` (collection).
    Cleared,
    /// Present with a value.
    Present(AttrValue),
}

/// One entity instance: the typed counterpart of a wire envelope.
///
/// Attribute and relationship values live in a uniform per-field map keyed
/// by wire field name; the type's descriptor table (see
/// [`TypeRegistry`](crate::registry::TypeRegistry)) says how each entry is
/// shaped and which envelope bucket it belongs to. The `raw` envelope is
/// debugging metadata and does not participate in equality.
#[derive(Debug, Clone, Default)]
pub struct Asset {
    /// Type discriminator.
    pub type_name: String,
    /// Entity GUID.
    pub guid: Option<String>,
    /// Lifecycle status.
    pub status: Option<AssetStatus>,
    /// Audit: creating user.
    pub created_by: Option<String>,
    /// Audit: last updating user.
    pub updated_by: Option<String>,
    /// Audit: creation timestamp (epoch millis).
    pub create_time: Option<i64>,
    /// Audit: last update timestamp (epoch millis).
    pub update_time: Option<i64>,
    /// Attached tags, with human-readable names.
    pub tags: Vec<Tag>,
    /// Resolved names from the envelope's `classificationNames` id array.
    pub tag_names: Vec<String>,
    /// Assigned glossary terms.
    pub meanings: Vec<Meaning>,
    /// Names of tasks still pending against this entity.
    pub pending_tasks: Vec<String>,
    /// Custom metadata, keyed by readable set name.
    pub custom_metadata: BTreeMap<String, CustomMetadataAttributes>,
    /// Present when this envelope is itself a relationship reference.
    pub relationship_guid: Option<String>,
    /// Relationship type of a reference-shaped envelope.
    pub relationship_type: Option<String>,
    /// Relationship status of a reference-shaped envelope.
    pub relationship_status: Option<AssetStatus>,
    /// Unique-attribute tuple of a reference-shaped envelope.
    pub unique_attributes: Option<BTreeMap<String, AttrValue>>,
    /// Attributes with no descriptor, retained verbatim for round-tripping.
    pub unmapped: BTreeMap<String, serde_json::Value>,
    /// The original envelope this asset was deserialized from, if any.
    pub raw: Option<serde_json::Value>,
    fields: FxHashMap<String, FieldState>,
}

impl Asset {
    /// Creates an empty asset of the given type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    /// Returns the value of an attribute, if present (not absent or cleared).
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        match self.fields.get(name) {
            Some(FieldState::Present(v)) => Some(v),
            _ => None,
        }
    }

    /// Full tri-state view of a field.
    pub fn field_state(&self, name: &str) -> Option<&FieldState> {
        self.fields.get(name)
    }

    /// Returns true when the field was explicitly cleared.
    pub fn is_cleared(&self, name: &str) -> bool {
        matches!(self.fields.get(name), Some(FieldState::Cleared))
    }

    /// Sets an attribute value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        self.fields
            .insert(name.into(), FieldState::Present(value.into()));
    }

    /// Marks an attribute as explicitly cleared.
    pub fn clear_attr(&mut self, name: impl Into<String>) {
        self.fields.insert(name.into(), FieldState::Cleared);
    }

    /// Forgets an attribute entirely (back to the absent state).
    pub fn unset_attr(&mut self, name: &str) {
        self.fields.remove(name);
    }

    /// Iterates over all tracked fields and their states.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldState)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of tracked fields (cleared or present).
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

impl PartialEq for Asset {
    fn eq(&self, other: &Self) -> bool {
        // `raw` is deliberately excluded: a hand-built asset and its
        // round-tripped twin must compare equal.
        self.type_name == other.type_name
            && self.guid == other.guid
            && self.status == other.status
            && self.created_by == other.created_by
            && self.updated_by == other.updated_by
            && self.create_time == other.create_time
            && self.update_time == other.update_time
            && self.tags == other.tags
            && self.tag_names == other.tag_names
            && self.meanings == other.meanings
            && self.pending_tasks == other.pending_tasks
            && self.custom_metadata == other.custom_metadata
            && self.relationship_guid == other.relationship_guid
            && self.relationship_type == other.relationship_type
            && self.relationship_status == other.relationship_status
            && self.unique_attributes == other.unique_attributes
            && self.unmapped == other.unmapped
            && self.fields == other.fields
    }
}
