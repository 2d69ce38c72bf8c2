//! Tag (classification) attachments.

use crate::model::AssetStatus;

/// A tag attached to an entity.
///
/// In memory `type_name` is always the human-readable tag name; the wire
/// form carries the platform's internal hashed id instead, translated in
/// both directions by the tag serde. A tag whose id no longer resolves in a
/// historical payload is surfaced with the `"(DELETED)"` sentinel name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tag {
    /// Human-readable tag name.
    pub type_name: String,
    /// GUID of the entity the tag is attached to.
    pub entity_guid: Option<String>,
    /// Status of that entity, when sent.
    pub entity_status: Option<AssetStatus>,
    /// Whether the tag propagates through lineage/hierarchy.
    pub propagate: Option<bool>,
    /// Whether propagated tags are removed when the entity is deleted.
    pub remove_propagations_on_entity_delete: Option<bool>,
    /// Blocks propagation through lineage edges.
    pub restrict_propagation_through_lineage: Option<bool>,
    /// Blocks propagation through parent/child hierarchy.
    pub restrict_propagation_through_hierarchy: Option<bool>,
}

impl Tag {
    /// Creates a tag with the given human-readable name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            type_name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the attached-entity GUID, builder-style.
    pub fn on_entity(mut self, guid: impl Into<String>) -> Self {
        self.entity_guid = Some(guid.into());
        self
    }

    /// Sets the propagation flag, builder-style.
    pub fn propagate(mut self, propagate: bool) -> Self {
        self.propagate = Some(propagate);
        self
    }
}
