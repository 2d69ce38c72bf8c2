//! Custom metadata bags.

use std::collections::BTreeMap;

use crate::model::AttrValue;

/// The attribute values of one custom metadata set on one entity.
///
/// In memory both the set and its attributes are keyed by human-readable
/// names; the wire `businessAttributes` form keys both levels by internal
/// hashed ids. The custom-metadata serde translates between the two.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomMetadataAttributes {
    /// Attribute name to value.
    pub attributes: BTreeMap<String, AttrValue>,
}

impl CustomMetadataAttributes {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one attribute, builder-style.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns true when no attribute carries data.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
