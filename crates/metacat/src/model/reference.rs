//! Relationship references between entities.

use std::collections::BTreeMap;

use crate::model::AttrValue;

/// How a relationship value mutates the server-side relationship set.
///
/// The semantic never appears on the wire as a field; it selects which
/// envelope bucket the reference is serialized into (`attributes`,
/// `appendRelationshipAttributes`, `removeRelationshipAttributes`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Semantic {
    /// Replace the full relationship set (the `attributes` bucket).
    #[default]
    Replace,
    /// Add to the existing set (the `appendRelationshipAttributes` bucket).
    Append,
    /// Remove from the existing set (the `removeRelationshipAttributes` bucket).
    Remove,
}

/// A pointer to another entity, by GUID or by unique attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    /// Target entity type discriminator.
    pub type_name: String,
    /// Target GUID, when known.
    pub guid: Option<String>,
    /// Unique-attribute tuple identifying the target (e.g. qualifiedName).
    pub unique_attributes: Option<BTreeMap<String, AttrValue>>,
    /// Relationship type, when the platform sent one.
    pub relationship_type: Option<String>,
    /// Mutation semantic; in-memory only.
    pub semantic: Semantic,
}

impl Reference {
    /// Reference by GUID.
    pub fn by_guid(type_name: impl Into<String>, guid: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            guid: Some(guid.into()),
            unique_attributes: None,
            relationship_type: None,
            semantic: Semantic::Replace,
        }
    }

    /// Reference by qualifiedName.
    pub fn by_qualified_name(
        type_name: impl Into<String>,
        qualified_name: impl Into<String>,
    ) -> Self {
        let mut unique = BTreeMap::new();
        unique.insert(
            "qualifiedName".to_string(),
            AttrValue::Text(qualified_name.into()),
        );
        Self {
            type_name: type_name.into(),
            guid: None,
            unique_attributes: Some(unique),
            relationship_type: None,
            semantic: Semantic::Replace,
        }
    }

    /// Sets the mutation semantic, builder-style.
    pub fn with_semantic(mut self, semantic: Semantic) -> Self {
        self.semantic = semantic;
        self
    }
}

/// A deserialized relationship-attributes payload: the scoped counterpart of
/// a full entity envelope, carrying only attribute data for one relationship
/// end.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RelationshipAttributes {
    /// Type discriminator of the related entity.
    pub type_name: String,
    /// Decoded attributes, keyed by wire field name.
    pub attributes: BTreeMap<String, AttrValue>,
    /// Entries with no descriptor, retained verbatim.
    pub unmapped: BTreeMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_by_qualified_name() {
        let r = Reference::by_qualified_name("Table", "default/snowflake/db/sch/tbl");
        assert!(r.guid.is_none());
        let unique = r.unique_attributes.expect("unique attributes");
        assert_eq!(
            unique.get("qualifiedName"),
            Some(&AttrValue::Text("default/snowflake/db/sch/tbl".into()))
        );
        assert_eq!(r.semantic, Semantic::Replace);
    }

    #[test]
    fn test_with_semantic() {
        let r = Reference::by_guid("Column", "c1").with_semantic(Semantic::Remove);
        assert_eq!(r.semantic, Semantic::Remove);
    }
}
