//! Builder API for ergonomic asset construction.
//!
//! # Example
//!
//! ```rust
//! use metacat::model::{AssetBuilder, AttrValue, Reference, Semantic};
//!
//! let table = AssetBuilder::new("Table")
//!     .qualified_name("default/snowflake/db/sales/orders")
//!     .attr("name", "orders")
//!     .attr("columnCount", 12i64)
//!     .clear("userDescription")
//!     .relations(
//!         "columns",
//!         [Reference::by_guid("Column", "c1").with_semantic(Semantic::Append)],
//!     )
//!     .build();
//! assert_eq!(table.attr("name"), Some(&AttrValue::Text("orders".into())));
//! ```

use uuid::Uuid;

use crate::model::{
    Asset, AssetStatus, AttrValue, CustomMetadataAttributes, Meaning, Reference, Tag,
};

/// Builder for constructing an [`Asset`] field by field.
#[derive(Debug, Clone)]
pub struct AssetBuilder {
    asset: Asset,
}

impl AssetBuilder {
    /// Creates a builder for the given asset type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            asset: Asset::new(type_name),
        }
    }

    /// Sets the entity GUID.
    pub fn guid(mut self, guid: impl Into<String>) -> Self {
        self.asset.guid = Some(guid.into());
        self
    }

    /// Assigns a fresh client-side GUID.
    ///
    /// Used when creating entities locally before the platform has issued a
    /// real id; the server replaces it on create.
    pub fn generated_guid(mut self) -> Self {
        self.asset.guid = Some(Uuid::new_v4().to_string());
        self
    }

    /// Sets the lifecycle status.
    pub fn status(mut self, status: AssetStatus) -> Self {
        self.asset.status = Some(status);
        self
    }

    /// Sets the `qualifiedName` attribute.
    pub fn qualified_name(mut self, qualified_name: impl Into<String>) -> Self {
        self.asset.set_attr("qualifiedName", qualified_name.into());
        self
    }

    /// Sets an arbitrary attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.asset.set_attr(name, value);
        self
    }

    /// Marks an attribute as explicitly cleared.
    pub fn clear(mut self, name: impl Into<String>) -> Self {
        self.asset.clear_attr(name);
        self
    }

    /// Sets a singular relationship attribute.
    pub fn relation(mut self, name: impl Into<String>, reference: Reference) -> Self {
        self.asset.set_attr(name, reference);
        self
    }

    /// Sets a relationship-collection attribute.
    pub fn relations(
        mut self,
        name: impl Into<String>,
        references: impl IntoIterator<Item = Reference>,
    ) -> Self {
        let items = references
            .into_iter()
            .map(|r| AttrValue::Relation(Box::new(r)))
            .collect();
        self.asset.set_attr(name, AttrValue::List(items));
        self
    }

    /// Attaches a tag.
    pub fn tag(mut self, tag: Tag) -> Self {
        self.asset.tags.push(tag);
        self
    }

    /// Adds a resolved tag name (the `classificationNames` counterpart).
    pub fn tag_name(mut self, name: impl Into<String>) -> Self {
        self.asset.tag_names.push(name.into());
        self
    }

    /// Assigns a glossary term.
    pub fn meaning(mut self, meaning: Meaning) -> Self {
        self.asset.meanings.push(meaning);
        self
    }

    /// Sets one custom metadata attribute under the given readable set name.
    pub fn custom_metadata(
        mut self,
        set_name: impl Into<String>,
        attr_name: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> Self {
        self.asset
            .custom_metadata
            .entry(set_name.into())
            .or_insert_with(CustomMetadataAttributes::new)
            .attributes
            .insert(attr_name.into(), value.into());
        self
    }

    /// Finishes the build.
    pub fn build(self) -> Asset {
        self.asset
    }
}
