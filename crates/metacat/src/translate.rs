//! The identifier translation seam.
//!
//! Tags and custom metadata travel with internal hashed-string ids on the
//! wire and human-readable names in memory. Translation goes through the
//! [`IdTranslator`] trait — in production an API-backed cache that may block
//! on refresh, in tests and offline tools the in-memory
//! [`StaticTranslator`]. A clean miss is `Ok(None)`; only backend failures
//! are errors.

use rustc_hash::FxHashMap;

use crate::error::TranslationError;

/// Name substituted for identifiers that no longer resolve, in the payload
/// contexts where referencing a since-deleted definition is expected
/// (audit/history reads).
pub const DELETED_SENTINEL: &str = "(DELETED)";

/// What to do when an id no longer resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnMissing {
    /// Surface the miss as an error; live mutation paths must not silently
    /// corrupt intent.
    Fail,
    /// Substitute [`DELETED_SENTINEL`]; historical records stay readable.
    Deleted,
}

/// Name ↔ internal-id resolution for tags and custom metadata definitions.
///
/// Implementations may block internally (remote cache refresh on miss); they
/// must be safe to share across concurrent serde calls.
pub trait IdTranslator: Send + Sync {
    /// Resolves an internal tag id to its readable name.
    fn tag_name(&self, id: &str) -> Result<Option<String>, TranslationError>;

    /// Resolves a readable tag name to its internal id.
    fn tag_id(&self, name: &str) -> Result<Option<String>, TranslationError>;

    /// Resolves a custom metadata set id to its readable name.
    fn custom_metadata_set_name(&self, id: &str) -> Result<Option<String>, TranslationError>;

    /// Resolves a readable custom metadata set name to its id.
    fn custom_metadata_set_id(&self, name: &str) -> Result<Option<String>, TranslationError>;

    /// Resolves an attribute id within a set to its readable name.
    fn custom_metadata_attr_name(
        &self,
        set_id: &str,
        attr_id: &str,
    ) -> Result<Option<String>, TranslationError>;

    /// Resolves a readable attribute name within a set to its id.
    fn custom_metadata_attr_id(
        &self,
        set_id: &str,
        attr_name: &str,
    ) -> Result<Option<String>, TranslationError>;
}

/// In-memory [`IdTranslator`] backed by plain maps.
///
/// The workhorse for unit tests against literal JSON fixtures, and usable as
/// a snapshot translator when the id vocabulary is known up front.
#[derive(Debug, Default)]
pub struct StaticTranslator {
    tag_name_by_id: FxHashMap<String, String>,
    tag_id_by_name: FxHashMap<String, String>,
    set_name_by_id: FxHashMap<String, String>,
    set_id_by_name: FxHashMap<String, String>,
    /// set id -> attr id -> attr name
    attr_name_by_id: FxHashMap<String, FxHashMap<String, String>>,
    /// set id -> attr name -> attr id
    attr_id_by_name: FxHashMap<String, FxHashMap<String, String>>,
}

impl StaticTranslator {
    /// Creates an empty translator (every lookup is a miss).
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tag id/name pair.
    pub fn with_tag(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        let (id, name) = (id.into(), name.into());
        self.tag_id_by_name.insert(name.clone(), id.clone());
        self.tag_name_by_id.insert(id, name);
        self
    }

    /// Registers a custom metadata set id/name pair.
    pub fn with_custom_metadata_set(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let (id, name) = (id.into(), name.into());
        self.set_id_by_name.insert(name.clone(), id.clone());
        self.set_name_by_id.insert(id, name);
        self
    }

    /// Registers an attribute id/name pair under a set id.
    pub fn with_custom_metadata_attr(
        mut self,
        set_id: impl Into<String>,
        attr_id: impl Into<String>,
        attr_name: impl Into<String>,
    ) -> Self {
        let set_id = set_id.into();
        let (attr_id, attr_name) = (attr_id.into(), attr_name.into());
        self.attr_id_by_name
            .entry(set_id.clone())
            .or_default()
            .insert(attr_name.clone(), attr_id.clone());
        self.attr_name_by_id
            .entry(set_id)
            .or_default()
            .insert(attr_id, attr_name);
        self
    }
}

impl IdTranslator for StaticTranslator {
    fn tag_name(&self, id: &str) -> Result<Option<String>, TranslationError> {
        Ok(self.tag_name_by_id.get(id).cloned())
    }

    fn tag_id(&self, name: &str) -> Result<Option<String>, TranslationError> {
        Ok(self.tag_id_by_name.get(name).cloned())
    }

    fn custom_metadata_set_name(&self, id: &str) -> Result<Option<String>, TranslationError> {
        Ok(self.set_name_by_id.get(id).cloned())
    }

    fn custom_metadata_set_id(&self, name: &str) -> Result<Option<String>, TranslationError> {
        Ok(self.set_id_by_name.get(name).cloned())
    }

    fn custom_metadata_attr_name(
        &self,
        set_id: &str,
        attr_id: &str,
    ) -> Result<Option<String>, TranslationError> {
        Ok(self
            .attr_name_by_id
            .get(set_id)
            .and_then(|attrs| attrs.get(attr_id))
            .cloned())
    }

    fn custom_metadata_attr_id(
        &self,
        set_id: &str,
        attr_name: &str,
    ) -> Result<Option<String>, TranslationError> {
        Ok(self
            .attr_id_by_name
            .get(set_id)
            .and_then(|attrs| attrs.get(attr_name))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_translator_round_trips() {
        let t = StaticTranslator::new()
            .with_tag("h1x", "PII")
            .with_custom_metadata_set("cm1", "Quality")
            .with_custom_metadata_attr("cm1", "a1", "score");

        assert_eq!(t.tag_name("h1x").unwrap().as_deref(), Some("PII"));
        assert_eq!(t.tag_id("PII").unwrap().as_deref(), Some("h1x"));
        assert_eq!(
            t.custom_metadata_set_name("cm1").unwrap().as_deref(),
            Some("Quality")
        );
        assert_eq!(
            t.custom_metadata_attr_id("cm1", "score").unwrap().as_deref(),
            Some("a1")
        );
    }

    #[test]
    fn test_miss_is_none_not_error() {
        let t = StaticTranslator::new();
        assert_eq!(t.tag_name("gone").unwrap(), None);
        assert_eq!(t.custom_metadata_attr_name("s", "a").unwrap(), None);
    }
}
