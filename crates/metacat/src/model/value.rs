//! In-memory attribute values.
//!
//! `AttrValue` is the typed representation of everything that can live under
//! an envelope's `attributes` / `relationshipAttributes` buckets after
//! deserialization: scalars, collections, embedded structs, and relationship
//! references.

use std::collections::BTreeMap;

use crate::model::Reference;

/// A typed attribute value on an asset, struct, or custom metadata bag.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// UTF-8 text.
    Text(String),
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer (also carries wire timestamps, counts, orders).
    Int(i64),
    /// 64-bit IEEE 754 float.
    Float(f64),
    /// Ordered list; duplicates are preserved.
    List(Vec<AttrValue>),
    /// Ordered unique set; duplicates are dropped on construction and decode.
    Set(Vec<AttrValue>),
    /// Free-form string-keyed map.
    Map(BTreeMap<String, AttrValue>),
    /// Embedded struct instance (no identity of its own).
    Struct(StructInstance),
    /// Pointer to another entity.
    Relation(Box<Reference>),
}

impl AttrValue {
    /// Short name of this value's kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            AttrValue::Text(_) => "text",
            AttrValue::Bool(_) => "bool",
            AttrValue::Int(_) => "int",
            AttrValue::Float(_) => "float",
            AttrValue::List(_) => "list",
            AttrValue::Set(_) => "set",
            AttrValue::Map(_) => "map",
            AttrValue::Struct(_) => "struct",
            AttrValue::Relation(_) => "relation",
        }
    }

    /// Returns true for an empty list, set, or map.
    ///
    /// Scalars, structs, and relations are never "empty"; the serializer
    /// uses this to omit untouched empty containers from the envelope.
    pub fn is_empty_collection(&self) -> bool {
        match self {
            AttrValue::List(items) | AttrValue::Set(items) => items.is_empty(),
            AttrValue::Map(entries) => entries.is_empty(),
            _ => false,
        }
    }

    /// Borrows the text payload, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an int value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the boolean payload, if this is a bool value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Borrows the element slice of a list or set value.
    pub fn as_items(&self) -> Option<&[AttrValue]> {
        match self {
            AttrValue::List(items) | AttrValue::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Builds a set value, dropping duplicates while keeping first-seen order.
    pub fn set_of(items: impl IntoIterator<Item = AttrValue>) -> AttrValue {
        let mut unique: Vec<AttrValue> = Vec::new();
        for item in items {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        AttrValue::Set(unique)
    }

    /// Builds a text set from string-likes, with the same dedup rule.
    pub fn text_set<S: Into<String>>(items: impl IntoIterator<Item = S>) -> AttrValue {
        AttrValue::set_of(items.into_iter().map(|s| AttrValue::Text(s.into())))
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<Reference> for AttrValue {
    fn from(r: Reference) -> Self {
        AttrValue::Relation(Box::new(r))
    }
}

/// An embedded struct value: a named bag of attributes with no entity
/// identity (histograms, source tag attachments, column profiles, ...).
///
/// Struct attributes are schemaless on purpose; unknown struct shapes from
/// newer platform versions must survive a round trip untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct StructInstance {
    /// The struct type discriminator, as sent by the platform.
    pub type_name: String,
    /// Attribute name to value.
    pub attributes: BTreeMap<String, AttrValue>,
}

impl StructInstance {
    /// Creates an empty struct instance of the given type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Sets one attribute, builder-style.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_of_deduplicates_preserving_order() {
        let set = AttrValue::set_of([
            AttrValue::Text("b".into()),
            AttrValue::Text("a".into()),
            AttrValue::Text("b".into()),
        ]);
        assert_eq!(
            set,
            AttrValue::Set(vec![AttrValue::Text("b".into()), AttrValue::Text("a".into())])
        );
    }

    #[test]
    fn test_empty_collection_detection() {
        assert!(AttrValue::List(vec![]).is_empty_collection());
        assert!(AttrValue::Set(vec![]).is_empty_collection());
        assert!(AttrValue::Map(BTreeMap::new()).is_empty_collection());
        assert!(!AttrValue::Text(String::new()).is_empty_collection());
        assert!(!AttrValue::List(vec![AttrValue::Bool(true)]).is_empty_collection());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(AttrValue::Int(1).kind_name(), "int");
        assert_eq!(AttrValue::Struct(StructInstance::new("Histogram")).kind_name(), "struct");
    }
}
