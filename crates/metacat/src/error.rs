//! Error types for envelope serde, identifier translation, and registry build.

use thiserror::Error;

/// Error while turning a wire envelope into typed model objects.
///
/// Structural variants indicate a wire/model mismatch that cannot be safely
/// guessed past; translation variants carry the failed lookup. Unknown
/// discriminators and unknown attribute names are deliberately *not* errors
/// (fallback type / opaque leftover capture).
#[derive(Debug, Error)]
pub enum DeserializeError {
    #[error("expected a JSON object for {context}, found {found}")]
    NotAnObject {
        context: &'static str,
        found: &'static str,
    },

    #[error("{context} is missing required key '{field}'")]
    MissingField {
        context: &'static str,
        field: &'static str,
    },

    #[error("attribute '{field}' expected {expected}, found {found}")]
    ShapeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("deserialization of nested arrays is not supported (attribute '{field}')")]
    NestedArray { field: String },

    #[error("unknown value '{value}' for enum attribute '{field}'")]
    UnknownEnumVariant { field: String, value: String },

    #[error("unknown entity status '{value}'")]
    InvalidStatus { value: String },

    #[error("tag id '{id}' does not resolve to a known tag")]
    UnknownTagId { id: String },

    #[error("custom metadata set id '{id}' does not resolve to a known set")]
    UnknownCustomMetadataSet { id: String },

    #[error("custom metadata attribute id '{attr_id}' does not resolve within set '{set_id}'")]
    UnknownCustomMetadataAttr { set_id: String, attr_id: String },

    #[error(
        "entity '{guid}' carries custom metadata both as flattened attributes and as businessAttributes"
    )]
    ConflictingCustomMetadata { guid: String },

    #[error("failed to translate {what} '{key}'")]
    Translation {
        what: &'static str,
        key: String,
        #[source]
        source: TranslationError,
    },

    #[error("attribute '{field}' carries malformed encoded text: {reason}")]
    InvalidEncodedText { field: String, reason: String },

    #[error("{context} payload is malformed: {reason}")]
    MalformedValue { context: &'static str, reason: String },

    #[error("audit detail payload is malformed: {reason}")]
    MalformedAuditDetail { reason: &'static str },

    #[error("admin request payload is malformed: {reason}")]
    MalformedRequest { reason: String },
}

/// Error while turning typed model objects back into a wire envelope.
///
/// Serialization is all-or-nothing: the envelope is assembled in memory and
/// only returned once every field encoded cleanly.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("tag name '{name}' does not resolve to an internal id")]
    UnknownTagName { name: String },

    #[error("custom metadata set '{name}' does not resolve to an internal id")]
    UnknownCustomMetadataSetName { name: String },

    #[error("custom metadata attribute '{attr_name}' does not resolve within set '{set_name}'")]
    UnknownCustomMetadataAttrName { set_name: String, attr_name: String },

    #[error("failed to translate {what} '{key}'")]
    Translation {
        what: &'static str,
        key: String,
        #[source]
        source: TranslationError,
    },

    #[error("failed to encode {context}: {reason}")]
    Encode { context: &'static str, reason: String },
}

/// Failure inside the identifier translation cache itself.
///
/// Distinct from a clean "not found": a miss is `Ok(None)` on the
/// [`IdTranslator`](crate::translate::IdTranslator) trait, while this type
/// means the lookup could not be answered at all (e.g. a failed remote
/// refresh).
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("translation backend failure: {0}")]
    Backend(String),
}

/// Error while building a [`TypeRegistry`](crate::registry::TypeRegistry)
/// from declarative type definitions.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("type '{type_name}' is defined more than once")]
    DuplicateTypeName { type_name: &'static str },

    #[error("type '{type_name}' names unknown supertype '{super_type}'")]
    UnknownSuperType {
        type_name: &'static str,
        super_type: &'static str,
    },

    #[error("supertype chain of '{type_name}' contains a cycle")]
    SuperTypeCycle { type_name: &'static str },

    #[error("fallback type '{type_name}' is not registered")]
    UnknownFallback { type_name: &'static str },
}
