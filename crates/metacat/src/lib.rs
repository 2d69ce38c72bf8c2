//! metacat: typed client model and wire codec for a metadata catalog.
//!
//! This crate turns the catalog's entity envelope JSON into typed assets and
//! back, handling everything the envelope format makes awkward:
//!
//! - **Polymorphic entities**: payloads are discriminated by `typeName`,
//!   resolved against a flattened type registry; unknown types fall back to
//!   a generic descriptor instead of failing
//! - **Split attribute buckets**: `relationshipAttributes` merge over
//!   `attributes` with per-field conflict precedence
//! - **Hashed identifiers**: tag and custom metadata IDs translate to
//!   readable names on decode and back to IDs on encode
//! - **Tri-state fields**: absent, explicitly cleared, and present values
//!   serialize differently, so an untouched field never clears server state
//!
//! # Quick Start
//!
//! ```rust
//! use metacat::model::{AssetBuilder, Reference, Semantic};
//! use metacat::registry::TypeRegistry;
//! use metacat::serde::SerdeContext;
//! use metacat::translate::StaticTranslator;
//!
//! let translator = StaticTranslator::new().with_tag("abc123hash", "PII");
//! let ctx = SerdeContext::new(TypeRegistry::builtin(), &translator);
//!
//! let table = AssetBuilder::new("Table")
//!     .qualified_name("default/snowflake/db/sales/orders")
//!     .attr("name", "orders")
//!     .clear("description")
//!     .relation(
//!         "columns",
//!         Reference::by_guid("Column", "c1").with_semantic(Semantic::Append),
//!     )
//!     .tag_name("PII")
//!     .build();
//!
//! let envelope = ctx.serialize_asset(&table).unwrap();
//! assert_eq!(envelope["attributes"]["description"], serde_json::json!(null));
//! assert_eq!(envelope["classificationNames"][0], serde_json::json!("abc123hash"));
//!
//! let decoded = ctx.deserialize_asset(&envelope).unwrap();
//! assert_eq!(decoded.attr("name"), table.attr("name"));
//! ```
//!
//! # Modules
//!
//! - [`model`]: Core data types (Asset, AttrValue, Tag, Reference, requests)
//! - [`registry`]: Flattened type descriptor tables and lookup
//! - [`typedefs`]: The builtin type definition table
//! - [`serde`]: The envelope codec, driven by a [`serde::SerdeContext`]
//! - [`translate`]: Hashed-ID to readable-name translation
//! - [`error`]: Error types
//!
//! # Determinism
//!
//! Serialization is deterministic: object keys are emitted in sorted order,
//! so serializing the same asset twice yields byte-identical JSON.

pub mod error;
pub mod model;
pub mod registry;
pub mod serde;
pub mod translate;
pub mod typedefs;
pub mod util;

// Re-export commonly used types at crate root
pub use error::{DeserializeError, RegistryError, SerializeError, TranslationError};
pub use model::{
    AdminRequest, Asset, AssetBuilder, AssetStatus, AttrValue, AuditDetail, AuditEntry,
    CustomMetadataAttributes, FieldState, Meaning, Reference, RelationshipAttributes,
    RequestFamily, RequestPayload, Semantic, StructInstance, Tag,
};
pub use registry::{TypeDescriptor, TypeRegistry};
pub use serde::SerdeContext;
pub use translate::{IdTranslator, OnMissing, StaticTranslator, DELETED_SENTINEL};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
