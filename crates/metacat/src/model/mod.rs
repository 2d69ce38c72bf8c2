//! Core data model: assets, values, references, tags, custom metadata,
//! audit entries, and admin requests.

pub mod asset;
pub mod audit;
pub mod builder;
pub mod custom_metadata;
pub mod reference;
pub mod request;
pub mod tag;
pub mod value;

pub use asset::{Asset, AssetStatus, FieldState, Meaning};
pub use audit::{AuditDetail, AuditEntry};
pub use builder::AssetBuilder;
pub use custom_metadata::CustomMetadataAttributes;
pub use reference::{Reference, RelationshipAttributes, Semantic};
pub use request::{
    AdminAbilityPayload, AdminRequest, PersonaAiPayload, PersonaDomainPayload,
    PersonaGlossaryPayload, PersonaMetadataPayload, PurposePayload, RequestFamily, RequestPayload,
    TypeDefChangePayload,
};
pub use tag::Tag;
pub use value::{AttrValue, StructInstance};
