//! Admin request payloads.
//!
//! Requests are plain DTOs; the only interesting behavior is the
//! `requestType`-driven payload dispatch, which lives in
//! [`serde::request`](crate::serde::request).

use serde::{Deserialize, Serialize};

/// The payload family a `requestType` string resolves to.
///
/// Families overlap textually (`persona-*` vs `persona-glossary`,
/// `type-*` vs `*-relationship`), so classification is an ordered priority
/// list, not a plain match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestFamily {
    PersonaGlossary,
    PersonaDomain,
    PersonaAi,
    PersonaMetadata,
    AdminAbility,
    TypeDefChange,
    Purpose,
}

/// One admin request, with its family-specific payload resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminRequest {
    /// Request id.
    pub id: Option<String>,
    /// The raw `requestType` discriminator.
    pub request_type: String,
    /// Approval status string.
    pub status: Option<String>,
    /// Requesting user.
    pub created_by: Option<String>,
    /// Creation timestamp (epoch millis).
    pub created_at: Option<i64>,
    /// GUID of the asset the request targets, when any.
    pub destination_guid: Option<String>,
    /// The family-specific payload.
    pub payload: RequestPayload,
}

/// The per-family request payload union.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestPayload {
    PersonaGlossary(PersonaGlossaryPayload),
    PersonaDomain(PersonaDomainPayload),
    PersonaAi(PersonaAiPayload),
    PersonaMetadata(PersonaMetadataPayload),
    AdminAbility(AdminAbilityPayload),
    TypeDefChange(TypeDefChangePayload),
    Purpose(PurposePayload),
}

impl RequestPayload {
    /// The family this payload belongs to.
    pub fn family(&self) -> RequestFamily {
        match self {
            RequestPayload::PersonaGlossary(_) => RequestFamily::PersonaGlossary,
            RequestPayload::PersonaDomain(_) => RequestFamily::PersonaDomain,
            RequestPayload::PersonaAi(_) => RequestFamily::PersonaAi,
            RequestPayload::PersonaMetadata(_) => RequestFamily::PersonaMetadata,
            RequestPayload::AdminAbility(_) => RequestFamily::AdminAbility,
            RequestPayload::TypeDefChange(_) => RequestFamily::TypeDefChange,
            RequestPayload::Purpose(_) => RequestFamily::Purpose,
        }
    }
}

/// Grant of glossary actions to a persona.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaGlossaryPayload {
    pub glossary_qualified_name: String,
    #[serde(default)]
    pub actions: Vec<String>,
}

/// Grant of domain actions to a persona.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaDomainPayload {
    pub domain_qualified_name: String,
    #[serde(default)]
    pub actions: Vec<String>,
}

/// Grant of AI-asset actions to a persona.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaAiPayload {
    pub asset_qualified_name: String,
    #[serde(default)]
    pub actions: Vec<String>,
}

/// Grant of metadata actions on a connection to a persona.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaMetadataPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    #[serde(default)]
    pub actions: Vec<String>,
}

/// Grant of workspace admin roles.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAbilityPayload {
    #[serde(default)]
    pub roles: Vec<String>,
}

/// A requested change to a type definition, label, or relationship def.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefChangePayload {
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Grant of actions scoped by tags (a purpose policy).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurposePayload {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub actions: Vec<String>,
}
