//!  Audit log entries and their polymorphic detail payload.

use std::collections::BTreeMap;

use crate::model::{Asset, CustomMetadataAttributes, Tag};

/// One entry of an entity's audit history.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    /// GUID of the audited entity.
    pub entity_guid: Option<String>,
    /// Action string as recorded by the platform (e.g. `ENTITY_UPDATE`).
    pub action: Option<String>,
    /// User who performed the action.
    pub user: Option<String>,
    /// Timestamp of the action (epoch millis).
    pub timestamp: Option<i64>,
    /// What changed; absent when the platform recorded no detail.
    pub detail: Option<AuditDetail>,
}

/// The audit detail union.
///
/// The wire format carries no explicit tag for this union; the audit serde
/// resolves it structurally from which keys the payload object carries.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditDetail {
    /// A full entity snapshot.
    Entity(Box<Asset>),
    /// A tag attachment or detachment.
    Tag(Tag),
    /// Custom metadata values, keyed by readable set name (or the
    /// `"(DELETED)"` sentinel when the set no longer exists).
    CustomMetadata(BTreeMap<String, CustomMetadataAttributes>),
}
