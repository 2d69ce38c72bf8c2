//! Admin-request union codec.
//!
//! Request records are discriminated by their `requestType` string, matched
//! against an ordered list of families. Specific prefixes win over the
//! broader ones they share, and anything unmatched lands in the purpose
//! family.

use serde_json::Value;

use crate::error::DeserializeError;
use crate::model::{
    AdminAbilityPayload, AdminRequest, PersonaAiPayload, PersonaDomainPayload,
    PersonaGlossaryPayload, PersonaMetadataPayload, PurposePayload, RequestFamily,
    RequestPayload, TypeDefChangePayload,
};
use crate::serde::value::json_kind;

/// Maps a `requestType` string to its family. Order matters: the specific
/// persona prefixes must be tried before the catch-all `persona-` prefix.
pub fn classify_request_type(request_type: &str) -> RequestFamily {
    if request_type.starts_with("persona-glossary") {
        RequestFamily::PersonaGlossary
    } else if request_type.starts_with("persona-domain") {
        RequestFamily::PersonaDomain
    } else if request_type.starts_with("persona-ai") {
        RequestFamily::PersonaAi
    } else if request_type.starts_with("persona-") {
        RequestFamily::PersonaMetadata
    } else if request_type.starts_with("admin-") {
        RequestFamily::AdminAbility
    } else if request_type.starts_with("type-")
        || request_type.ends_with("-label")
        || request_type.ends_with("-relationship")
    {
        RequestFamily::TypeDefChange
    } else {
        RequestFamily::Purpose
    }
}

fn parse_payload<T: serde::de::DeserializeOwned>(node: Value) -> Result<T, DeserializeError> {
    serde_json::from_value(node)
        .map_err(|e| DeserializeError::MalformedRequest { reason: e.to_string() })
}

pub fn deserialize_request(node: &Value) -> Result<AdminRequest, DeserializeError> {
    let obj = node.as_object().ok_or_else(|| DeserializeError::NotAnObject {
        context: "admin request",
        found: json_kind(node),
    })?;
    let request_type = obj
        .get("requestType")
        .and_then(|v| v.as_str())
        .ok_or(DeserializeError::MissingField {
            context: "admin request",
            field: "requestType",
        })?
        .to_string();

    // Payload fields may sit under an explicit `payload` object or inline in
    // the record itself.
    let payload_node = match obj.get("payload") {
        Some(Value::Object(inner)) => Value::Object(inner.clone()),
        _ => Value::Object(obj.clone()),
    };
    let payload = match classify_request_type(&request_type) {
        RequestFamily::PersonaGlossary => {
            RequestPayload::PersonaGlossary(parse_payload::<PersonaGlossaryPayload>(payload_node)?)
        }
        RequestFamily::PersonaDomain => {
            RequestPayload::PersonaDomain(parse_payload::<PersonaDomainPayload>(payload_node)?)
        }
        RequestFamily::PersonaAi => {
            RequestPayload::PersonaAi(parse_payload::<PersonaAiPayload>(payload_node)?)
        }
        RequestFamily::PersonaMetadata => {
            RequestPayload::PersonaMetadata(parse_payload::<PersonaMetadataPayload>(payload_node)?)
        }
        RequestFamily::AdminAbility => {
            RequestPayload::AdminAbility(parse_payload::<AdminAbilityPayload>(payload_node)?)
        }
        RequestFamily::TypeDefChange => {
            RequestPayload::TypeDefChange(parse_payload::<TypeDefChangePayload>(payload_node)?)
        }
        RequestFamily::Purpose => {
            RequestPayload::Purpose(parse_payload::<PurposePayload>(payload_node)?)
        }
    };

    Ok(AdminRequest {
        id: obj.get("id").and_then(|v| v.as_str()).map(str::to_string),
        request_type,
        status: obj.get("status").and_then(|v| v.as_str()).map(str::to_string),
        created_by: obj.get("createdBy").and_then(|v| v.as_str()).map(str::to_string),
        created_at: obj.get("createdAt").and_then(|v| v.as_i64()),
        destination_guid: obj
            .get("destinationGuid")
            .and_then(|v| v.as_str())
            .map(str::to_string),
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_specific_persona_prefixes_win_over_catch_all() {
        assert_eq!(
            classify_request_type("persona-glossary-add"),
            RequestFamily::PersonaGlossary
        );
        assert_eq!(
            classify_request_type("persona-domain-update"),
            RequestFamily::PersonaDomain
        );
        assert_eq!(classify_request_type("persona-ai-grant"), RequestFamily::PersonaAi);
        assert_eq!(
            classify_request_type("persona-metadata-policy"),
            RequestFamily::PersonaMetadata
        );
    }

    #[test]
    fn test_remaining_families() {
        assert_eq!(classify_request_type("admin-role-grant"), RequestFamily::AdminAbility);
        assert_eq!(classify_request_type("type-create"), RequestFamily::TypeDefChange);
        assert_eq!(classify_request_type("attach-label"), RequestFamily::TypeDefChange);
        assert_eq!(
            classify_request_type("add-relationship"),
            RequestFamily::TypeDefChange
        );
        assert_eq!(classify_request_type("anything-else"), RequestFamily::Purpose);
    }

    #[test]
    fn test_deserialize_with_explicit_payload_object() {
        let wire = json!({
            "id": "r1",
            "requestType": "persona-glossary-add",
            "status": "pending",
            "createdBy": "alice",
            "payload": {"glossaryQualifiedName": "default/glossary/1", "actions": ["read"]}
        });
        let request = deserialize_request(&wire).unwrap();
        assert_eq!(request.request_type, "persona-glossary-add");
        match request.payload {
            RequestPayload::PersonaGlossary(p) => {
                assert_eq!(p.glossary_qualified_name, "default/glossary/1");
                assert_eq!(p.actions, vec!["read".to_string()]);
            }
            other => panic!("wrong family: {other:?}"),
        }
    }

    #[test]
    fn test_deserialize_with_inline_payload_fields() {
        let wire = json!({
            "requestType": "admin-role-grant",
            "roles": ["admin"]
        });
        let request = deserialize_request(&wire).unwrap();
        assert!(matches!(request.payload, RequestPayload::AdminAbility(_)));
    }

    #[test]
    fn test_missing_request_type_rejected() {
        let err = deserialize_request(&json!({"id": "r1"})).unwrap_err();
        assert!(matches!(
            err,
            DeserializeError::MissingField { field: "requestType", .. }
        ));
    }

    #[test]
    fn test_family_accessor_matches_classifier() {
        let wire = json!({"requestType": "add-relationship", "typeName": "CustomRel"});
        let request = deserialize_request(&wire).unwrap();
        assert_eq!(request.payload.family(), RequestFamily::TypeDefChange);
    }
}
