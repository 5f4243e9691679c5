use resolver_guard_policy::{AccessRequest, Action, Decision, DenyReason};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IdentityKind {
    #[default]
    User,
    ApiKey,
    Other(String),
}

impl IdentityKind {
    pub fn as_str(&self) -> &str {
        match self {
            IdentityKind::User => "user",
            IdentityKind::ApiKey => "api-key",
            IdentityKind::Other(kind) => kind,
        }
    }
}

impl From<String> for IdentityKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "user" => IdentityKind::User,
            "api-key" => IdentityKind::ApiKey,
            _ => IdentityKind::Other(kind),
        }
    }
}

impl From<IdentityKind> for String {
    fn from(kind: IdentityKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Authenticated actor, read-only for the duration of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(rename = "type", default)]
    pub kind: IdentityKind,
}

impl Identity {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, kind: IdentityKind) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            kind,
        }
    }
}

/// Outcome of identity resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Authenticated(Identity),
    Anonymous,
}

impl Principal {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Principal::Authenticated(identity) => Some(identity),
            Principal::Anonymous => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Principal::Anonymous)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Principal::Authenticated(identity) => {
                write!(f, "{}:{}", identity.kind.as_str(), identity.id)
            }
            Principal::Anonymous => f.write_str("anonymous"),
        }
    }
}

/// One authorization decision, with the internal deny reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub timestamp: String,
    pub principal: String,
    pub resource: String,
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    pub decision: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<DenyReason>,
}

impl AuditEvent {
    pub fn new(principal: &Principal, request: &AccessRequest, decision: Decision) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            principal: principal.to_string(),
            resource: request.resource.clone(),
            action: request.action,
            locale: request.locale.clone(),
            decision: decision.status_str().to_string(),
            reason: decision.reason(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_kind_strings() {
        assert_eq!(IdentityKind::from("api-key".to_string()), IdentityKind::ApiKey);
        assert_eq!(
            IdentityKind::from("service".to_string()),
            IdentityKind::Other("service".to_string())
        );
        assert_eq!(String::from(IdentityKind::User), "user");
    }

    #[test]
    fn test_identity_deserializes_type_field() {
        let identity: Identity =
            serde_json::from_str(r#"{"id":"k1","display_name":"CI","type":"api-key"}"#).unwrap();
        assert_eq!(identity.kind, IdentityKind::ApiKey);
    }

    #[test]
    fn test_principal_display() {
        let principal = Principal::Authenticated(Identity::new("42", "Jane", IdentityKind::User));
        assert_eq!(principal.to_string(), "user:42");
        assert_eq!(Principal::Anonymous.to_string(), "anonymous");
        assert!(Principal::Anonymous.identity().is_none());
    }

    #[test]
    fn test_audit_event_records_reason() {
        let request = AccessRequest::new("cars", Action::Write).in_locale("en-US");
        let event = AuditEvent::new(
            &Principal::Anonymous,
            &request,
            Decision::Deny(DenyReason::NoGrantForResource),
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["decision"], "deny");
        assert_eq!(json["reason"], "no_grant_for_resource");
        assert_eq!(json["action"], "write");
        assert_eq!(json["locale"], "en-US");

        let back: AuditEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
