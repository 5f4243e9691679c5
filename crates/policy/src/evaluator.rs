use crate::action::Action;
use crate::error::PolicyError;
use crate::permission::PermissionSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a caller wants to do, built right before a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequest {
    pub resource: String,
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl AccessRequest {
    pub fn new(resource: impl Into<String>, action: Action) -> Self {
        Self {
            resource: resource.into(),
            action,
            locale: None,
        }
    }

    /// Build a request from a textual action, failing on unknown values.
    pub fn parse(resource: impl Into<String>, action: &str) -> Result<Self, PolicyError> {
        let request = Self::new(resource, action.parse()?);
        request.validate()?;
        Ok(request)
    }

    pub fn in_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.resource.trim().is_empty() {
            return Err(PolicyError::EmptyResource);
        }
        Ok(())
    }
}

/// Why a request was denied. Internal only: never shown to end users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    NoGrantForResource,
    ActionNotGranted,
    LocaleNotGranted,
}

impl DenyReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DenyReason::NoGrantForResource => "no grant for resource",
            DenyReason::ActionNotGranted => "action not granted",
            DenyReason::LocaleNotGranted => "locale not granted",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "reason", rename_all = "lowercase")]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Decision::Deny(_))
    }

    pub fn reason(&self) -> Option<DenyReason> {
        match self {
            Decision::Allow => None,
            Decision::Deny(reason) => Some(*reason),
        }
    }

    pub fn status_str(&self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::Deny(_) => "deny",
        }
    }
}

/// Decide whether `request` is authorized by `permissions`.
///
/// The wildcard grant short-circuits every other check. Otherwise the
/// resource entry must exist and include the requested action.
///
/// # Errors
/// Returns [`PolicyError::EmptyResource`] for a request without a resource
/// name. Denials are returned as [`Decision::Deny`], never as errors.
pub fn evaluate(permissions: &PermissionSet, request: &AccessRequest) -> Result<Decision, PolicyError> {
    request.validate()?;

    if permissions.has_full_access() {
        return Ok(Decision::Allow);
    }

    let Some(grant) = permissions.get(&request.resource) else {
        return Ok(Decision::Deny(DenyReason::NoGrantForResource));
    };

    if !grant.allows(request.action) {
        return Ok(Decision::Deny(DenyReason::ActionNotGranted));
    }

    Ok(Decision::Allow)
}

/// Stateless handle around [`evaluate`] for holders that want a value.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionEvaluator;

impl PermissionEvaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(
        &self,
        permissions: &PermissionSet,
        request: &AccessRequest,
    ) -> Result<Decision, PolicyError> {
        evaluate(permissions, request)
    }
}
