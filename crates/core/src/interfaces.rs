//! Collaborators the guard depends on.

use crate::types::{AuditEvent, Identity, Principal};
use async_trait::async_trait;
use resolver_guard_policy::{PermissionSet, PolicyError};
use thiserror::Error;

/// Guard errors.
///
/// `NotAuthorized` renders the same text for every denial cause; the cause
/// itself only reaches logs and the audit sink.
#[derive(Error, Debug)]
pub enum GuardError {
    #[error("Not authorized")]
    NotAuthorized,

    #[error("Malformed access request: {0}")]
    Malformed(#[from] PolicyError),

    #[error("Identity resolution failed: {0}")]
    Identity(String),

    #[error("Permission lookup failed: {0}")]
    Store(String),
}

impl GuardError {
    pub fn is_not_authorized(&self) -> bool {
        matches!(self, GuardError::NotAuthorized)
    }
}

/// Resolves the caller of a request from its credential.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Return `Principal::Anonymous` when no usable credential is present.
    async fn resolve(&self, token: Option<&str>) -> Result<Principal, GuardError>;
}

/// Supplies the permissions an identity holds.
#[async_trait]
pub trait PermissionStore: Send + Sync {
    /// Build a fresh permission set for one request.
    async fn permissions_for(&self, identity: &Identity) -> Result<PermissionSet, GuardError>;
}

/// Receives every decision the guard makes.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, event: &AuditEvent);
}
