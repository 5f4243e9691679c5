use crate::cli::CheckArgs;
use anyhow::{Context, Result};
use resolver_guard_core::{AuthorizationGuard, GuardError};
use resolver_guard_infra::{AuditLogger, PolicyFile, StaticPermissionStore};
use resolver_guard_policy::AccessRequest;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Allowed,
    Denied,
}

/// Authorize one request against a policy file.
///
/// A denial is an `Ok(Outcome::Denied)`; malformed input and unreadable
/// files are errors.
pub async fn run_check(args: &CheckArgs) -> Result<Outcome> {
    let mut request = AccessRequest::parse(args.resource.as_str(), &args.action)
        .context("Invalid access request")?;
    if let Some(locale) = &args.locale {
        request = request.in_locale(locale.as_str());
    }

    let store = Arc::new(
        StaticPermissionStore::load(&args.policy)
            .with_context(|| format!("Failed to load policy {}", args.policy.display()))?,
    );
    let mut guard = AuthorizationGuard::new(store.clone(), store);
    if let Some(audit_path) = &args.audit {
        let logger = AuditLogger::new(audit_path)
            .with_context(|| format!("Failed to open audit log {}", audit_path.display()))?;
        guard = guard.with_audit(Arc::new(logger));
    }

    match guard.authorize_token(args.token.as_deref(), &request).await {
        Ok(principal) => {
            info!("Request allowed for {}", principal);
            Ok(Outcome::Allowed)
        }
        Err(GuardError::NotAuthorized) => Ok(Outcome::Denied),
        Err(e) => Err(e.into()),
    }
}

/// Validate a policy file, returning the number of identities it defines.
pub fn run_validate(policy: &Path) -> Result<usize> {
    let policy = PolicyFile::load(policy)
        .with_context(|| format!("Failed to load policy {}", policy.display()))?;
    Ok(policy.identities.len())
}
