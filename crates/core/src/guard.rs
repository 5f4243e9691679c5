//! Authorization stage run before a resolver's business logic.

use crate::interfaces::{AuditSink, GuardError, IdentityResolver, PermissionStore};
use crate::metrics::GuardMetrics;
use crate::types::{AuditEvent, Principal};
use resolver_guard_policy::{
    check_locale_access, AccessRequest, Decision, PermissionEvaluator, PermissionSet,
};
use std::sync::Arc;
use tracing::{debug, error, warn};

pub struct AuthorizationGuard {
    resolver: Arc<dyn IdentityResolver>,
    store: Arc<dyn PermissionStore>,
    audit: Option<Arc<dyn AuditSink>>,
    metrics: Arc<GuardMetrics>,
    evaluator: PermissionEvaluator,
}

impl AuthorizationGuard {
    pub fn new(resolver: Arc<dyn IdentityResolver>, store: Arc<dyn PermissionStore>) -> Self {
        Self {
            resolver,
            store,
            audit: None,
            metrics: GuardMetrics::new(),
            evaluator: PermissionEvaluator::new(),
        }
    }

    pub fn with_audit(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(sink);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<GuardMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Arc<GuardMetrics> {
        &self.metrics
    }

    /// Resolve the caller behind `token`.
    pub async fn resolve(&self, token: Option<&str>) -> Result<Principal, GuardError> {
        self.resolver.resolve(token).await.map_err(|e| {
            self.metrics.inc_upstream_failures();
            error!("Identity resolution failed: {}", e);
            e
        })
    }

    /// Evaluate `request` for `principal` and return the raw decision.
    ///
    /// Runs the locale check first when the request carries a locale. Every
    /// decision is logged, counted and sent to the audit sink.
    ///
    /// # Errors
    /// `Malformed` for invalid requests, `Store` when permissions cannot be
    /// loaded. A denial is `Ok(Decision::Deny(_))`.
    pub async fn decide(
        &self,
        principal: &Principal,
        request: &AccessRequest,
    ) -> Result<Decision, GuardError> {
        if let Err(e) = request.validate() {
            self.metrics.inc_malformed();
            warn!("Malformed access request from {}: {}", principal, e);
            return Err(e.into());
        }

        let permissions = self.load_permissions(principal).await?;

        let decision = match request.locale.as_deref() {
            Some(locale) => match check_locale_access(&permissions, locale) {
                Decision::Allow => self.evaluator.evaluate(&permissions, request)?,
                denied => denied,
            },
            None => self.evaluator.evaluate(&permissions, request)?,
        };

        self.metrics.record_decision(&decision);
        match decision {
            Decision::Allow => debug!(
                "Access allowed: principal={}, resource={}, action={}",
                principal, request.resource, request.action
            ),
            Decision::Deny(reason) => {
                warn!(
                    "Access denied: principal={}, resource={}, action={}",
                    principal, request.resource, request.action
                );
                debug!("Denial reason for {} on {}: {}", principal, request.resource, reason);
            }
        }

        if let Some(sink) = &self.audit {
            sink.record(&AuditEvent::new(principal, request, decision)).await;
        }

        Ok(decision)
    }

    /// Fail with `GuardError::NotAuthorized` unless `request` is allowed.
    pub async fn authorize(
        &self,
        principal: &Principal,
        request: &AccessRequest,
    ) -> Result<(), GuardError> {
        match self.decide(principal, request).await? {
            Decision::Allow => Ok(()),
            Decision::Deny(_) => Err(GuardError::NotAuthorized),
        }
    }

    /// Resolve the caller and authorize in one step, returning the caller.
    pub async fn authorize_token(
        &self,
        token: Option<&str>,
        request: &AccessRequest,
    ) -> Result<Principal, GuardError> {
        let principal = self.resolve(token).await?;
        self.authorize(&principal, request).await?;
        Ok(principal)
    }

    async fn load_permissions(&self, principal: &Principal) -> Result<PermissionSet, GuardError> {
        let Some(identity) = principal.identity() else {
            return Ok(PermissionSet::new());
        };

        self.store.permissions_for(identity).await.map_err(|e| {
            self.metrics.inc_upstream_failures();
            error!("Permission lookup failed for {}: {}", principal, e);
            e
        })
    }
}
