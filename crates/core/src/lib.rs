//! Resolver-layer authorization pipeline.
//!
//! Wires an identity resolver and a permission store around the pure
//! evaluator in `resolver-guard-policy`, so resolvers make one call instead
//! of repeating the permission check inline.

pub mod guard;
pub mod interfaces;
pub mod metrics;
pub mod types;

pub use guard::AuthorizationGuard;
pub use interfaces::{AuditSink, GuardError, IdentityResolver, PermissionStore};
pub use metrics::{GuardMetrics, MetricsSnapshot};
pub use types::{AuditEvent, Identity, IdentityKind, Principal};
