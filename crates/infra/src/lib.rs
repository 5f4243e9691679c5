//! File-backed collaborators for the authorization guard.

pub mod audit_logger;
pub mod policy_file;
pub mod static_store;

pub use audit_logger::{AuditLogger, AuditLoggerError};
pub use policy_file::{ConfigError, IdentityEntry, PolicyFile};
pub use static_store::StaticPermissionStore;
