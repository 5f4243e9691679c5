//! Permission evaluation for resolver-layer authorization.
//!
//! Pure decision logic: no I/O, no logging, no shared state. Callers supply a
//! resolved [`PermissionSet`] and an [`AccessRequest`] and receive a
//! [`Decision`].

pub mod action;
pub mod error;
pub mod evaluator;
pub mod locale;
pub mod permission;

pub use action::{Action, ActionSet};
pub use error::PolicyError;
pub use evaluator::{evaluate, AccessRequest, Decision, DenyReason, PermissionEvaluator};
pub use locale::check_locale_access;
pub use permission::{
    Permission, PermissionRecord, PermissionSet, ScopedPermission, FULL_ACCESS, I18N_PERMISSION,
};
