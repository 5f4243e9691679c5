//! Locale access check, run by callers before [`crate::evaluate`] on
//! multi-locale deployments.

use crate::evaluator::{Decision, DenyReason};
use crate::permission::{PermissionSet, I18N_PERMISSION};

/// Decide whether the identity may work in `locale`.
///
/// Full access allows every locale. Otherwise the `content.i18n` grant must
/// exist; without a `locales` list it covers all locales.
pub fn check_locale_access(permissions: &PermissionSet, locale: &str) -> Decision {
    if permissions.has_full_access() {
        return Decision::Allow;
    }

    let Some(grant) = permissions.get(I18N_PERMISSION) else {
        return Decision::Deny(DenyReason::LocaleNotGranted);
    };

    match &grant.locales {
        None => Decision::Allow,
        Some(locales) if locales.contains(locale) => Decision::Allow,
        Some(_) => Decision::Deny(DenyReason::LocaleNotGranted),
    }
}
