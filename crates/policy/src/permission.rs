use crate::action::{Action, ActionSet};
use crate::error::PolicyError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Reserved permission name granting unrestricted access.
pub const FULL_ACCESS: &str = "*";

/// Permission name holding the locales an identity may work in.
pub const I18N_PERMISSION: &str = "content.i18n";

/// Grant on a single named resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopedPermission {
    pub name: String,
    pub actions: ActionSet,
    /// `None` means the grant is not restricted by locale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locales: Option<BTreeSet<String>>,
}

impl ScopedPermission {
    pub fn new(name: impl Into<String>, actions: ActionSet) -> Self {
        Self {
            name: name.into(),
            actions,
            locales: None,
        }
    }

    pub fn with_locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locales = Some(locales.into_iter().map(Into::into).collect());
        self
    }

    pub fn allows(&self, action: Action) -> bool {
        self.actions.contains(action)
    }
}

/// One grant held by an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Permission {
    FullAccess,
    Scoped(ScopedPermission),
}

impl Permission {
    pub fn scoped(name: impl Into<String>, actions: ActionSet) -> Self {
        Permission::Scoped(ScopedPermission::new(name, actions))
    }

    pub fn name(&self) -> &str {
        match self {
            Permission::FullAccess => FULL_ACCESS,
            Permission::Scoped(scoped) => &scoped.name,
        }
    }
}

/// Stored shape of a permission as handed over by permission storage.
///
/// ```yaml
/// - name: car-manufacturers
///   rwd: rw
/// - name: "*"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rwd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locales: Option<Vec<String>>,
}

impl TryFrom<PermissionRecord> for Permission {
    type Error = PolicyError;

    fn try_from(record: PermissionRecord) -> Result<Self, Self::Error> {
        let name = record.name.trim();
        if name.is_empty() {
            return Err(PolicyError::EmptyResource);
        }
        // Access codes are validated even on the wildcard, where they carry no meaning.
        let actions = match record.rwd.as_deref() {
            Some(code) => ActionSet::from_rwd(code)?,
            None => ActionSet::empty(),
        };

        if name == FULL_ACCESS {
            return Ok(Permission::FullAccess);
        }

        Ok(Permission::Scoped(ScopedPermission {
            name: name.to_string(),
            actions,
            locales: record.locales.map(|l| l.into_iter().collect()),
        }))
    }
}

impl From<&Permission> for PermissionRecord {
    fn from(permission: &Permission) -> Self {
        match permission {
            Permission::FullAccess => PermissionRecord {
                name: FULL_ACCESS.to_string(),
                ..Default::default()
            },
            Permission::Scoped(scoped) => PermissionRecord {
                name: scoped.name.clone(),
                rwd: Some(scoped.actions.to_rwd()),
                locales: scoped.locales.as_ref().map(|l| l.iter().cloned().collect()),
            },
        }
    }
}

/// All permissions held by one identity for one request.
///
/// The wildcard is kept as a flag, so a set can never hold more than one.
/// Names are stored trimmed, and a scoped grant named `*` sets the flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    full_access: bool,
    scoped: HashMap<String, ScopedPermission>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set holding only the wildcard grant.
    pub fn full_access() -> Self {
        Self {
            full_access: true,
            scoped: HashMap::new(),
        }
    }

    pub fn insert(&mut self, permission: Permission) -> Result<(), PolicyError> {
        match permission {
            Permission::FullAccess => {
                self.full_access = true;
                Ok(())
            }
            Permission::Scoped(mut scoped) => {
                scoped.name = scoped.name.trim().to_string();
                if scoped.name.is_empty() {
                    return Err(PolicyError::EmptyResource);
                }
                // A scoped grant named `*` is still the wildcard.
                if scoped.name == FULL_ACCESS {
                    self.full_access = true;
                    return Ok(());
                }
                if self.scoped.contains_key(&scoped.name) {
                    return Err(PolicyError::DuplicatePermission(scoped.name));
                }
                self.scoped.insert(scoped.name.clone(), scoped);
                Ok(())
            }
        }
    }

    pub fn with(mut self, permission: Permission) -> Result<Self, PolicyError> {
        self.insert(permission)?;
        Ok(self)
    }

    pub fn from_records<I>(records: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = PermissionRecord>,
    {
        let mut set = Self::new();
        for record in records {
            set.insert(Permission::try_from(record)?)?;
        }
        Ok(set)
    }

    pub fn has_full_access(&self) -> bool {
        self.full_access
    }

    pub fn get(&self, resource: &str) -> Option<&ScopedPermission> {
        self.scoped.get(resource)
    }

    pub fn is_empty(&self) -> bool {
        !self.full_access && self.scoped.is_empty()
    }

    pub fn len(&self) -> usize {
        self.scoped.len() + usize::from(self.full_access)
    }

    pub fn scoped(&self) -> impl Iterator<Item = &ScopedPermission> {
        self.scoped.values()
    }
}
