use crate::policy_file::{ConfigError, PolicyFile};
use async_trait::async_trait;
use resolver_guard_core::{GuardError, Identity, IdentityResolver, PermissionStore, Principal};
use resolver_guard_policy::PermissionSet;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Identity resolver and permission store backed by a [`PolicyFile`].
///
/// Permission sets are built once at load time; each lookup hands out a
/// fresh copy.
pub struct StaticPermissionStore {
    identities: HashMap<String, (Identity, PermissionSet)>,
    tokens: HashMap<String, String>,
}

impl StaticPermissionStore {
    pub fn from_policy(policy: &PolicyFile) -> Result<Self, ConfigError> {
        policy.validate()?;

        let mut identities = HashMap::new();
        for entry in &policy.identities {
            identities.insert(entry.id.clone(), (entry.identity(), entry.permission_set()?));
        }

        Ok(Self {
            identities,
            tokens: policy
                .tokens
                .iter()
                .map(|(token, id)| (token.clone(), id.clone()))
                .collect(),
        })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_policy(&PolicyFile::load(path)?)
    }

    pub fn identity(&self, id: &str) -> Option<&Identity> {
        self.identities.get(id).map(|(identity, _)| identity)
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

#[async_trait]
impl IdentityResolver for StaticPermissionStore {
    async fn resolve(&self, token: Option<&str>) -> Result<Principal, GuardError> {
        let Some(token) = token else {
            return Ok(Principal::Anonymous);
        };

        match self.tokens.get(token).and_then(|id| self.identity(id)) {
            Some(identity) => Ok(Principal::Authenticated(identity.clone())),
            None => {
                warn!("Unknown token presented, treating request as anonymous");
                Ok(Principal::Anonymous)
            }
        }
    }
}

#[async_trait]
impl PermissionStore for StaticPermissionStore {
    async fn permissions_for(&self, identity: &Identity) -> Result<PermissionSet, GuardError> {
        match self.identities.get(&identity.id) {
            Some((_, permissions)) => Ok(permissions.clone()),
            None => {
                debug!("No permissions configured for identity: {}", identity.id);
                Ok(PermissionSet::new())
            }
        }
    }
}
