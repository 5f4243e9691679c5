//! YAML policy file: identities, their permissions, and credential tokens.

use resolver_guard_core::{Identity, IdentityKind};
use resolver_guard_policy::{PermissionRecord, PermissionSet};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid policy file: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyFile {
    #[serde(default)]
    pub identities: Vec<IdentityEntry>,
    /// Credential token to identity id.
    #[serde(default)]
    pub tokens: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityEntry {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(rename = "type", default)]
    pub kind: IdentityKind,
    #[serde(default)]
    pub permissions: Vec<PermissionRecord>,
}

impl IdentityEntry {
    pub fn identity(&self) -> Identity {
        let display_name = if self.display_name.is_empty() {
            self.id.clone()
        } else {
            self.display_name.clone()
        };
        Identity::new(self.id.clone(), display_name, self.kind.clone())
    }

    pub fn permission_set(&self) -> Result<PermissionSet, ConfigError> {
        PermissionSet::from_records(self.permissions.iter().cloned())
            .map_err(|e| ConfigError::Invalid(format!("identity {}: {}", self.id, e)))
    }
}

impl PolicyFile {
    /// Load and validate a policy file.
    ///
    /// # Errors
    /// Returns error if the file is missing, empty, not valid YAML, or fails
    /// [`PolicyFile::validate`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Err(ConfigError::Invalid("Policy file is empty".to_string()));
        }
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let policy: PolicyFile = serde_yaml::from_str(content)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject empty or duplicate ids, invalid permission records, and tokens
    /// pointing at unknown identities.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for entry in &self.identities {
            if entry.id.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "Identity missing required field: id".to_string(),
                ));
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "Duplicate identity: {}",
                    entry.id
                )));
            }
            entry.permission_set()?;
        }

        for (token, id) in &self.tokens {
            if token.is_empty() {
                return Err(ConfigError::Invalid("Empty token".to_string()));
            }
            if !seen.contains(id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "Token refers to unknown identity: {}",
                    id
                )));
            }
        }

        Ok(())
    }
}
