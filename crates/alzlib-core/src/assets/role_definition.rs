use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AssetKind, Error, Result};

/// A custom RBAC role definition. `role_name` is the logical key used for
/// library lookups; `name` is the GUID Azure assigns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleDefinition {
    pub name: String,
    #[serde(rename = "roleName")]
    pub role_name: String,
    #[serde(default)]
    pub permissions: Vec<RolePermission>,
    #[serde(rename = "assignableScopes", default)]
    pub assignable_scopes: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RolePermission {
    #[serde(default)]
    pub actions: BTreeSet<String>,
    #[serde(rename = "notActions", default)]
    pub not_actions: BTreeSet<String>,
}

impl RoleDefinition {
    pub fn validate(&self) -> Result<()> {
        if self.role_name.trim().is_empty() {
            return Err(Error::NoNameProvided {
                kind: AssetKind::RoleDefinition,
            });
        }
        if self.name.trim().is_empty() {
            return Err(Error::PropertyMustNotBeNil {
                path: "name".to_string(),
            });
        }
        if Uuid::parse_str(&self.name).is_err() {
            return Err(Error::ResourceTypeIncorrect {
                expected: "name must be a GUID".to_string(),
            });
        }
        Ok(())
    }

    /// The logical name used for collection keys (§3: "roleName (logical key)").
    pub fn logical_name(&self) -> &str {
        &self.role_name
    }
}
