use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::collection::VersionedAsset;
use crate::error::{AssetKind, Error, Result};
use crate::semver::SemanticVersion;

/// A single Azure Policy definition, with its rule kept opaque (§9: model
/// `policyRule` as a sum type or best-effort path query, never a typed
/// schema).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "policyRule")]
    pub policy_rule: Value,
    #[serde(default)]
    pub parameters: BTreeMap<String, PolicyParameter>,
    /// Parsed form of `version`, populated by [`validate`](Self::validate).
    /// Kept so [`VersionedAsset::semantic_version`] can hand out a
    /// reference instead of re-parsing on every lookup.
    #[serde(skip)]
    parsed_version: Option<SemanticVersion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyParameter {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub parameter_type: Option<String>,
    #[serde(rename = "defaultValue", default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub metadata: ParameterMetadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParameterMetadata {
    #[serde(rename = "assignPermissions", default)]
    pub assign_permissions: bool,
}

impl PolicyDefinition {
    #[cfg(test)]
    pub(crate) fn new_for_test(name: &str, version: Option<&str>, policy_rule: Value) -> Self {
        let mut def = Self {
            name: name.to_string(),
            version: version.map(|v| v.to_string()),
            policy_rule,
            parameters: BTreeMap::new(),
            parsed_version: None,
        };
        def.validate().unwrap();
        def
    }

    /// Validates fields and caches the parsed version, run on ingest and on
    /// direct construction (§4.3).
    pub fn validate(&mut self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::NoNameProvided {
                kind: AssetKind::PolicyDefinition,
            });
        }
        self.parsed_version = match &self.version {
            None => None,
            Some(v) => Some(
                v.parse::<SemanticVersion>()
                    .map_err(|_| Error::InvalidVersion { value: v.clone() })?,
            ),
        };
        Ok(())
    }

    /// Role-definition resource IDs referenced by `then.details.roleDefinitionIds`.
    /// Returns an empty list, never an error, when `then.details` is an
    /// array (append-style rules, §4.3).
    pub fn role_definition_resource_ids(&self) -> Vec<String> {
        let then = match self.policy_rule.get("then") {
            Some(t) => t,
            None => return Vec::new(),
        };
        let details = match then.get("details") {
            Some(d) => d,
            None => return Vec::new(),
        };
        if details.is_array() {
            return Vec::new();
        }
        details
            .get("roleDefinitionIds")
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str())
                    .map(super::normalize_role_definition_id)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Names of parameters flagged `metadata.assignPermissions == true`.
    pub fn assign_permissions_parameter_names(&self) -> Vec<String> {
        self.parameters
            .iter()
            .filter(|(_, p)| p.metadata.assign_permissions)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// A parameter is optional iff it carries a `defaultValue`.
    pub fn is_parameter_optional(&self, name: &str) -> Option<bool> {
        self.parameters.get(name).map(|p| p.default_value.is_some())
    }
}

impl VersionedAsset for PolicyDefinition {
    fn logical_name(&self) -> &str {
        &self.name
    }

    fn semantic_version(&self) -> Option<&SemanticVersion> {
        self.parsed_version.as_ref()
    }
}
