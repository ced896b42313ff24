use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::collection::VersionedAsset;
use crate::error::{AssetKind, Error, Result};
use crate::semver::SemanticVersion;

/// An ordered bundle of member policy definitions, each with its own
/// parameter bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicySetDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub parameters: BTreeMap<String, Value>,
    #[serde(rename = "policyDefinitions", default)]
    pub policy_definitions: Vec<PolicyDefinitionReference>,

    #[serde(skip)]
    parsed_version: Option<SemanticVersion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyDefinitionReference {
    #[serde(rename = "policyDefinitionId")]
    pub policy_definition_id: String,
    #[serde(rename = "parameters", default)]
    pub parameter_bindings: BTreeMap<String, Value>,
}

impl PolicySetDefinition {
    #[cfg(test)]
    pub(crate) fn new_for_test(name: &str, version: Option<&str>) -> Self {
        let mut def = Self {
            name: name.to_string(),
            version: version.map(|v| v.to_string()),
            parameters: BTreeMap::new(),
            policy_definitions: Vec::new(),
            parsed_version: None,
        };
        def.validate().unwrap();
        def
    }

    pub fn validate(&mut self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::NoNameProvided {
                kind: AssetKind::PolicySetDefinition,
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

    /// The distinct set of member policy-definition IDs this set references.
    pub fn referenced_definition_ids(&self) -> Vec<&str> {
        self.policy_definitions
            .iter()
            .map(|r| r.policy_definition_id.as_str())
            .collect()
    }

    /// A parameter is optional iff it carries a `defaultValue`, mirroring
    /// [`PolicyDefinition::is_parameter_optional`](super::PolicyDefinition::is_parameter_optional).
    /// `None` when `name` is not a parameter of this set definition at all.
    pub fn is_parameter_optional(&self, name: &str) -> Option<bool> {
        self.parameters
            .get(name)
            .map(|v| v.get("defaultValue").is_some())
    }
}

impl VersionedAsset for PolicySetDefinition {
    fn logical_name(&self) -> &str {
        &self.name
    }

    fn semantic_version(&self) -> Option<&SemanticVersion> {
        self.parsed_version.as_ref()
    }
}
