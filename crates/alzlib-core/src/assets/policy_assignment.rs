use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AssetKind, Error, Result};

const NAME_MAX: usize = 24;
const DISPLAY_NAME_RANGE: (usize, usize) = (1, 128);
const DESCRIPTION_RANGE: (usize, usize) = (1, 512);

/// The managed identity attached to a policy assignment (§6).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Identity {
    #[default]
    None,
    SystemAssigned,
    UserAssigned {
        #[serde(rename = "userAssignedIdentities", default)]
        identities: BTreeSet<String>,
    },
}

/// An Azure Policy assignment, scoped to a management group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyAssignment {
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "policyDefinitionId")]
    pub policy_definition_id: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, Value>,
    #[serde(default)]
    pub identity: Identity,
    #[serde(rename = "resourceSelectors", default)]
    pub resource_selectors: Vec<Value>,
    #[serde(default)]
    pub overrides: Vec<Value>,
    #[serde(rename = "enforcementMode", default = "default_enforcement_mode")]
    pub enforcement_mode: String,
}

fn default_enforcement_mode() -> String {
    "Default".to_string()
}

impl PolicyAssignment {
    /// Validates the naming constraints of §6 and fills absent optional
    /// collections with empty values.
    pub fn validate(&mut self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::NoNameProvided {
                kind: AssetKind::PolicyAssignment,
            });
        }
        check_length("name", &self.name, 1, NAME_MAX)?;
        check_length(
            "displayName",
            &self.display_name,
            DISPLAY_NAME_RANGE.0,
            DISPLAY_NAME_RANGE.1,
        )?;
        check_length(
            "description",
            &self.description,
            DESCRIPTION_RANGE.0,
            DESCRIPTION_RANGE.1,
        )?;
        if self.enforcement_mode.is_empty() {
            self.enforcement_mode = default_enforcement_mode();
        }
        Ok(())
    }

    pub fn requires_managed_identity(&self, assign_permissions_params: &[String]) -> bool {
        assign_permissions_params
            .iter()
            .any(|p| self.parameters.contains_key(p))
    }
}

fn check_length(path: &str, value: &str, min: usize, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(Error::PropertyLength {
            path: path.to_string(),
            min,
            max,
            actual: len,
        });
    }
    Ok(())
}
