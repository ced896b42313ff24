use serde::{Deserialize, Serialize};

use crate::error::{AssetKind, Error, Result};

/// One assignment targeted by a default-policy-value, and the parameters on
/// it that receive the bound value (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultAssignmentTarget {
    #[serde(rename = "assignmentName")]
    pub assignment_name: String,
    #[serde(rename = "parameterNames", default)]
    pub parameter_names: Vec<String>,
}

/// A named scalar binding a caller supplies at hierarchy-build time (§3,
/// §4.8).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultPolicyValue {
    #[serde(rename = "defaultName")]
    pub default_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub assignments: Vec<DefaultAssignmentTarget>,
}

impl DefaultPolicyValue {
    pub fn validate(&self) -> Result<()> {
        if self.default_name.trim().is_empty() {
            return Err(Error::NoNameProvided {
                kind: AssetKind::Defaults,
            });
        }
        Ok(())
    }
}
