use serde::{Deserialize, Serialize};

use crate::error::{AssetKind, Error, Result};

/// One node of an architecture's management-group tree (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagementGroupNode {
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(default)]
    pub archetypes: Vec<String>,
    #[serde(rename = "parentId", default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub exists: bool,
}

/// A named, ordered set of management-group nodes (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Architecture {
    pub name: String,
    #[serde(rename = "managementGroups", default)]
    pub management_groups: Vec<ManagementGroupNode>,
}

impl Architecture {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::NoNameProvided {
                kind: AssetKind::Architecture,
            });
        }
        let roots = self
            .management_groups
            .iter()
            .filter(|n| n.parent_id.is_none())
            .count();
        if roots != 1 {
            return Err(Error::MultipleRoots {
                architecture: self.name.clone(),
            });
        }
        Ok(())
    }

    pub fn root(&self) -> Option<&ManagementGroupNode> {
        self.management_groups.iter().find(|n| n.parent_id.is_none())
    }
}
