use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{AssetKind, Error, Result};

/// A named bundle of asset references, by logical name (§3).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Archetype {
    pub name: String,
    #[serde(rename = "policyDefinitions", default)]
    pub policy_definitions: BTreeSet<String>,
    #[serde(rename = "policySetDefinitions", default)]
    pub policy_set_definitions: BTreeSet<String>,
    #[serde(rename = "policyAssignments", default)]
    pub policy_assignments: BTreeSet<String>,
    #[serde(rename = "roleDefinitions", default)]
    pub role_definitions: BTreeSet<String>,
}

impl Archetype {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::NoNameProvided {
                kind: AssetKind::Archetype,
            });
        }
        Ok(())
    }
}

/// An archetype derived from a base by adding/removing references in three
/// of its four reference classes; role definitions pass through unchanged
/// from the base (§3, §4.7).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchetypeOverride {
    pub name: String,
    #[serde(rename = "baseArchetype")]
    pub base_archetype: String,
    #[serde(rename = "policyDefinitionsAdd", default)]
    pub policy_definitions_add: BTreeSet<String>,
    #[serde(rename = "policyDefinitionsRemove", default)]
    pub policy_definitions_remove: BTreeSet<String>,
    #[serde(rename = "policySetDefinitionsAdd", default)]
    pub policy_set_definitions_add: BTreeSet<String>,
    #[serde(rename = "policySetDefinitionsRemove", default)]
    pub policy_set_definitions_remove: BTreeSet<String>,
    #[serde(rename = "policyAssignmentsAdd", default)]
    pub policy_assignments_add: BTreeSet<String>,
    #[serde(rename = "policyAssignmentsRemove", default)]
    pub policy_assignments_remove: BTreeSet<String>,
}

/// The sets actually added/removed by one [`ArchetypeOverride::apply`] call,
/// useful for auditing and for the idempotency property in §4.7.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideDiff {
    pub policy_definitions_added: BTreeSet<String>,
    pub policy_definitions_removed: BTreeSet<String>,
    pub policy_set_definitions_added: BTreeSet<String>,
    pub policy_set_definitions_removed: BTreeSet<String>,
    pub policy_assignments_added: BTreeSet<String>,
    pub policy_assignments_removed: BTreeSet<String>,
}

impl ArchetypeOverride {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::NoNameProvided {
                kind: AssetKind::ArchetypeOverride,
            });
        }
        if self.base_archetype.trim().is_empty() {
            return Err(Error::UnknownBaseArchetype {
                name: String::new(),
            });
        }
        Ok(())
    }

    /// Union add-sets, difference remove-sets, for each of the three
    /// overridable reference classes. Role definitions are copied from
    /// `base` unchanged. Applying the same override twice to the same base
    /// yields an equal result (§4.7 idempotency).
    pub fn apply(&self, base: &Archetype) -> (Archetype, OverrideDiff) {
        let mut result = base.clone();
        result.name = self.name.clone();

        let diff = OverrideDiff {
            policy_definitions_added: self
                .policy_definitions_add
                .difference(&base.policy_definitions)
                .cloned()
                .collect(),
            policy_definitions_removed: self
                .policy_definitions_remove
                .intersection(&base.policy_definitions)
                .cloned()
                .collect(),
            policy_set_definitions_added: self
                .policy_set_definitions_add
                .difference(&base.policy_set_definitions)
                .cloned()
                .collect(),
            policy_set_definitions_removed: self
                .policy_set_definitions_remove
                .intersection(&base.policy_set_definitions)
                .cloned()
                .collect(),
            policy_assignments_added: self
                .policy_assignments_add
                .difference(&base.policy_assignments)
                .cloned()
                .collect(),
            policy_assignments_removed: self
                .policy_assignments_remove
                .intersection(&base.policy_assignments)
                .cloned()
                .collect(),
        };

        result.policy_definitions = base
            .policy_definitions
            .union(&self.policy_definitions_add)
            .cloned()
            .collect::<BTreeSet<_>>()
            .difference(&self.policy_definitions_remove)
            .cloned()
            .collect();
        result.policy_set_definitions = base
            .policy_set_definitions
            .union(&self.policy_set_definitions_add)
            .cloned()
            .collect::<BTreeSet<_>>()
            .difference(&self.policy_set_definitions_remove)
            .cloned()
            .collect();
        result.policy_assignments = base
            .policy_assignments
            .union(&self.policy_assignments_add)
            .cloned()
            .collect::<BTreeSet<_>>()
            .difference(&self.policy_assignments_remove)
            .cloned()
            .collect();

        (result, diff)
    }
}
