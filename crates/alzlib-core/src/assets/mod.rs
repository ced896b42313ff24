//! Wire-level asset model (C3): typed wrappers around the documents a
//! library member contributes, their validators, and the property
//! accessors the hierarchy resolver and checker depend on.

mod archetype;
mod architecture;
mod defaults;
mod policy_assignment;
mod policy_definition;
mod policy_set_definition;
mod role_definition;

pub use archetype::{Archetype, ArchetypeOverride, OverrideDiff};
pub use architecture::{Architecture, ManagementGroupNode};
pub use defaults::{DefaultAssignmentTarget, DefaultPolicyValue};
pub use policy_assignment::{Identity, PolicyAssignment};
pub use policy_definition::{ParameterMetadata, PolicyDefinition, PolicyParameter};
pub use policy_set_definition::{PolicyDefinitionReference, PolicySetDefinition};
pub use role_definition::RoleDefinition;

/// Strips any leading scope and returns the canonical
/// `/providers/Microsoft.Authorization/roleDefinitions/{guid}` form (§4.3).
pub fn normalize_role_definition_id(id: &str) -> String {
    let guid = id.rsplit('/').next().unwrap_or(id);
    format!("/providers/Microsoft.Authorization/roleDefinitions/{guid}")
}
