use std::collections::BTreeSet;

use alzlib_core::{Identity, PolicyAssignment, PolicyDefinition};

use crate::node::RoleAssignment;

/// Applies the identity/role-assignment inference of §4.9 to one resolved
/// assignment, given the policy definition it targets (when resolvable;
/// built-in targets carry no local definition to inspect).
pub fn infer(node_id: &str, assignment: &mut PolicyAssignment, definition: Option<&PolicyDefinition>) -> Vec<RoleAssignment> {
    let Some(definition) = definition else {
        return Vec::new();
    };

    let assign_permissions_params = definition.assign_permissions_parameter_names();
    if assignment.requires_managed_identity(&assign_permissions_params)
        && !matches!(assignment.identity, Identity::UserAssigned { .. })
    {
        assignment.identity = Identity::SystemAssigned;
    }

    // Required roles come from the rule itself regardless of whether this
    // assignment carries a managed identity (S6): a caller wiring the
    // assignment to an existing identity still needs to know what to grant.
    let mut role_ids: BTreeSet<String> = definition
        .role_definition_resource_ids()
        .into_iter()
        .collect();
    let mut scope_values: Vec<String> = Vec::new();
    for param_name in &assign_permissions_params {
        if let Some(value) = assignment.parameters.get(param_name).and_then(|v| v.as_str()) {
            role_ids.insert(value.to_string());
            scope_values.push(value.to_string());
        }
    }

    let scopes: Vec<String> = if scope_values.is_empty() {
        vec![node_id.to_string()]
    } else {
        scope_values
    };

    let mut assignments = BTreeSet::new();
    for role in &role_ids {
        for scope in &scopes {
            assignments.insert(RoleAssignment {
                assignment_name: assignment.name.clone(),
                principal: node_id.to_string(),
                role: role.clone(),
                scope: scope.clone(),
            });
        }
    }
    assignments.into_iter().collect()
}
