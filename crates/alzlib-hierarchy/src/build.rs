use std::collections::{BTreeMap, BTreeSet};

use alzlib::AlzLib;
use alzlib_core::{AssetKind, Error, PolicyAssignment, Result};
use serde_json::Value;
use tracing::instrument;

use crate::identity;
use crate::node::{Hierarchy, HierarchyNode};
use crate::topology::topological_order;

/// Builds a resolved hierarchy for `architecture_name` (§4.9). `caller_defaults`
/// is the `{defaultName -> value}` map the caller supplies for C8 binding;
/// `external_parent_id` becomes the root node's logical parent.
#[instrument(skip(lib, caller_defaults))]
pub fn build(
    lib: &AlzLib,
    architecture_name: &str,
    external_parent_id: &str,
    default_location: &str,
    caller_defaults: &BTreeMap<String, Value>,
) -> Result<Hierarchy> {
    let architecture = lib
        .architecture(architecture_name)
        .ok_or_else(|| Error::UnresolvedAssetReference {
            node_id: String::new(),
            kind: AssetKind::Architecture,
            name: architecture_name.to_string(),
        })?;

    let order = topological_order(architecture)?;
    let root_id = order[0].id.clone();

    let mut nodes: BTreeMap<String, HierarchyNode> = BTreeMap::new();
    for mg in &order {
        let mut node = HierarchyNode::new(
            mg.id.clone(),
            mg.display_name.clone(),
            mg.parent_id.clone(),
            mg.exists,
        );
        if mg.parent_id.is_none() {
            node.external_parent_id = Some(external_parent_id.to_string());
        }

        let mut effective = BTreeSet::new();
        let mut effective_sets = BTreeSet::new();
        let mut effective_assignments = BTreeSet::new();
        let mut effective_roles = BTreeSet::new();
        for archetype_name in &mg.archetypes {
            let archetype = lib.archetype(archetype_name).ok_or_else(|| Error::UnresolvedAssetReference {
                node_id: mg.id.clone(),
                kind: AssetKind::Archetype,
                name: archetype_name.clone(),
            })?;
            node.archetypes.insert(archetype_name.clone());
            effective.extend(archetype.policy_definitions.iter().cloned());
            effective_sets.extend(archetype.policy_set_definitions.iter().cloned());
            effective_assignments.extend(archetype.policy_assignments.iter().cloned());
            effective_roles.extend(archetype.role_definitions.iter().cloned());
        }

        for name in &effective {
            let def = lib.policy_definition(name, None)?;
            node.local_policy_definitions.insert(name.clone(), def.clone());
        }
        for name in &effective_sets {
            let def = lib.policy_set_definition(name, None)?;
            node.local_policy_set_definitions.insert(name.clone(), def.clone());
        }
        for name in &effective_roles {
            let role = lib.role_definition(name).ok_or_else(|| Error::UnresolvedAssetReference {
                node_id: mg.id.clone(),
                kind: AssetKind::RoleDefinition,
                name: name.clone(),
            })?;
            node.local_role_definitions.insert(name.clone(), role.clone());
        }
        for name in &effective_assignments {
            let assignment = lib
                .policy_assignment(name)
                .ok_or_else(|| Error::UnresolvedAssetReference {
                    node_id: mg.id.clone(),
                    kind: AssetKind::PolicyAssignment,
                    name: name.clone(),
                })?
                .clone();
            node.local_assignments.insert(name.clone(), assignment);
        }

        nodes.insert(node.id.clone(), node);
    }

    for mg in &order {
        resolve_node(lib, &mg.id, &mut nodes, caller_defaults, default_location)?;
    }

    Ok(Hierarchy {
        architecture_name: architecture_name.to_string(),
        root_id,
        nodes,
    })
}

fn resolve_node(
    lib: &AlzLib,
    node_id: &str,
    nodes: &mut BTreeMap<String, HierarchyNode>,
    caller_defaults: &BTreeMap<String, Value>,
    default_location: &str,
) -> Result<()> {
    let ancestor_ids = ancestor_chain(node_id, nodes);
    let assignment_names: Vec<String> = nodes[node_id].local_assignments.keys().cloned().collect();

    for assignment_name in assignment_names {
        let assignment = nodes.get_mut(node_id).unwrap().local_assignments.remove(&assignment_name).unwrap();

        let original_params = assignment.parameters.clone();
        let mut single_map = BTreeMap::new();
        single_map.insert(assignment_name.clone(), assignment);
        alzlib::bind_defaults(lib.defaults_map(), caller_defaults, &mut single_map);
        let mut assignment = single_map.remove(&assignment_name).unwrap();
        let bound_parameter_names: Vec<String> = assignment
            .parameters
            .keys()
            .filter(|name| !original_params.contains_key(*name))
            .cloned()
            .collect();
        assignment.parameters.extend(original_params);
        if !assignment.parameters.contains_key("location") {
            assignment
                .parameters
                .insert("location".to_string(), Value::String(default_location.to_string()));
        }

        let target_name = strip_last_segment(&assignment.policy_definition_id);
        let scope_and_kind = find_definition_scope(&target_name, &ancestor_ids, nodes);

        // §4.8/§4.9: the binder only copies values in; it is this resolver's
        // job to confirm each default-bound parameter actually exists on the
        // referenced definition.
        for parameter_name in &bound_parameter_names {
            if parameter_existence(lib, nodes, &scope_and_kind, &target_name, parameter_name).is_none() {
                return Err(Error::ParameterNotOnDefinition {
                    assignment: assignment_name.clone(),
                    parameter: parameter_name.clone(),
                });
            }
        }

        let definition_for_identity = match scope_and_kind {
            Some((scope_id, is_set)) => {
                rewrite_policy_definition_id(&mut assignment, &scope_id, &target_name, is_set);
                if is_set {
                    None
                } else {
                    nodes[&scope_id].local_policy_definitions.get(&target_name).cloned()
                }
            }
            None => {
                if lib.policy_definition(&target_name, None).is_ok() || lib.policy_set_definition(&target_name, None).is_ok() {
                    return Err(Error::UnresolvedDefinitionReference {
                        assignment: assignment_name.clone(),
                        target: target_name.clone(),
                    });
                }
                None
            }
        };

        let role_assignments = identity::infer(node_id, &mut assignment, definition_for_identity.as_ref());
        let node = nodes.get_mut(node_id).unwrap();
        if !matches!(assignment.identity, alzlib_core::Identity::None) {
            node.identities.insert(assignment_name.clone(), assignment.identity.clone());
        }
        node.role_assignments.extend(role_assignments);
        node.role_assignments.sort();
        node.role_assignments.dedup();
        node.local_assignments.insert(assignment_name, assignment);
    }

    Ok(())
}

fn ancestor_chain(node_id: &str, nodes: &BTreeMap<String, HierarchyNode>) -> Vec<String> {
    let mut chain = vec![node_id.to_string()];
    let mut current = node_id.to_string();
    while let Some(parent_id) = nodes.get(&current).and_then(|n| n.parent_id.clone()) {
        chain.push(parent_id.clone());
        current = parent_id;
    }
    chain
}

fn strip_last_segment(id: &str) -> String {
    id.rsplit('/').next().unwrap_or(id).to_string()
}

/// Searches `node_id` then its ancestors, nearest first, for a locally
/// defined policy or policy-set definition named `target_name`. Returns the
/// defining node's id and whether it was a policy-set.
fn find_definition_scope(
    target_name: &str,
    ancestor_ids: &[String],
    nodes: &BTreeMap<String, HierarchyNode>,
) -> Option<(String, bool)> {
    for id in ancestor_ids {
        let node = &nodes[id];
        if node.local_policy_definitions.contains_key(target_name) {
            return Some((id.clone(), false));
        }
        if node.local_policy_set_definitions.contains_key(target_name) {
            return Some((id.clone(), true));
        }
    }
    None
}

/// Whether `parameter_name` exists on the definition `target_name` resolves
/// to, checking the node-local scope first and falling back to the library's
/// top-level definitions when unscoped. `None` means the parameter is not a
/// parameter of that definition at all (or the definition itself could not
/// be found, which `resolve_node`'s caller-id checks have already ruled out
/// by this point).
fn parameter_existence(
    lib: &AlzLib,
    nodes: &BTreeMap<String, HierarchyNode>,
    scope_and_kind: &Option<(String, bool)>,
    target_name: &str,
    parameter_name: &str,
) -> Option<bool> {
    match scope_and_kind {
        Some((scope_id, true)) => nodes[scope_id]
            .local_policy_set_definitions
            .get(target_name)
            .and_then(|def| def.is_parameter_optional(parameter_name)),
        Some((scope_id, false)) => nodes[scope_id]
            .local_policy_definitions
            .get(target_name)
            .and_then(|def| def.is_parameter_optional(parameter_name)),
        None => {
            if let Ok(def) = lib.policy_definition(target_name, None) {
                def.is_parameter_optional(parameter_name)
            } else if let Ok(set_def) = lib.policy_set_definition(target_name, None) {
                set_def.is_parameter_optional(parameter_name)
            } else {
                None
            }
        }
    }
}

fn rewrite_policy_definition_id(assignment: &mut PolicyAssignment, scope_id: &str, target_name: &str, is_set: bool) {
    let kind_segment = if is_set { "policySetDefinitions" } else { "policyDefinitions" };
    assignment.policy_definition_id = format!(
        "/providers/Microsoft.Management/managementGroups/{scope_id}/providers/Microsoft.Authorization/{kind_segment}/{target_name}"
    );
}
