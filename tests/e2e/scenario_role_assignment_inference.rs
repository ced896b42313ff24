//! A policy rule that names a required role surfaces as a role assignment
//! on build even when the referenced assignment sets no `assignPermissions`
//! parameter — only the managed identity is conditional on that.

use std::collections::BTreeMap;

use alzlib::AlzLib;
use alzlib_core::{Identity, MemoryFilesystem};
use serde_json::json;

const ROLE_ID: &str = "/providers/Microsoft.Authorization/roleDefinitions/11111111-1111-1111-1111-111111111111";

fn library() -> MemoryFilesystem {
    let mut fs = MemoryFilesystem::new();
    fs.insert(
        "deploy-diag.alz_policy_definition.json",
        json!({
            "name": "deploy-diag",
            "policyRule": {
                "then": {
                    "effect": "deployIfNotExists",
                    "details": {"roleDefinitionIds": [ROLE_ID]}
                }
            }
        })
        .to_string(),
    );
    fs.insert(
        "deploy-diag.alz_policy_assignment.json",
        json!({
            "name": "deploy-diag",
            "displayName": "Deploy diagnostics",
            "description": "deploys a diagnostic setting",
            "policyDefinitionId": "deploy-diag"
        })
        .to_string(),
    );
    fs.insert(
        "root.alz_archetype_definition.json",
        json!({
            "name": "root",
            "policyDefinitions": ["deploy-diag"],
            "policyAssignments": ["deploy-diag"]
        })
        .to_string(),
    );
    fs.insert(
        "starter.alz_architecture_definition.json",
        json!({
            "name": "starter",
            "managementGroups": [{"id": "mg1", "displayName": "MG1", "archetypes": ["root"]}]
        })
        .to_string(),
    );
    fs
}

#[test]
fn role_required_by_the_rule_emits_without_a_managed_identity() {
    let lib = AlzLib::init(&[library()], ".alzlib").unwrap();
    let hierarchy = alzlib_hierarchy::build(&lib, "starter", "ext", "eastus", &BTreeMap::new()).unwrap();

    let node = hierarchy.node("mg1").unwrap();
    assert_eq!(node.role_assignments.len(), 1);
    assert_eq!(node.role_assignments[0].role, ROLE_ID);
    assert_eq!(node.role_assignments[0].scope, "mg1");
    assert!(node.identities.is_empty());

    let assignment = node.local_assignments.get("deploy-diag").unwrap();
    assert_eq!(assignment.identity, Identity::None);
}
