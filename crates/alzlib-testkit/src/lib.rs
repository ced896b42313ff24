//! Shared fixtures for alzlib's own integration and property tests: small,
//! hand-built library members covering the scenarios named in §8, so
//! workspace-level tests don't each re-derive the same JSON documents.

use alzlib_core::MemoryFilesystem;
use serde_json::json;

fn fs_from(files: &[(&str, serde_json::Value)]) -> MemoryFilesystem {
    let mut fs = MemoryFilesystem::new();
    for (path, doc) in files {
        fs.insert(*path, doc.to_string().into_bytes());
    }
    fs
}

/// A single library member: one policy definition, one assignment that
/// targets it, one archetype bundling both, and a two-node architecture
/// rooted at `root-mg` with `child-mg` beneath it.
pub fn minimal_library() -> MemoryFilesystem {
    fs_from(&[
        (
            "require-tag.alz_policy_definition.json",
            json!({
                "name": "require-tag",
                "policyRule": {"then": {"effect": "deny"}}
            }),
        ),
        (
            "require-tag.alz_policy_assignment.json",
            json!({
                "name": "require-tag",
                "displayName": "Require tag",
                "description": "enforces a required tag",
                "policyDefinitionId": "require-tag"
            }),
        ),
        (
            "root.alz_archetype_definition.json",
            json!({
                "name": "root",
                "policyDefinitions": ["require-tag"],
                "policyAssignments": ["require-tag"]
            }),
        ),
        (
            "starter.alz_architecture_definition.json",
            json!({
                "name": "starter",
                "managementGroups": [
                    {"id": "root-mg", "displayName": "Root", "archetypes": ["root"]},
                    {"id": "child-mg", "displayName": "Child", "parentId": "root-mg", "archetypes": []}
                ]
            }),
        ),
    ])
}

/// Grounds S4: a base archetype plus an override that adds one policy
/// definition and removes another, leaving role definitions untouched.
pub fn archetype_override_library() -> MemoryFilesystem {
    fs_from(&[
        (
            "base.alz_archetype_definition.json",
            json!({
                "name": "base",
                "policyDefinitions": ["a", "b"],
                "policySetDefinitions": ["s"],
                "roleDefinitions": ["Custom Reader"]
            }),
        ),
        (
            "derived.alz_archetype_override.json",
            json!({
                "name": "derived",
                "baseArchetype": "base",
                "policyDefinitionsAdd": ["c"],
                "policyDefinitionsRemove": ["a"]
            }),
        ),
    ])
}

/// Grounds S6: a policy definition whose rule names a required role and
/// whose `assignPermissions` parameter is left unset on the assignment, so
/// the role requirement still surfaces without a managed identity.
pub fn role_inference_library() -> MemoryFilesystem {
    fs_from(&[
        (
            "deploy-diag.alz_policy_definition.json",
            json!({
                "name": "deploy-diag",
                "policyRule": {
                    "then": {
                        "effect": "deployIfNotExists",
                        "details": {
                            "roleDefinitionIds": [
                                "/providers/Microsoft.Authorization/roleDefinitions/11111111-1111-1111-1111-111111111111"
                            ]
                        }
                    }
                },
                "parameters": {
                    "logAnalyticsScope": {
                        "type": "String",
                        "metadata": {"assignPermissions": true}
                    }
                }
            }),
        ),
        (
            "deploy-diag.alz_policy_assignment.json",
            json!({
                "name": "deploy-diag",
                "displayName": "Deploy diagnostics",
                "description": "deploys a diagnostic setting",
                "policyDefinitionId": "deploy-diag"
            }),
        ),
        (
            "root.alz_archetype_definition.json",
            json!({
                "name": "root",
                "policyDefinitions": ["deploy-diag"],
                "policyAssignments": ["deploy-diag"]
            }),
        ),
        (
            "starter.alz_architecture_definition.json",
            json!({
                "name": "starter",
                "managementGroups": [
                    {"id": "root-mg", "displayName": "Root", "archetypes": ["root"]}
                ]
            }),
        ),
    ])
}
