//! A library assembled from several in-memory filesystems merges per the
//! documented precedence rules: policy (set) definitions upsert across
//! members, while assignments, role definitions, archetypes, overrides,
//! and architectures let the later member win outright.

use alzlib::AlzLib;
use alzlib_core::MemoryFilesystem;
use serde_json::json;

fn member_with_assignment(display_name: &str) -> MemoryFilesystem {
    let mut fs = MemoryFilesystem::new();
    fs.insert(
        "require-tag.alz_policy_definition.json",
        json!({"name": "require-tag", "policyRule": {"then": {"effect": "deny"}}}).to_string(),
    );
    fs.insert(
        "require-tag.alz_policy_assignment.json",
        json!({
            "name": "require-tag",
            "displayName": display_name,
            "description": "enforces a required tag",
            "policyDefinitionId": "require-tag"
        })
        .to_string(),
    );
    fs
}

#[test]
fn later_member_overwrites_earlier_for_assignments() {
    let lib = AlzLib::init(&[member_with_assignment("v1"), member_with_assignment("v2")], ".alzlib").unwrap();
    assert_eq!(lib.policy_assignment("require-tag").unwrap().display_name, "v2");
}

fn member_with_versioned_policy(version: &str) -> MemoryFilesystem {
    let mut fs = MemoryFilesystem::new();
    fs.insert(
        format!("p.{version}.alz_policy_definition.json"),
        json!({"name": "p", "version": version, "policyRule": {"then": {"effect": "deny"}}}).to_string(),
    );
    fs
}

#[test]
fn versioned_definitions_upsert_across_members_even_at_the_same_version() {
    // Same exact version contributed by two different members: upsert with
    // overwrite=true across members tolerates the repeat instead of
    // erroring the way a duplicate within one member would.
    let lib = AlzLib::init(&[member_with_versioned_policy("1.0.0"), member_with_versioned_policy("1.0.0")], ".alzlib").unwrap();
    assert_eq!(lib.policy_definition("p", None).unwrap().version.as_deref(), Some("1.0.0"));
}

#[test]
fn duplicate_exact_version_within_one_member_is_an_error() {
    let mut fs = MemoryFilesystem::new();
    fs.insert(
        "p.1.0.0.alz_policy_definition.json",
        json!({"name": "p", "version": "1.0.0", "policyRule": {"then": {"effect": "deny"}}}).to_string(),
    );
    fs.insert(
        "p.1.0.0.again.alz_policy_definition.json",
        json!({"name": "p", "version": "1.0.0", "policyRule": {"then": {"effect": "deny"}}}).to_string(),
    );
    let err = AlzLib::init(&[fs], ".alzlib").unwrap_err();
    assert!(matches!(err, alzlib_core::Error::ResourceAlreadyExists { .. }));
}

#[test]
fn duplicate_logical_name_within_one_member_is_an_error() {
    let mut fs = MemoryFilesystem::new();
    fs.insert(
        "a.alz_policy_assignment.json",
        json!({
            "name": "dup",
            "displayName": "a",
            "description": "d",
            "policyDefinitionId": "p"
        })
        .to_string(),
    );
    fs.insert(
        "b.alz_policy_assignment.json",
        json!({
            "name": "dup",
            "displayName": "b",
            "description": "d",
            "policyDefinitionId": "p"
        })
        .to_string(),
    );
    let err = AlzLib::init(&[fs], ".alzlib").unwrap_err();
    assert!(matches!(err, alzlib_core::Error::ResourceAlreadyExists { .. }));
}
