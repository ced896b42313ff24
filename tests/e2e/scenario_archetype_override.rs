//! An override layered on a base archetype adds and removes references
//! independently per reference class, leaving the classes it doesn't
//! mention untouched.

use alzlib::AlzLib;
use alzlib_core::MemoryFilesystem;
use serde_json::json;

fn library() -> MemoryFilesystem {
    let mut fs = MemoryFilesystem::new();
    fs.insert(
        "base.alz_archetype_definition.json",
        json!({
            "name": "base",
            "policyDefinitions": ["a", "b"],
            "policySetDefinitions": ["s"]
        })
        .to_string(),
    );
    fs.insert(
        "derived.alz_archetype_override.json",
        json!({
            "name": "derived",
            "baseArchetype": "base",
            "policyDefinitionsAdd": ["c"],
            "policyDefinitionsRemove": ["a"]
        })
        .to_string(),
    );
    fs
}

#[test]
fn add_and_remove_sets_apply_independently_per_reference_class() {
    let lib = AlzLib::init(&[library()], ".alzlib").unwrap();

    let derived = lib.archetype("derived").unwrap();
    assert_eq!(
        derived.policy_definitions,
        ["b", "c"].into_iter().map(String::from).collect()
    );
    assert_eq!(derived.policy_set_definitions, ["s"].into_iter().map(String::from).collect());
}

#[test]
fn an_override_may_chain_off_another_overrides_output_regardless_of_name_order() {
    let mut member1 = MemoryFilesystem::new();
    member1.insert(
        "base.alz_archetype_definition.json",
        json!({"name": "base", "policyDefinitions": ["a"]}).to_string(),
    );
    member1.insert(
        "z-base-derived.alz_archetype_override.json",
        json!({
            "name": "z-base-derived",
            "baseArchetype": "base",
            "policyDefinitionsAdd": ["b"]
        })
        .to_string(),
    );

    let mut member2 = MemoryFilesystem::new();
    member2.insert(
        "a-chain.alz_archetype_override.json",
        json!({
            "name": "a-chain",
            "baseArchetype": "z-base-derived",
            "policyDefinitionsAdd": ["c"]
        })
        .to_string(),
    );

    let lib = AlzLib::init(&[member1, member2], ".alzlib").unwrap();
    let chained = lib.archetype("a-chain").unwrap();
    assert_eq!(
        chained.policy_definitions,
        ["a", "b", "c"].into_iter().map(String::from).collect()
    );
}
