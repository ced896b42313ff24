//! The composable checks over an assembled library: an unreferenced
//! definition is flagged, a default naming an unknown assignment is
//! flagged, and every architecture in a well-formed library is buildable.

use alzlib::checker::{AllDefinitionsAreReferenced, Check, DefaultsCheck};
use alzlib::AlzLib;
use alzlib_core::MemoryFilesystem;
use alzlib_hierarchy::checker::AllArchitecturesBuildable;
use serde_json::json;

fn library_with_unreferenced_definition() -> MemoryFilesystem {
    let mut fs = MemoryFilesystem::new();
    fs.insert(
        "referenced.alz_policy_definition.json",
        json!({"name": "referenced", "policyRule": {"then": {"effect": "deny"}}}).to_string(),
    );
    fs.insert(
        "orphan.alz_policy_definition.json",
        json!({"name": "orphan", "policyRule": {"then": {"effect": "deny"}}}).to_string(),
    );
    fs.insert(
        "root.alz_archetype_definition.json",
        json!({"name": "root", "policyDefinitions": ["referenced"]}).to_string(),
    );
    fs
}

#[test]
fn all_definitions_are_referenced_flags_the_orphan() {
    let lib = AlzLib::init(&[library_with_unreferenced_definition()], ".alzlib").unwrap();
    let errors = AllDefinitionsAreReferenced.run(&lib);
    assert_eq!(errors.len(), 1);
}

fn library_with_dangling_default() -> MemoryFilesystem {
    let mut fs = MemoryFilesystem::new();
    fs.insert(
        "alz_policy_default_values.json",
        json!([{
            "defaultName": "location",
            "description": "deployment location",
            "assignments": [{"assignmentName": "does-not-exist", "parameterNames": ["location"]}]
        }])
        .to_string(),
    );
    fs
}

#[test]
fn defaults_check_flags_unknown_assignment_target() {
    let lib = AlzLib::init(&[library_with_dangling_default()], ".alzlib").unwrap();
    let errors = DefaultsCheck.run(&lib);
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], alzlib_core::Error::DefaultTargetsUnknownAssignment { .. }));
}

fn library_with_one_architecture() -> MemoryFilesystem {
    let mut fs = MemoryFilesystem::new();
    fs.insert(
        "root.alz_archetype_definition.json",
        json!({"name": "root", "policyDefinitions": []}).to_string(),
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

fn library_with_set_definition_default() -> MemoryFilesystem {
    let mut fs = MemoryFilesystem::new();
    fs.insert(
        "initiative.alz_policy_set_definition.json",
        json!({
            "name": "initiative",
            "parameters": {"location": {"defaultValue": "eastus"}},
            "policyDefinitions": []
        })
        .to_string(),
    );
    fs.insert(
        "assignment.alz_policy_assignment.json",
        json!({
            "name": "assignment",
            "displayName": "Assignment",
            "description": "targets a policy set definition",
            "policyDefinitionId": "initiative"
        })
        .to_string(),
    );
    fs.insert(
        "alz_policy_default_values.json",
        json!([{
            "defaultName": "missing-param",
            "description": "names a parameter absent from the set definition",
            "assignments": [{"assignmentName": "assignment", "parameterNames": ["does-not-exist"]}]
        }])
        .to_string(),
    );
    fs
}

#[test]
fn defaults_check_flags_missing_parameter_on_a_policy_set_definition() {
    let lib = AlzLib::init(&[library_with_set_definition_default()], ".alzlib").unwrap();
    let errors = DefaultsCheck.run(&lib);
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], alzlib_core::Error::ParameterNotOnDefinition { .. }));
}

#[test]
fn all_architectures_buildable_passes_for_a_well_formed_library() {
    let lib = AlzLib::init(&[library_with_one_architecture()], ".alzlib").unwrap();
    let errors = AllArchitecturesBuildable.run(&lib);
    assert!(errors.is_empty());
}
