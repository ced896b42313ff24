//! A collection holding two versions of the same policy definition resolves
//! wildcarded constraints to the highest matching version, and a
//! constraint naming a disjoint major line match nothing.

use alzlib::AlzLib;
use alzlib_core::MemoryFilesystem;
use serde_json::json;

fn two_version_library() -> MemoryFilesystem {
    let mut fs = MemoryFilesystem::new();
    fs.insert(
        "p.1.0.0.alz_policy_definition.json",
        json!({"name": "p", "version": "1.0.0", "policyRule": {"then": {"effect": "deny"}}})
            .to_string(),
    );
    fs.insert(
        "p.2.0.0.alz_policy_definition.json",
        json!({"name": "p", "version": "2.0.0", "policyRule": {"then": {"effect": "deny"}}})
            .to_string(),
    );
    fs
}

#[test]
fn wildcard_constraints_resolve_to_the_highest_matching_version() {
    let lib = AlzLib::init(&[two_version_library()], ".alzlib").unwrap();

    assert_eq!(lib.policy_definition("p", Some("1.0.*")).unwrap().version.as_deref(), Some("1.0.0"));
    assert_eq!(lib.policy_definition("p", Some("1.*.*")).unwrap().version.as_deref(), Some("1.0.0"));
    assert_eq!(lib.policy_definition("p", None).unwrap().version.as_deref(), Some("2.0.0"));

    let err = lib.policy_definition("p", Some("3.0.*")).unwrap_err();
    assert!(matches!(err, alzlib_core::Error::NoVersionMatchesConstraint { .. }));
}
