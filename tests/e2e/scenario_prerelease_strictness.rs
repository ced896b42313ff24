//! A release and its prerelease counterpart are distinct versioned entries;
//! a constraint's prerelease suffix must match exactly, never loosely.

use alzlib::AlzLib;
use alzlib_core::MemoryFilesystem;
use serde_json::json;

fn release_and_prerelease_library() -> MemoryFilesystem {
    let mut fs = MemoryFilesystem::new();
    fs.insert(
        "p.1.0.0.alz_policy_definition.json",
        json!({"name": "p", "version": "1.0.0", "policyRule": {"then": {"effect": "deny"}}})
            .to_string(),
    );
    fs.insert(
        "p.1.0.0-alpha.alz_policy_definition.json",
        json!({"name": "p", "version": "1.0.0-alpha", "policyRule": {"then": {"effect": "deny"}}})
            .to_string(),
    );
    fs
}

#[test]
fn prerelease_suffix_must_match_exactly() {
    let lib = AlzLib::init(&[release_and_prerelease_library()], ".alzlib").unwrap();

    assert_eq!(lib.policy_definition("p", Some("1.0.*")).unwrap().version.as_deref(), Some("1.0.0"));
    assert_eq!(
        lib.policy_definition("p", Some("1.0.*-alpha")).unwrap().version.as_deref(),
        Some("1.0.0-alpha")
    );

    // "1.0.0-beta" never matches a constraint pinned to "-alpha", even
    // though both are prereleases of the same release line.
    let err = lib.policy_definition("p", Some("1.0.*-beta")).unwrap_err();
    assert!(matches!(err, alzlib_core::Error::NoVersionMatchesConstraint { .. }));
}
