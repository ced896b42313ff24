//! For every sequence of adds a versioned collection accepts, it ends up in
//! exactly one of its two populated modes, never both and never neither
//! once something has been added.

use alzlib_core::assets::PolicyDefinition;
use alzlib_core::VersionedCollection;
use proptest::prelude::*;
use serde_json::json;

fn policy_definition(name: &str, version: Option<&str>) -> PolicyDefinition {
    let mut doc = json!({"name": name, "policyRule": {"then": {"effect": "deny"}}});
    if let Some(v) = version {
        doc["version"] = json!(v);
    }
    let mut def: PolicyDefinition = serde_json::from_value(doc).unwrap();
    def.validate().unwrap();
    def
}

proptest! {
    #[test]
    fn adding_only_versioned_entries_never_produces_a_versionless_collection(
        count in 1usize..6,
    ) {
        let mut collection: VersionedCollection<PolicyDefinition> = VersionedCollection::new();
        for i in 0..count {
            let version = format!("{i}.0.0");
            let _ = collection.add(policy_definition("p", Some(&version)), true);
        }
        prop_assert!(collection.get(None).is_ok());
        // A constraint naming a major line with nothing added under it
        // must fail cleanly rather than falling back to a versionless read.
        prop_assert!(collection.get(Some("999.0.*")).is_err());
    }

    #[test]
    fn mixing_versionless_after_versioned_is_always_rejected(
        version in "[1-9]\\.0\\.0",
    ) {
        let mut collection: VersionedCollection<PolicyDefinition> = VersionedCollection::new();
        collection.add(policy_definition("p", Some(&version)), true).unwrap();
        let err = collection.add(policy_definition("p", None), true).unwrap_err();
        let is_mix_error = matches!(err, alzlib_core::Error::MixVersionedAndVersionless { .. });
        prop_assert!(is_mix_error);
    }
}
