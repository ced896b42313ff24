//! `resolve(archetype, override) = (base ∪ add) ∖ remove`, applied
//! independently per reference class, and stable under repeated application.

use alzlib_core::assets::{Archetype, ArchetypeOverride};
use proptest::collection::btree_set;
use proptest::prelude::*;

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-f]{1,3}"
}

fn set_strategy() -> impl Strategy<Value = std::collections::BTreeSet<String>> {
    btree_set(name_strategy(), 0..6)
}

proptest! {
    #[test]
    fn override_result_is_union_then_difference(
        base_policies in set_strategy(),
        add in set_strategy(),
        remove in set_strategy(),
    ) {
        let base = Archetype {
            name: "base".to_string(),
            policy_definitions: base_policies.clone(),
            ..Default::default()
        };
        let over = ArchetypeOverride {
            name: "derived".to_string(),
            base_archetype: "base".to_string(),
            policy_definitions_add: add.clone(),
            policy_definitions_remove: remove.clone(),
            ..Default::default()
        };

        let (resolved, _diff) = over.apply(&base);

        let expected: std::collections::BTreeSet<String> = base_policies
            .union(&add)
            .cloned()
            .collect::<std::collections::BTreeSet<_>>()
            .difference(&remove)
            .cloned()
            .collect();

        prop_assert_eq!(resolved.policy_definitions, expected);
    }

    #[test]
    fn override_apply_is_idempotent(
        base_policies in set_strategy(),
        add in set_strategy(),
        remove in set_strategy(),
    ) {
        let base = Archetype {
            name: "base".to_string(),
            policy_definitions: base_policies,
            ..Default::default()
        };
        let over = ArchetypeOverride {
            name: "derived".to_string(),
            base_archetype: "base".to_string(),
            policy_definitions_add: add,
            policy_definitions_remove: remove,
            ..Default::default()
        };

        let (first, _) = over.apply(&base);
        let (second, _) = over.apply(&base);
        prop_assert_eq!(first, second);
    }
}
