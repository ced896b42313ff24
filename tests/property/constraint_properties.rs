//! A constraint's major (and, when pinned, minor) must equal the version's
//! exactly, and the prerelease suffix must match exactly — no patch
//! constraining is possible since the grammar never accepts one.

use alzlib_core::{Constraint, SemanticVersion};
use proptest::prelude::*;

fn version_strategy() -> impl Strategy<Value = (u32, u32, u32, Option<String>)> {
    (
        0u32..5,
        0u32..5,
        0u32..5,
        proptest::option::of("[a-z]{1,6}"),
    )
}

proptest! {
    #[test]
    fn pinned_minor_constraint_matches_only_that_minor(
        (major, minor, patch, pre) in version_strategy(),
        other_minor in 0u32..5,
    ) {
        let version = match &pre {
            Some(p) => SemanticVersion::new(major, minor, patch).with_prerelease(p.clone()),
            None => SemanticVersion::new(major, minor, patch),
        };
        let constraint_str = format!("{major}.{minor}.*");
        let constraint = Constraint::parse(&constraint_str).unwrap();

        // The grammar requires an exact prerelease match; a bare `M.m.*`
        // constraint has no prerelease suffix, so it only matches a
        // release version.
        prop_assert_eq!(constraint.matches(&version), pre.is_none());

        if other_minor != minor {
            let mismatched = SemanticVersion::new(major, other_minor, patch);
            prop_assert!(!constraint.matches(&mismatched));
        }
    }

    #[test]
    fn wildcard_minor_constraint_ignores_minor_but_not_major(
        major in 0u32..5,
        minor in 0u32..5,
        patch in 0u32..5,
        other_major in 0u32..5,
    ) {
        let constraint = Constraint::parse(&format!("{major}.*.*")).unwrap();
        let version = SemanticVersion::new(major, minor, patch);
        prop_assert!(constraint.matches(&version));

        if other_major != major {
            let mismatched = SemanticVersion::new(other_major, minor, patch);
            prop_assert!(!constraint.matches(&mismatched));
        }
    }

    #[test]
    fn prerelease_suffix_must_match_exactly(
        major in 0u32..5, minor in 0u32..5, patch in 0u32..5,
        pre in "[a-z]{1,6}", other_pre in "[a-z]{1,6}",
    ) {
        let constraint = Constraint::parse(&format!("{major}.{minor}.*-{pre}")).unwrap();
        let matching = SemanticVersion::new(major, minor, patch).with_prerelease(pre.clone());
        prop_assert!(constraint.matches(&matching));

        if other_pre != pre {
            let mismatched = SemanticVersion::new(major, minor, patch).with_prerelease(other_pre);
            prop_assert!(!constraint.matches(&mismatched));
        }
    }
}
