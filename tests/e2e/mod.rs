//! End-to-end scenario tests covering constraint resolution, prerelease
//! strictness, mix rejection, archetype override, hierarchy resolution
//! with an external parent, and role-assignment inference.

mod scenario_constraint_wildcard;
mod scenario_prerelease_strictness;
mod scenario_archetype_override;
mod scenario_role_assignment_inference;
