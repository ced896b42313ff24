use std::collections::BTreeMap;

use alzlib_core::{DefaultPolicyValue, PolicyAssignment};
use serde_json::Value;

/// Copies caller-supplied values into the named assignments' parameters
/// (C8, §4.8). Unknown default names or assignment targets are skipped:
/// enforcing that a parameter actually exists on the referenced definition
/// is the hierarchy resolver's job (§4.9), not the binder's.
pub fn bind_defaults(
    defaults: &BTreeMap<String, DefaultPolicyValue>,
    values: &BTreeMap<String, Value>,
    local_assignments: &mut BTreeMap<String, PolicyAssignment>,
) {
    for (default_name, value) in values {
        let Some(default) = defaults.get(default_name) else {
            continue;
        };
        for target in &default.assignments {
            let Some(assignment) = local_assignments.get_mut(&target.assignment_name) else {
                continue;
            };
            for parameter_name in &target.parameter_names {
                assignment.parameters.insert(parameter_name.clone(), value.clone());
            }
        }
    }
}
