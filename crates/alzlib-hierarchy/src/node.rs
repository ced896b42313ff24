use std::collections::{BTreeMap, BTreeSet};

use alzlib_core::{Identity, PolicyAssignment, PolicyDefinition, PolicySetDefinition, RoleDefinition};

/// A single role-assignment obligation inferred for a node's managed
/// identity (§4.9). `principal` stands in for the node's identity itself —
/// the actual principal id only exists once the identity is deployed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RoleAssignment {
    pub assignment_name: String,
    pub principal: String,
    pub role: String,
    pub scope: String,
}

/// One management group in a resolved hierarchy, with every asset it needs
/// copied locally and every assignment fully parameterized (§4.9).
#[derive(Debug, Clone)]
pub struct HierarchyNode {
    pub id: String,
    pub display_name: String,
    pub parent_id: Option<String>,
    pub external_parent_id: Option<String>,
    pub exists: bool,
    pub archetypes: BTreeSet<String>,
    pub local_policy_definitions: BTreeMap<String, PolicyDefinition>,
    pub local_policy_set_definitions: BTreeMap<String, PolicySetDefinition>,
    pub local_role_definitions: BTreeMap<String, RoleDefinition>,
    pub local_assignments: BTreeMap<String, PolicyAssignment>,
    pub identities: BTreeMap<String, Identity>,
    pub role_assignments: Vec<RoleAssignment>,
}

impl HierarchyNode {
    pub(crate) fn new(id: String, display_name: String, parent_id: Option<String>, exists: bool) -> Self {
        Self {
            id,
            display_name,
            parent_id,
            external_parent_id: None,
            exists,
            archetypes: BTreeSet::new(),
            local_policy_definitions: BTreeMap::new(),
            local_policy_set_definitions: BTreeMap::new(),
            local_role_definitions: BTreeMap::new(),
            local_assignments: BTreeMap::new(),
            identities: BTreeMap::new(),
            role_assignments: Vec::new(),
        }
    }
}

/// A fully resolved management-group tree for one architecture (§4.9).
#[derive(Debug, Clone)]
pub struct Hierarchy {
    pub architecture_name: String,
    pub root_id: String,
    pub nodes: BTreeMap<String, HierarchyNode>,
}

impl Hierarchy {
    pub fn node(&self, id: &str) -> Option<&HierarchyNode> {
        self.nodes.get(id)
    }

    pub fn root(&self) -> &HierarchyNode {
        self.nodes.get(&self.root_id).expect("root always present after build")
    }
}
