//! Management-group hierarchy resolution (C9): instantiates an architecture
//! into a tree of [`HierarchyNode`](node::HierarchyNode)s with archetypes
//! applied, assignments parameterized and rewritten to scope, and
//! identity/role-assignment requirements inferred.

pub mod build;
pub mod checker;
pub mod identity;
pub mod node;
pub mod topology;

pub use build::build;
pub use checker::AllArchitecturesBuildable;
pub use node::{Hierarchy, HierarchyNode, RoleAssignment};
pub use topology::topological_order;
