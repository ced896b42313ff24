use std::collections::{BTreeMap, HashSet};

use alzlib_core::{Architecture, Error, ManagementGroupNode, Result};

/// Orders an architecture's management groups parent-before-child (§4.9
/// step 1). `Architecture::validate` already guarantees exactly one root.
pub fn topological_order(architecture: &Architecture) -> Result<Vec<&ManagementGroupNode>> {
    let by_id: BTreeMap<&str, &ManagementGroupNode> = architecture
        .management_groups
        .iter()
        .map(|n| (n.id.as_str(), n))
        .collect();

    let mut children: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for node in &architecture.management_groups {
        if let Some(parent_id) = &node.parent_id {
            if !by_id.contains_key(parent_id.as_str()) {
                return Err(Error::UnknownParentManagementGroup {
                    id: node.id.clone(),
                    parent_id: parent_id.clone(),
                });
            }
            children.entry(parent_id.as_str()).or_default().push(node.id.as_str());
        }
    }

    let root = architecture
        .root()
        .expect("Architecture::validate guarantees exactly one root");

    let mut order = Vec::with_capacity(architecture.management_groups.len());
    let mut visited = HashSet::new();
    let mut queue = std::collections::VecDeque::new();
    queue.push_back(root.id.as_str());
    visited.insert(root.id.as_str());

    while let Some(id) = queue.pop_front() {
        order.push(by_id[id]);
        if let Some(kids) = children.get(id) {
            for kid in kids {
                if visited.insert(*kid) {
                    queue.push_back(kid);
                }
            }
        }
    }

    if order.len() < architecture.management_groups.len() {
        let unreached = architecture
            .management_groups
            .iter()
            .find(|n| !visited.contains(n.id.as_str()))
            .expect("order shorter than input implies an unreached node");
        return Err(Error::ParentCycle {
            chain: reconstruct_cycle(unreached, &by_id),
        });
    }

    Ok(order)
}

/// Follows parent pointers from `start` until an id repeats, producing the
/// cycle for the error message.
fn reconstruct_cycle(start: &ManagementGroupNode, by_id: &BTreeMap<&str, &ManagementGroupNode>) -> Vec<String> {
    let mut chain = vec![start.id.clone()];
    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(start.id.as_str());
    let mut current = start;
    loop {
        let Some(parent_id) = &current.parent_id else {
            break;
        };
        chain.push(parent_id.clone());
        if !seen.insert(parent_id.as_str()) {
            break;
        }
        current = by_id[parent_id.as_str()];
    }
    chain
}
