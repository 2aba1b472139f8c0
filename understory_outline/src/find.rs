// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only lookups over a snapshot.
//!
//! All lookups are depth-first and stop at the first match. Ids are unique
//! within a snapshot, so no tie-break is needed.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::types::{NodeId, Tree, TreeNode};

/// Find a node by id.
pub fn find_node_by_id<'a>(tree: &'a Tree, id: &NodeId) -> Option<&'a Arc<TreeNode>> {
    tree.iter().find(|n| n.id == *id)
}

/// Names from the root down to `id`, inclusive. Empty if `id` is absent.
pub fn path_to(tree: &Tree, id: &NodeId) -> Vec<String> {
    node_path(tree, id)
        .into_iter()
        .map(|n| n.name.clone())
        .collect()
}

/// Ids from the root down to `id`, inclusive. Empty if `id` is absent.
pub fn id_path_to(tree: &Tree, id: &NodeId) -> Vec<NodeId> {
    node_path(tree, id).into_iter().map(|n| n.id.clone()).collect()
}

/// The node whose children contain `id`. `None` for roots and absent ids.
pub fn parent_of<'a>(tree: &'a Tree, id: &NodeId) -> Option<&'a Arc<TreeNode>> {
    tree.iter()
        .find(|n| n.children().iter().any(|c| c.id == *id))
}

/// Returns true if `candidate` is strictly below `ancestor`.
///
/// Compares id paths, so duplicate names never alias. A node is not its own
/// descendant.
pub fn is_descendant_of(tree: &Tree, candidate: &NodeId, ancestor: &NodeId) -> bool {
    if candidate == ancestor {
        return false;
    }
    let path = id_path_to(tree, candidate);
    path.split_last()
        .is_some_and(|(_, above)| above.contains(ancestor))
}

/// Ids of every node below `node`, pre-order, excluding `node` itself.
pub fn descendant_ids(node: &TreeNode) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack: Vec<&Arc<TreeNode>> = node.children().iter().rev().collect();
    while let Some(n) = stack.pop() {
        out.push(n.id.clone());
        stack.extend(n.children().iter().rev());
    }
    out
}

fn node_path<'a>(tree: &'a Tree, id: &NodeId) -> Vec<&'a TreeNode> {
    let mut stack = Vec::new();
    if descend(&tree.roots, id, &mut stack) {
        stack
    } else {
        Vec::new()
    }
}

fn descend<'a>(nodes: &'a [Arc<TreeNode>], id: &NodeId, stack: &mut Vec<&'a TreeNode>) -> bool {
    for node in nodes {
        stack.push(node);
        if node.id == *id || descend(node.children(), id, stack) {
            return true;
        }
        stack.pop();
    }
    false
}
