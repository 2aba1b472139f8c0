// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure structural edits.
//!
//! Every function takes a snapshot by reference and returns a new one. Only the
//! nodes on the root→target path are rebuilt; all other subtrees are shared with
//! the input via `Arc`. An id that is not in the snapshot makes the edit a no-op
//! and the returned snapshot compares equal to the input.

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use tracing::{debug, trace};

use crate::find::{find_node_by_id, is_descendant_of};
use crate::ids::IdSource;
use crate::types::{DropPosition, NodeFlags, NodeId, NodeKind, Tree, TreeNode};

/// Why a move was refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The dragged node is not in the snapshot.
    #[error("source node `{0}` not found")]
    SourceNotFound(NodeId),
    /// The drop target is not in the snapshot.
    #[error("target node `{0}` not found")]
    TargetNotFound(NodeId),
    /// Source and target are the same node.
    #[error("cannot move `{0}` relative to itself")]
    SameNode(NodeId),
    /// The target lies below the source, so the move would create a cycle.
    #[error("`{target}` is a descendant of `{dragged}`")]
    IntoDescendant {
        /// Dragged node.
        dragged: NodeId,
        /// Drop target.
        target: NodeId,
    },
    /// An inside drop onto a kind that cannot hold children.
    #[error("`{0}` cannot contain children")]
    NotAContainer(NodeId),
}

/// Result of [`create_node`].
#[derive(Clone, Debug)]
pub struct Created {
    /// The node as inserted.
    pub node: Arc<TreeNode>,
    /// Snapshot containing the node.
    pub tree: Tree,
}

/// Result of [`move_node`].
#[derive(Clone, Debug)]
pub struct Moved {
    /// The new snapshot, or a clone of the input when the move was rejected.
    pub tree: Tree,
    /// The relocated node with its settled `parent_id`, or `None` if nothing moved.
    pub moved: Option<Arc<TreeNode>>,
}

/// Set or clear [`NodeFlags::EXPANDED`] on one node.
pub fn set_expanded(tree: &Tree, id: &NodeId, expanded: bool) -> Tree {
    update_node(tree, id, |n| n.flags.set(NodeFlags::EXPANDED, expanded))
}

/// Highlight `id`.
///
/// Unless `allow_multi` is set, every other highlighted node is cleared. With
/// `allow_multi` other highlights are left as they are.
pub fn set_highlighted(tree: &Tree, id: &NodeId, allow_multi: bool) -> Tree {
    if find_node_by_id(tree, id).is_none() {
        return tree.clone();
    }
    let mut roots = tree.roots.clone();
    if !allow_multi {
        let stale: Vec<NodeId> = tree
            .iter()
            .filter(|n| n.is_highlighted() && n.id != *id)
            .map(|n| n.id.clone())
            .collect();
        for other in &stale {
            if let Some(n) = node_mut(&mut roots, other) {
                n.flags.remove(NodeFlags::HIGHLIGHTED);
            }
        }
    }
    if let Some(n) = node_mut(&mut roots, id) {
        n.flags.insert(NodeFlags::HIGHLIGHTED);
    }
    Tree { roots }
}

/// Flip the checkbox of one node. Siblings, ancestors, and descendants are untouched.
pub fn toggle_checked(tree: &Tree, id: &NodeId) -> Tree {
    update_node(tree, id, |n| n.flags.toggle(NodeFlags::SELECTED))
}

/// Insert a new node as the last child of `parent`, or as the last root.
///
/// Draws ids from `ids` until one is unused, giving up after one more draw than
/// there are distinct ids. Folders get an empty child list. The parent is expanded so the node
/// is visible. Returns `None` if `parent` is given but absent or is a kind that
/// cannot hold children, or if no unused id was drawn.
pub fn create_node(
    tree: &Tree,
    parent: Option<&NodeId>,
    name: impl Into<String>,
    kind: NodeKind,
    ids: &mut impl IdSource,
) -> Option<Created> {
    if let Some(parent_id) = parent
        && !find_node_by_id(tree, parent_id).is_some_and(|p| p.kind.is_container())
    {
        trace!(parent = %parent_id, "create refused: no container parent");
        return None;
    }
    let taken: BTreeSet<&NodeId> = tree.iter().map(|n| &n.id).collect();
    let Some(id) = (0..=taken.len())
        .map(|_| ids.next_id())
        .find(|candidate| !taken.contains(candidate))
    else {
        trace!(draws = taken.len() + 1, "create refused: id source exhausted");
        return None;
    };
    let mut node = TreeNode::new(id, name, kind);
    node.parent_id = parent.cloned();
    let node = Arc::new(node);

    let mut roots = tree.roots.clone();
    match parent {
        Some(parent_id) => {
            let parent_node = node_mut(&mut roots, parent_id)?;
            parent_node
                .children
                .get_or_insert_with(Vec::new)
                .push(node.clone());
            parent_node.flags.insert(NodeFlags::EXPANDED);
        }
        None => roots.push(node.clone()),
    }
    debug!(id = %node.id, parent = ?parent.map(NodeId::as_str), ?kind, "created node");
    Some(Created {
        node,
        tree: Tree { roots },
    })
}

/// Replace the name of one node. Callers reject blank names beforehand.
pub fn rename_node(tree: &Tree, id: &NodeId, name: impl Into<String>) -> Tree {
    let name = name.into();
    update_node(tree, id, |n| n.name = name)
}

/// Remove a node and, with it, its whole subtree.
pub fn delete_node(tree: &Tree, id: &NodeId) -> Tree {
    let mut roots = tree.roots.clone();
    let Some(path) = index_path(&roots, id) else {
        return tree.clone();
    };
    if let Some((&at, parent)) = path.split_last()
        && let Some(siblings) = siblings_mut(&mut roots, parent)
    {
        siblings.remove(at);
        debug!(%id, "deleted node");
    }
    Tree { roots }
}

/// Check whether `source` may be dropped at `position` relative to `target`.
///
/// This is the same predicate [`move_node`] applies, so a hover indicator and
/// the eventual commit cannot disagree.
pub fn check_move(
    tree: &Tree,
    source: &NodeId,
    target: &NodeId,
    position: DropPosition,
) -> Result<(), MoveError> {
    if find_node_by_id(tree, source).is_none() {
        return Err(MoveError::SourceNotFound(source.clone()));
    }
    let Some(target_node) = find_node_by_id(tree, target) else {
        return Err(MoveError::TargetNotFound(target.clone()));
    };
    if source == target {
        return Err(MoveError::SameNode(source.clone()));
    }
    if is_descendant_of(tree, target, source) {
        return Err(MoveError::IntoDescendant {
            dragged: source.clone(),
            target: target.clone(),
        });
    }
    if position == DropPosition::Inside && !target_node.kind.is_container() {
        return Err(MoveError::NotAContainer(target.clone()));
    }
    Ok(())
}

/// Relocate `source` relative to `target`.
///
/// The source is detached first, then the target is re-resolved in the
/// detached snapshot so sibling indices are current:
/// - [`Inside`](DropPosition::Inside) appends to the target's children and
///   expands the target.
/// - [`Above`](DropPosition::Above) / [`Below`](DropPosition::Below) splice
///   before or after the target among its siblings, adopting its parent.
///
/// Rejected moves (see [`MoveError`]) return the input snapshot and `moved: None`.
pub fn move_node(tree: &Tree, source: &NodeId, target: &NodeId, position: DropPosition) -> Moved {
    if let Err(err) = check_move(tree, source, target, position) {
        trace!(%source, %target, ?position, %err, "move rejected");
        return Moved {
            tree: tree.clone(),
            moved: None,
        };
    }
    match relocate(tree, source, target, position) {
        Some((roots, moved)) => {
            debug!(%source, %target, ?position, parent = ?moved.parent_id, "moved node");
            Moved {
                tree: Tree { roots },
                moved: Some(moved),
            }
        }
        None => Moved {
            tree: tree.clone(),
            moved: None,
        },
    }
}

fn relocate(
    tree: &Tree,
    source: &NodeId,
    target: &NodeId,
    position: DropPosition,
) -> Option<(Vec<Arc<TreeNode>>, Arc<TreeNode>)> {
    let mut roots = tree.roots.clone();

    let source_path = index_path(&roots, source)?;
    let (&source_at, source_parent) = source_path.split_last()?;
    let mut detached = siblings_mut(&mut roots, source_parent)?.remove(source_at);
    Arc::make_mut(&mut detached).parent_id = None;

    let target_path = index_path(&roots, target)?;
    match position {
        DropPosition::Inside => {
            let target = node_at_mut(&mut roots, &target_path)?;
            Arc::make_mut(&mut detached).parent_id = Some(target.id.clone());
            target
                .children
                .get_or_insert_with(Vec::new)
                .push(detached.clone());
            target.flags.insert(NodeFlags::EXPANDED);
        }
        DropPosition::Above | DropPosition::Below => {
            let (&target_at, target_parent) = target_path.split_last()?;
            let parent_id = if target_parent.is_empty() {
                None
            } else {
                Some(node_at(&roots, target_parent)?.id.clone())
            };
            Arc::make_mut(&mut detached).parent_id = parent_id;
            let at = match position {
                DropPosition::Above => target_at,
                _ => target_at + 1,
            };
            siblings_mut(&mut roots, target_parent)?.insert(at, detached.clone());
        }
    }
    Some((roots, detached))
}

/// Make exactly the nodes whose ids are in `expanded` expanded.
///
/// Used to re-apply a retained expansion set to a freshly supplied snapshot.
pub fn set_expanded_from<'a>(tree: &Tree, expanded: impl IntoIterator<Item = &'a NodeId>) -> Tree {
    sync_flag(tree, NodeFlags::EXPANDED, expanded)
}

/// Make exactly the nodes whose ids are in `checked` checkbox-selected.
pub fn set_checked_from<'a>(tree: &Tree, checked: impl IntoIterator<Item = &'a NodeId>) -> Tree {
    sync_flag(tree, NodeFlags::SELECTED, checked)
}

/// Ids of every checkbox-selected node, pre-order.
pub fn checked_ids(tree: &Tree) -> Vec<NodeId> {
    tree.iter()
        .filter(|n| n.is_selected())
        .map(|n| n.id.clone())
        .collect()
}

fn sync_flag<'a>(tree: &Tree, flag: NodeFlags, ids: impl IntoIterator<Item = &'a NodeId>) -> Tree {
    let wanted: Vec<&NodeId> = ids.into_iter().collect();
    let changes: Vec<NodeId> = tree
        .iter()
        .filter(|n| n.flags.contains(flag) != wanted.contains(&&n.id))
        .map(|n| n.id.clone())
        .collect();
    let mut roots = tree.roots.clone();
    for id in &changes {
        if let Some(n) = node_mut(&mut roots, id) {
            n.flags.toggle(flag);
        }
    }
    Tree { roots }
}

fn update_node(tree: &Tree, id: &NodeId, f: impl FnOnce(&mut TreeNode)) -> Tree {
    let mut roots = tree.roots.clone();
    match node_mut(&mut roots, id) {
        Some(node) => {
            f(node);
            Tree { roots }
        }
        None => tree.clone(),
    }
}

// --- path helpers ---

/// Child indices from the root sequence down to `id`.
fn index_path(nodes: &[Arc<TreeNode>], id: &NodeId) -> Option<Vec<usize>> {
    for (i, node) in nodes.iter().enumerate() {
        if node.id == *id {
            return Some(alloc::vec![i]);
        }
        if let Some(mut rest) = index_path(node.children(), id) {
            rest.insert(0, i);
            return Some(rest);
        }
    }
    None
}

fn node_at<'a>(roots: &'a [Arc<TreeNode>], path: &[usize]) -> Option<&'a Arc<TreeNode>> {
    let (&first, rest) = path.split_first()?;
    let node = roots.get(first)?;
    if rest.is_empty() {
        Some(node)
    } else {
        node_at(node.children(), rest)
    }
}

/// The sibling list addressed by a parent path; the root sequence for `[]`.
/// Copies nodes along the path that are shared with other snapshots.
fn siblings_mut<'a>(
    roots: &'a mut Vec<Arc<TreeNode>>,
    parent_path: &[usize],
) -> Option<&'a mut Vec<Arc<TreeNode>>> {
    match parent_path.split_first() {
        None => Some(roots),
        Some((&first, rest)) => {
            let node = Arc::make_mut(roots.get_mut(first)?);
            siblings_mut(node.children.as_mut()?, rest)
        }
    }
}

fn node_at_mut<'a>(roots: &'a mut Vec<Arc<TreeNode>>, path: &[usize]) -> Option<&'a mut TreeNode> {
    let (&at, parent) = path.split_last()?;
    siblings_mut(roots, parent)?.get_mut(at).map(Arc::make_mut)
}

fn node_mut<'a>(roots: &'a mut Vec<Arc<TreeNode>>, id: &NodeId) -> Option<&'a mut TreeNode> {
    let path = index_path(roots, id)?;
    node_at_mut(roots, &path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::find::{descendant_ids, parent_of, path_to};
    use crate::ids::SequentialIds;
    use alloc::vec;

    fn id(s: &str) -> NodeId {
        NodeId::from(s)
    }

    fn child_ids(tree: &Tree, parent: &str) -> Vec<String> {
        find_node_by_id(tree, &id(parent))
            .unwrap()
            .children()
            .iter()
            .map(|c| String::from(c.id.as_str()))
            .collect()
    }

    fn root_ids(tree: &Tree) -> Vec<&str> {
        tree.roots().iter().map(|n| n.id.as_str()).collect()
    }

    /// root1{folder1{doc1, doc2}, a, b, c, file1}, root2(default)
    fn sample() -> Tree {
        Tree::from_roots([
            TreeNode::new("root1", "Root", NodeKind::Folder).with_children([
                TreeNode::new("folder1", "Folder", NodeKind::Folder).with_children([
                    TreeNode::new("doc1", "Doc 1", NodeKind::File),
                    TreeNode::new("doc2", "Doc 2", NodeKind::File),
                ]),
                TreeNode::new("a", "A", NodeKind::File),
                TreeNode::new("b", "B", NodeKind::File),
                TreeNode::new("c", "C", NodeKind::File),
                TreeNode::new("file1", "File", NodeKind::File),
            ]),
            TreeNode::new("root2", "Other", NodeKind::Default),
        ])
    }

    #[test]
    fn set_expanded_touches_only_target() {
        let tree = sample();
        let next = set_expanded(&tree, &id("folder1"), true);
        assert!(find_node_by_id(&next, &id("folder1")).unwrap().is_expanded());
        assert!(!find_node_by_id(&next, &id("root1")).unwrap().is_expanded());
        // Untouched roots are shared.
        assert!(Arc::ptr_eq(&tree.roots()[1], &next.roots()[1]));
        let collapsed = set_expanded(&next, &id("folder1"), false);
        assert_eq!(collapsed, tree);
    }

    #[test]
    fn unknown_ids_are_noops() {
        let tree = sample();
        let ghost = id("ghost");
        assert_eq!(set_expanded(&tree, &ghost, true), tree);
        assert_eq!(set_highlighted(&tree, &ghost, false), tree);
        assert_eq!(toggle_checked(&tree, &ghost), tree);
        assert_eq!(rename_node(&tree, &ghost, "x"), tree);
        assert_eq!(delete_node(&tree, &ghost), tree);
        let mut ids = SequentialIds::default();
        assert!(create_node(&tree, Some(&ghost), "x", NodeKind::File, &mut ids).is_none());
    }

    #[test]
    fn single_highlight_clears_others() {
        let tree = set_highlighted(&sample(), &id("a"), false);
        let tree = set_highlighted(&tree, &id("doc1"), false);
        let lit: Vec<&str> = tree
            .iter()
            .filter(|n| n.is_highlighted())
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(lit, vec!["doc1"]);
    }

    #[test]
    fn multi_highlight_keeps_others() {
        let tree = set_highlighted(&sample(), &id("a"), true);
        let tree = set_highlighted(&tree, &id("b"), true);
        assert!(find_node_by_id(&tree, &id("a")).unwrap().is_highlighted());
        assert!(find_node_by_id(&tree, &id("b")).unwrap().is_highlighted());
    }

    #[test]
    fn highlight_and_checkbox_are_independent() {
        let tree = toggle_checked(&sample(), &id("a"));
        let tree = set_highlighted(&tree, &id("b"), false);
        let a = find_node_by_id(&tree, &id("a")).unwrap();
        let b = find_node_by_id(&tree, &id("b")).unwrap();
        assert!(a.is_selected() && !a.is_highlighted());
        assert!(b.is_highlighted() && !b.is_selected());
    }

    #[test]
    fn toggle_checked_does_not_cascade() {
        let tree = toggle_checked(&sample(), &id("folder1"));
        assert_eq!(checked_ids(&tree), vec![id("folder1")]);
        let tree = toggle_checked(&tree, &id("folder1"));
        assert!(checked_ids(&tree).is_empty());
    }

    #[test]
    fn checkbox_toggle_leaves_expansion_alone() {
        let tree = set_expanded(&sample(), &id("folder1"), true);
        let toggled = toggle_checked(&tree, &id("folder1"));
        let toggled = toggle_checked(&toggled, &id("doc1"));
        for (before, after) in tree.iter().zip(toggled.iter()) {
            assert_eq!(before.is_expanded(), after.is_expanded(), "{}", before.id);
        }
    }

    #[test]
    fn create_under_empty_root() {
        let mut ids = SequentialIds::default();
        let created = create_node(&Tree::new(), None, "Docs", NodeKind::Folder, &mut ids).unwrap();
        assert_eq!(created.tree.roots().len(), 1);
        let node = &created.tree.roots()[0];
        assert_eq!(node.name, "Docs");
        assert_eq!(node.kind, NodeKind::Folder);
        assert_eq!(node.children, Some(vec![]));
        assert!(!node.is_expanded());
        assert!(!node.id.as_str().is_empty());
        assert_eq!(node.parent_id, None);
        assert_eq!(&created.node, node);
    }

    #[test]
    fn create_appends_and_expands_parent() {
        let mut ids = SequentialIds::default();
        let created =
            create_node(&sample(), Some(&id("folder1")), "Doc 3", NodeKind::File, &mut ids)
                .unwrap();
        let folder = find_node_by_id(&created.tree, &id("folder1")).unwrap();
        assert!(folder.is_expanded());
        assert_eq!(folder.children().last().unwrap().id, created.node.id);
        assert_eq!(created.node.parent_id, Some(id("folder1")));
        assert_eq!(created.node.children, None);
    }

    #[test]
    fn create_skips_ids_already_in_use() {
        let tree = Tree::from_roots([TreeNode::new("node-1", "Taken", NodeKind::File)]);
        let mut ids = SequentialIds::default();
        let created = create_node(&tree, None, "New", NodeKind::File, &mut ids).unwrap();
        assert_eq!(created.node.id, id("node-2"));
    }

    #[test]
    fn create_inside_childless_default_node_grows_children() {
        let mut ids = SequentialIds::default();
        let created =
            create_node(&sample(), Some(&id("root2")), "Child", NodeKind::File, &mut ids).unwrap();
        assert_eq!(
            child_ids(&created.tree, "root2"),
            vec![String::from(created.node.id.as_str())]
        );
        assert_eq!(created.node.parent_id, Some(id("root2")));
    }

    #[test]
    fn create_refuses_leaf_kinds_as_parent() {
        let mut ids = SequentialIds::default();
        for kind in [NodeKind::File, NodeKind::Device, NodeKind::Layout, NodeKind::Custom] {
            let tree = Tree::from_roots([TreeNode::new("leaf", "Leaf", kind)]);
            assert!(create_node(&tree, Some(&id("leaf")), "Child", NodeKind::File, &mut ids).is_none());
        }
        assert!(create_node(&sample(), Some(&id("doc1")), "Child", NodeKind::File, &mut ids).is_none());
        assert!(find_node_by_id(&sample(), &id("doc1")).unwrap().children.is_none());
    }

    #[test]
    fn create_gives_up_when_every_id_collides() {
        let tree = sample();
        let mut draws = 0_usize;
        let mut taken = || {
            draws += 1;
            id("doc1")
        };
        assert!(create_node(&tree, None, "New", NodeKind::File, &mut taken).is_none());
        assert_eq!(draws, tree.len() + 1);
    }

    #[test]
    fn rename_changes_only_name() {
        let tree = toggle_checked(&sample(), &id("doc1"));
        let renamed = rename_node(&tree, &id("doc1"), "Renamed");
        let before = find_node_by_id(&tree, &id("doc1")).unwrap();
        let after = find_node_by_id(&renamed, &id("doc1")).unwrap();
        assert_eq!(after.name, "Renamed");
        let mut expected = TreeNode::clone(before);
        expected.name = String::from("Renamed");
        assert_eq!(**after, expected);
        for (b, a) in tree.iter().zip(renamed.iter()) {
            if a.id != id("doc1") {
                assert_eq!(b.name, a.name);
                assert_eq!(b.flags, a.flags);
                assert_eq!(b.parent_id, a.parent_id);
            }
        }
        assert_eq!(tree.len(), renamed.len());
        assert!(Arc::ptr_eq(&tree.roots()[1], &renamed.roots()[1]));
    }

    #[test]
    fn delete_removes_subtree() {
        let tree = sample();
        let doomed = descendant_ids(find_node_by_id(&tree, &id("folder1")).unwrap());
        let after = delete_node(&tree, &id("folder1"));
        assert!(find_node_by_id(&after, &id("folder1")).is_none());
        for d in &doomed {
            assert!(find_node_by_id(&after, d).is_none(), "{d} survived");
        }
        assert_eq!(after.len(), tree.len() - 3);
    }

    #[test]
    fn delete_root() {
        let after = delete_node(&sample(), &id("root1"));
        assert_eq!(root_ids(&after), vec!["root2"]);
    }

    #[test]
    fn move_onto_self_is_rejected() {
        let tree = sample();
        for pos in [DropPosition::Above, DropPosition::Inside, DropPosition::Below] {
            for n in tree.iter() {
                let moved = move_node(&tree, &n.id, &n.id, pos);
                assert!(moved.moved.is_none());
                assert_eq!(moved.tree, tree);
            }
        }
    }

    #[test]
    fn move_into_descendant_is_rejected() {
        let tree = sample();
        for pos in [DropPosition::Above, DropPosition::Inside, DropPosition::Below] {
            for d in ["folder1", "doc1", "doc2", "a"] {
                let moved = move_node(&tree, &id("root1"), &id(d), pos);
                assert!(moved.moved.is_none(), "{d} {pos:?}");
                assert_eq!(moved.tree, tree);
            }
        }
        assert_eq!(
            check_move(&tree, &id("folder1"), &id("doc2"), DropPosition::Below),
            Err(MoveError::IntoDescendant {
                dragged: id("folder1"),
                target: id("doc2"),
            })
        );
    }

    #[test]
    fn inside_requires_container() {
        let tree = sample();
        for src in ["doc1", "a", "folder1", "root2"] {
            let moved = move_node(&tree, &id(src), &id("file1"), DropPosition::Inside);
            assert!(moved.moved.is_none());
            assert_eq!(moved.tree, tree);
        }
        assert_eq!(
            check_move(&tree, &id("a"), &id("file1"), DropPosition::Inside),
            Err(MoveError::NotAContainer(id("file1")))
        );
        // Folder and default kinds accept.
        assert!(move_node(&tree, &id("a"), &id("folder1"), DropPosition::Inside).moved.is_some());
        assert!(move_node(&tree, &id("a"), &id("root2"), DropPosition::Inside).moved.is_some());
    }

    #[test]
    fn missing_ids_are_rejected() {
        let tree = sample();
        assert_eq!(
            check_move(&tree, &id("nope"), &id("a"), DropPosition::Above),
            Err(MoveError::SourceNotFound(id("nope")))
        );
        assert_eq!(
            check_move(&tree, &id("a"), &id("nope"), DropPosition::Above),
            Err(MoveError::TargetNotFound(id("nope")))
        );
        assert!(move_node(&tree, &id("a"), &id("nope"), DropPosition::Inside).moved.is_none());
    }

    #[test]
    fn above_and_below_preserve_sibling_order() {
        let tree = sample();
        let above = move_node(&tree, &id("doc1"), &id("b"), DropPosition::Above);
        assert_eq!(
            child_ids(&above.tree, "root1"),
            vec!["folder1", "a", "doc1", "b", "c", "file1"]
        );
        assert_eq!(above.moved.unwrap().parent_id, Some(id("root1")));
        assert_eq!(child_ids(&above.tree, "folder1"), vec!["doc2"]);

        let below = move_node(&tree, &id("doc1"), &id("b"), DropPosition::Below);
        assert_eq!(
            child_ids(&below.tree, "root1"),
            vec!["folder1", "a", "b", "doc1", "c", "file1"]
        );
    }

    #[test]
    fn sibling_reorder_reresolves_target_index() {
        let tree = sample();
        // Moving `a` below `c`: extracting `a` shifts `c` left by one.
        let moved = move_node(&tree, &id("a"), &id("c"), DropPosition::Below);
        assert_eq!(
            child_ids(&moved.tree, "root1"),
            vec!["folder1", "b", "c", "a", "file1"]
        );
        let moved = move_node(&tree, &id("c"), &id("a"), DropPosition::Above);
        assert_eq!(
            child_ids(&moved.tree, "root1"),
            vec!["folder1", "c", "a", "b", "file1"]
        );
    }

    #[test]
    fn inside_move_appends_and_updates_parent() {
        let tree = sample();
        let moved = move_node(&tree, &id("doc1"), &id("root1"), DropPosition::Inside);
        let node = moved.moved.unwrap();
        assert_eq!(node.parent_id, Some(id("root1")));
        assert_eq!(child_ids(&moved.tree, "folder1"), vec!["doc2"]);
        assert_eq!(child_ids(&moved.tree, "root1").last().unwrap(), "doc1");
        assert!(find_node_by_id(&moved.tree, &id("root1")).unwrap().is_expanded());
        assert_eq!(
            parent_of(&moved.tree, &id("doc1")).unwrap().id,
            id("root1")
        );
    }

    #[test]
    fn inside_move_creates_children_on_default_leaf() {
        let tree = Tree::from_roots([
            TreeNode::new("d", "D", NodeKind::Default),
            TreeNode::new("x", "X", NodeKind::File),
        ]);
        let moved = move_node(&tree, &id("x"), &id("d"), DropPosition::Inside);
        assert_eq!(child_ids(&moved.tree, "d"), vec!["x"]);
        assert_eq!(root_ids(&moved.tree), vec!["d"]);
    }

    #[test]
    fn move_to_root_level_clears_parent() {
        let tree = sample();
        let moved = move_node(&tree, &id("doc2"), &id("root2"), DropPosition::Above);
        assert_eq!(root_ids(&moved.tree), vec!["root1", "doc2", "root2"]);
        assert_eq!(moved.moved.unwrap().parent_id, None);
        let moved = move_node(&tree, &id("doc2"), &id("root1"), DropPosition::Above);
        assert_eq!(root_ids(&moved.tree), vec!["doc2", "root1", "root2"]);
    }

    #[test]
    fn moved_subtree_keeps_descendants() {
        let tree = sample();
        let moved = move_node(&tree, &id("folder1"), &id("root2"), DropPosition::Inside);
        assert_eq!(path_to(&moved.tree, &id("doc2")), vec!["Other", "Folder", "Doc 2"]);
        assert_eq!(moved.tree.len(), tree.len());
        // The subtree below the moved node is reused as-is.
        let before = find_node_by_id(&tree, &id("doc1")).unwrap();
        let after = find_node_by_id(&moved.tree, &id("doc1")).unwrap();
        assert!(Arc::ptr_eq(before, after));
    }

    #[test]
    fn move_never_mutates_input() {
        let tree = sample();
        let snapshot = tree.clone();
        let _ = move_node(&tree, &id("doc1"), &id("root2"), DropPosition::Inside);
        assert_eq!(tree, snapshot);
        assert_eq!(child_ids(&tree, "folder1"), vec!["doc1", "doc2"]);
    }

    #[test]
    fn sync_flags_from_id_sets() {
        let tree = set_expanded(&sample(), &id("root1"), true);
        let synced = set_expanded_from(&tree, &[id("folder1")]);
        assert!(!find_node_by_id(&synced, &id("root1")).unwrap().is_expanded());
        assert!(find_node_by_id(&synced, &id("folder1")).unwrap().is_expanded());

        let checked = set_checked_from(&tree, &[id("a"), id("doc2")]);
        assert_eq!(checked_ids(&checked), vec![id("doc2"), id("a")]);
    }
}
