// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the outline: node identifiers, kinds, flags, nodes, and snapshots.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier for a node in an outline.
///
/// Ids are opaque strings supplied by the host or minted by an
/// [`IdSource`](crate::IdSource). They are stable for the lifetime of a node and
/// unique within one [`Tree`]. Cloning is a reference-count bump.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct NodeId(Arc<str>);

impl NodeId {
    /// Create an id from any string-like value.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

/// The closed set of node kinds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum NodeKind {
    /// Generic node; may contain children.
    #[default]
    Default,
    /// Folder; may contain children.
    Folder,
    /// File leaf.
    File,
    /// Device leaf.
    Device,
    /// Layout leaf.
    Layout,
    /// Host-defined leaf.
    Custom,
}

impl NodeKind {
    /// Returns true if nodes of this kind may receive "inside" drops.
    pub const fn is_container(self) -> bool {
        match self {
            Self::Default | Self::Folder => true,
            Self::File | Self::Device | Self::Layout | Self::Custom => false,
        }
    }
}

bitflags::bitflags! {
    /// Per-node interaction flags.
    ///
    /// `SELECTED` and `HIGHLIGHTED` are independent: the first is checkbox
    /// membership, the second is the row that was last activated.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
    pub struct NodeFlags: u8 {
        /// Children are rendered.
        const EXPANDED    = 0b0000_0001;
        /// Checkbox / multi-select membership.
        const SELECTED    = 0b0000_0010;
        /// Row focus (last clicked).
        const HIGHLIGHTED = 0b0000_0100;
        /// Node cannot be dragged, edited, deleted, or receive drops.
        const DISABLED    = 0b0000_1000;
    }
}

/// A node in an outline snapshot.
///
/// Nodes are immutable once shared in a [`Tree`]; every edit produces a new
/// snapshot that reuses untouched subtrees.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct TreeNode {
    /// Unique, stable identifier.
    pub id: NodeId,
    /// Display label.
    pub name: String,
    /// Node kind.
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub kind: NodeKind,
    /// Ordered children. `Some` (even when empty) means the node can have children.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub children: Option<Vec<Arc<TreeNode>>>,
    /// Id of the node whose `children` contain this node; `None` for roots.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub parent_id: Option<NodeId>,
    /// Interaction flags.
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: NodeFlags,
    /// Opaque rendering hint.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub custom_icon: Option<String>,
}

impl TreeNode {
    /// Create a node. Folders start with an empty child list, other kinds with none.
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            children: (kind == NodeKind::Folder).then(Vec::new),
            parent_id: None,
            flags: NodeFlags::empty(),
            custom_icon: None,
        }
    }

    /// Replace the children, pointing their back-references at this node.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        let id = self.id.clone();
        self.children = Some(
            children
                .into_iter()
                .map(|mut child| {
                    child.parent_id = Some(id.clone());
                    Arc::new(child)
                })
                .collect(),
        );
        self
    }

    /// Add flags.
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags.insert(flags);
        self
    }

    /// Set the rendering hint.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.custom_icon = Some(icon.into());
        self
    }

    /// Whether children are rendered.
    pub fn is_expanded(&self) -> bool {
        self.flags.contains(NodeFlags::EXPANDED)
    }

    /// Whether the checkbox is ticked.
    pub fn is_selected(&self) -> bool {
        self.flags.contains(NodeFlags::SELECTED)
    }

    /// Whether this is the highlighted row.
    pub fn is_highlighted(&self) -> bool {
        self.flags.contains(NodeFlags::HIGHLIGHTED)
    }

    /// Whether the node is disabled.
    pub fn is_disabled(&self) -> bool {
        self.flags.contains(NodeFlags::DISABLED)
    }

    /// Whether the view should offer an expand toggle.
    pub fn can_have_children(&self) -> bool {
        self.children.is_some()
    }

    /// Children as a slice (empty for leaves).
    pub fn children(&self) -> &[Arc<Self>] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// An outline snapshot: the ordered root sequence.
///
/// Cloning is cheap. Operations in [`ops`](crate::ops) never mutate a snapshot;
/// they return a new one that shares every subtree off the edited path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Tree {
    pub(crate) roots: Vec<Arc<TreeNode>>,
}

impl Tree {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self { roots: Vec::new() }
    }

    /// Build a snapshot from owned root nodes.
    ///
    /// Back-references are repaired, so nodes may be built without `parent_id`.
    pub fn from_roots(roots: impl IntoIterator<Item = TreeNode>) -> Self {
        Self {
            roots: roots.into_iter().map(Arc::new).collect(),
        }
        .normalized()
    }

    /// The root sequence.
    pub fn roots(&self) -> &[Arc<TreeNode>] {
        &self.roots
    }

    /// Returns true if there are no nodes.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns true if a node with `id` exists.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.iter().any(|n| n.id == *id)
    }

    /// Depth-first pre-order traversal over every node.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: self.roots.iter().rev().collect(),
        }
    }

    /// Return a snapshot whose `parent_id` fields match containment.
    ///
    /// Nodes that are already consistent are shared, not copied.
    pub fn normalized(&self) -> Self {
        let mut roots = self.roots.clone();
        fix_parents(&mut roots, None);
        Self { roots }
    }
}

fn fix_parents(nodes: &mut [Arc<TreeNode>], parent: Option<&NodeId>) {
    for node in nodes {
        if !parents_consistent(node, parent) {
            let node = Arc::make_mut(node);
            node.parent_id = parent.cloned();
            if let Some(children) = node.children.as_mut() {
                fix_parents(children, Some(&node.id));
            }
        }
    }
}

fn parents_consistent(node: &TreeNode, parent: Option<&NodeId>) -> bool {
    node.parent_id.as_ref() == parent
        && node
            .children()
            .iter()
            .all(|c| parents_consistent(c, Some(&node.id)))
}

/// Pre-order iterator returned by [`Tree::iter`].
#[derive(Debug)]
pub struct Iter<'a> {
    stack: Vec<&'a Arc<TreeNode>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Arc<TreeNode>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = &'a Arc<TreeNode>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Where a dragged node lands relative to its target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum DropPosition {
    /// Sibling immediately before the target.
    Above,
    /// Last child of the target.
    Inside,
    /// Sibling immediately after the target.
    Below,
}
