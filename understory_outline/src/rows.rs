// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flatten a snapshot into the rows a view renders.
//!
//! Rows appear in display order: depth-first, children only below expanded
//! nodes. A view maps each [`Row`] to a line with indentation, a toggle arrow,
//! an optional checkbox and an optional breadcrumb tooltip.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::types::{NodeId, NodeKind, Tree, TreeNode};

/// Separator used to join breadcrumb names.
pub const PATH_SEPARATOR: &str = " / ";

/// One visible line of the outline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// Node id.
    pub id: NodeId,
    /// Display label.
    pub name: String,
    /// Node kind.
    pub kind: NodeKind,
    /// Nesting depth; roots are `0`.
    pub depth: usize,
    /// Whether to draw an expand toggle.
    pub has_toggle: bool,
    /// Whether the node is expanded.
    pub expanded: bool,
    /// Checkbox state.
    pub checked: bool,
    /// Row focus.
    pub highlighted: bool,
    /// Disabled rows accept no edits or drops.
    pub disabled: bool,
    /// Breadcrumb from the root, when requested.
    pub path: Option<String>,
}

/// Collect the visible rows of `tree`.
///
/// When `with_path` is set every row carries its root→node breadcrumb joined
/// with [`PATH_SEPARATOR`].
pub fn visible_rows(tree: &Tree, with_path: bool) -> Vec<Row> {
    let mut out = Vec::new();
    let mut names = Vec::new();
    push_rows(tree.roots(), 0, with_path, &mut names, &mut out);
    out
}

fn push_rows<'a>(
    nodes: &'a [Arc<TreeNode>],
    depth: usize,
    with_path: bool,
    names: &mut Vec<&'a str>,
    out: &mut Vec<Row>,
) {
    for node in nodes {
        names.push(&node.name);
        out.push(Row {
            id: node.id.clone(),
            name: node.name.clone(),
            kind: node.kind,
            depth,
            has_toggle: node.can_have_children(),
            expanded: node.is_expanded(),
            checked: node.is_selected(),
            highlighted: node.is_highlighted(),
            disabled: node.is_disabled(),
            path: with_path.then(|| names.join(PATH_SEPARATOR)),
        });
        if node.is_expanded() {
            push_rows(node.children(), depth + 1, with_path, names, out);
        }
        names.pop();
    }
}
