// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tree state controller: canonical snapshot, retained expansion, inline
//! edit slots, and the flows that tie them to a [`TreeHost`].
//!
//! ## Flows
//!
//! Each user action follows the same shape: an optional async permission gate,
//! then a pure edit from [`understory_outline::ops`], then publication of the new
//! snapshot, then host notification. Declined gates, blank names, disabled
//! nodes, unknown ids and affordances switched off in [`TreeOptions`] all make
//! the action a silent no-op; the return value tells the caller whether
//! anything happened.
//!
//! ```
//! use futures::executor::block_on;
//! use understory_outline::{NodeId, NodeKind, Tree, TreeNode};
//! use understory_outline_interaction::{TreeController, TreeOptions};
//!
//! let tree = Tree::from_roots([TreeNode::new("docs", "Docs", NodeKind::Folder)]);
//! let options = TreeOptions::default().with_edit_actions(true, true, true);
//! let mut ctl = TreeController::new(tree, options, ());
//!
//! let docs = NodeId::from("docs");
//! assert_eq!(block_on(ctl.begin_create(Some(&docs), NodeKind::File)), Ok(true));
//! let created = ctl.submit_create("notes.txt").unwrap();
//! assert_eq!(created.parent_id, Some(docs.clone()));
//! assert!(ctl.is_expanded(&docs));
//! ```

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{Point, Rect};
use tracing::debug;
use understory_outline::find::{descendant_ids, find_node_by_id};
use understory_outline::ops::{
    create_node, delete_node, rename_node, set_checked_from, set_expanded, set_expanded_from,
    set_highlighted, toggle_checked,
};
use understory_outline::{
    DropPosition, IdSource, NodeId, NodeKind, Row, SequentialIds, Tree, TreeNode, visible_rows,
};

use crate::drag::{DragDropController, DropIntent};
use crate::host::TreeHost;
use crate::options::TreeOptions;

/// A node being renamed inline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Editing {
    /// Node under edit.
    pub id: NodeId,
    /// Name when editing began; the initial input value.
    pub name: String,
}

/// An inline create input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Creating {
    /// Parent of the new node, `None` for the root level.
    pub parent: Option<NodeId>,
    /// Kind of the new node.
    pub kind: NodeKind,
}

/// Basic keyboard activation on a focused row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Enter: highlight the row.
    Activate,
    /// Space: toggle the checkbox.
    ToggleCheck,
    /// Right arrow: expand.
    Expand,
    /// Left arrow: collapse.
    Collapse,
}

/// Owns the canonical [`Tree`] and orchestrates user actions against it.
#[derive(Debug)]
pub struct TreeController<H: TreeHost, I: IdSource = SequentialIds> {
    tree: Tree,
    expanded: BTreeSet<NodeId>,
    options: TreeOptions,
    editing: Option<Editing>,
    creating: Option<Creating>,
    pending_delete: Option<Arc<TreeNode>>,
    drag: DragDropController,
    ids: I,
    host: H,
}

impl<H: TreeHost> TreeController<H> {
    /// Create a controller minting `node-{n}` ids for created nodes.
    pub fn new(tree: Tree, options: TreeOptions, host: H) -> Self {
        Self::with_id_source(tree, options, host, SequentialIds::default())
    }
}

impl<H: TreeHost, I: IdSource> TreeController<H, I> {
    /// Create a controller with a custom id source.
    ///
    /// `options.expanded_ids` and `options.selected_ids`, when given, override
    /// the flags carried by `tree`.
    pub fn with_id_source(tree: Tree, options: TreeOptions, host: H, ids: I) -> Self {
        let tree = tree.normalized();
        let expanded: BTreeSet<NodeId> = match &options.expanded_ids {
            Some(ids) => ids.clone(),
            None => tree
                .iter()
                .filter(|n| n.is_expanded())
                .map(|n| n.id.clone())
                .collect(),
        };
        let mut tree = set_expanded_from(&tree, &expanded);
        if let Some(selected) = &options.selected_ids {
            tree = set_checked_from(&tree, selected);
        }
        Self {
            tree,
            expanded,
            drag: DragDropController::new(options.drag_throttle),
            options,
            editing: None,
            creating: None,
            pending_delete: None,
            ids,
            host,
        }
    }

    /// The canonical snapshot.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Current options.
    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The retained expanded set.
    pub fn expanded_ids(&self) -> &BTreeSet<NodeId> {
        &self.expanded
    }

    /// Returns true if `id` is in the expanded set.
    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.expanded.contains(id)
    }

    /// The node being renamed, if any.
    pub fn editing(&self) -> Option<&Editing> {
        self.editing.as_ref()
    }

    /// The pending create input, if any.
    pub fn creating(&self) -> Option<&Creating> {
        self.creating.as_ref()
    }

    /// The node awaiting delete confirmation, if any.
    pub fn pending_delete(&self) -> Option<&Arc<TreeNode>> {
        self.pending_delete.as_ref()
    }

    /// Drag gesture state, for drawing indicators.
    pub fn drag(&self) -> &DragDropController {
        &self.drag
    }

    /// Rows to render, honoring [`TreeOptions::show_node_path`].
    pub fn rows(&self) -> Vec<Row> {
        visible_rows(&self.tree, self.options.show_node_path)
    }

    /// Replace the data with a host-supplied snapshot.
    ///
    /// Nodes expanded before stay expanded; nodes the new data marks expanded
    /// join the set. Ids missing from the new data leave it. No callback fires
    /// since the host is the source.
    pub fn set_data(&mut self, tree: Tree) {
        let tree = tree.normalized();
        let present: BTreeSet<&NodeId> = tree.iter().map(|n| &n.id).collect();
        self.expanded.retain(|id| present.contains(id));
        self.expanded
            .extend(tree.iter().filter(|n| n.is_expanded()).map(|n| n.id.clone()));
        self.tree = set_expanded_from(&tree, &self.expanded);
        if let Some(pending) = &self.pending_delete
            && !self.tree.contains(&pending.id)
        {
            self.pending_delete = None;
        }
    }

    /// Replace the expanded set outright.
    pub fn set_expanded_ids(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        self.expanded = ids.into_iter().collect();
        let tree = set_expanded_from(&self.tree, &self.expanded);
        self.publish(tree);
    }

    /// Replace the checked set outright.
    pub fn set_selected_ids(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        let ids: BTreeSet<NodeId> = ids.into_iter().collect();
        let tree = set_checked_from(&self.tree, &ids);
        self.publish(tree);
    }

    /// Flip expansion of `id`.
    pub fn toggle_expand(&mut self, id: &NodeId) -> bool {
        if !self.tree.contains(id) {
            return false;
        }
        let expand = !self.expanded.remove(id);
        if expand {
            self.expanded.insert(id.clone());
        }
        let tree = set_expanded(&self.tree, id, expand);
        self.publish(tree);
        true
    }

    /// Highlight the row `id` and report it to the host.
    pub fn select(&mut self, id: &NodeId) -> bool {
        if !self.tree.contains(id) {
            return false;
        }
        let tree = set_highlighted(&self.tree, id, self.options.multi_select);
        self.publish(tree);
        self.notify_select(id);
        true
    }

    /// Toggle the checkbox of `id`.
    ///
    /// Without [`TreeOptions::multi_select`], checking a node unchecks every other.
    pub fn toggle_checkbox(&mut self, id: &NodeId) -> bool {
        if !self.options.show_checkbox {
            return false;
        }
        let Some(node) = find_node_by_id(&self.tree, id) else {
            return false;
        };
        if node.is_disabled() {
            return false;
        }
        let mut tree = toggle_checked(&self.tree, id);
        if !self.options.multi_select
            && find_node_by_id(&tree, id).is_some_and(|n| n.is_selected())
        {
            tree = set_checked_from(&tree, [id]);
        }
        self.publish(tree);
        self.notify_select(id);
        true
    }

    /// Handle a key press on row `id`.
    pub fn handle_key(&mut self, id: &NodeId, action: KeyAction) -> bool {
        match action {
            KeyAction::Activate => self.select(id),
            KeyAction::ToggleCheck => self.toggle_checkbox(id),
            KeyAction::Expand | KeyAction::Collapse => {
                let want = action == KeyAction::Expand;
                let toggles = find_node_by_id(&self.tree, id)
                    .is_some_and(|n| n.can_have_children() && self.is_expanded(id) != want);
                toggles && self.toggle_expand(id)
            }
        }
    }

    /// Ask to create a node of `kind` under `parent` (`None`: root level).
    ///
    /// On `Ok(true)` the controller is in the creating state and the view shows
    /// an input; finish with [`submit_create`](Self::submit_create). Disabled
    /// parents and kinds that cannot hold children are refused before the gate.
    pub async fn begin_create(
        &mut self,
        parent: Option<&NodeId>,
        kind: NodeKind,
    ) -> Result<bool, H::Error> {
        if !self.options.allow_create {
            return Ok(false);
        }
        let parent_node = match parent {
            Some(id) => match find_node_by_id(&self.tree, id) {
                Some(node) if !node.is_disabled() && node.kind.is_container() => {
                    Some(node.clone())
                }
                _ => return Ok(false),
            },
            None => None,
        };
        if !self.host.before_create(parent_node.as_ref(), kind).await? {
            debug!(parent = ?parent, "create declined");
            return Ok(false);
        }
        self.creating = Some(Creating {
            parent: parent.cloned(),
            kind,
        });
        Ok(true)
    }

    /// Finish the pending create with `name`.
    ///
    /// A blank name abandons it. Returns the created node.
    pub fn submit_create(&mut self, name: &str) -> Option<Arc<TreeNode>> {
        let Creating { parent, kind } = self.creating.take()?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let created = create_node(&self.tree, parent.as_ref(), name, kind, &mut self.ids)?;
        if let Some(parent) = &parent {
            self.expanded.insert(parent.clone());
        }
        self.tree = created.tree;
        let parent_node = parent
            .as_ref()
            .and_then(|p| find_node_by_id(&self.tree, p))
            .cloned();
        self.host.on_node_create(&created.node, parent_node.as_ref());
        self.host.on_change(&self.tree);
        Some(created.node)
    }

    /// Drop the pending create without changes.
    pub fn cancel_create(&mut self) {
        self.creating = None;
    }

    /// Ask to rename `id`. On `Ok(true)` the controller is editing.
    pub async fn begin_edit(&mut self, id: &NodeId) -> Result<bool, H::Error> {
        if !self.options.allow_edit {
            return Ok(false);
        }
        let Some(node) = self.editable(id) else {
            return Ok(false);
        };
        if !self.host.before_edit(&node).await? {
            debug!(%id, "edit declined");
            return Ok(false);
        }
        self.editing = Some(Editing {
            id: id.clone(),
            name: node.name.clone(),
        });
        Ok(true)
    }

    /// Finish the pending rename with `name`.
    ///
    /// A blank name abandons it. Returns the renamed node.
    pub fn submit_edit(&mut self, name: &str) -> Option<Arc<TreeNode>> {
        let Editing { id, .. } = self.editing.take()?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let previous = find_node_by_id(&self.tree, &id)?.name.clone();
        self.tree = rename_node(&self.tree, &id, name);
        let node = find_node_by_id(&self.tree, &id)?.clone();
        debug!(%id, %previous, name = %node.name, "renamed node");
        self.host.on_node_edit(&node, &previous);
        self.host.on_change(&self.tree);
        Some(node)
    }

    /// Drop the pending rename without changes.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Ask to delete `id`. On `Ok(true)` a confirmation is pending.
    pub async fn request_delete(&mut self, id: &NodeId) -> Result<bool, H::Error> {
        if !self.options.allow_delete {
            return Ok(false);
        }
        let Some(node) = self.editable(id) else {
            return Ok(false);
        };
        if !self.host.before_delete(&node).await? {
            debug!(%id, "delete declined");
            return Ok(false);
        }
        self.pending_delete = Some(node);
        Ok(true)
    }

    /// Confirm the pending delete. Returns the deleted node as it was.
    pub fn confirm_delete(&mut self) -> Option<Arc<TreeNode>> {
        let node = self.pending_delete.take()?;
        let current = find_node_by_id(&self.tree, &node.id)?.clone();
        self.tree = delete_node(&self.tree, &current.id);

        let mut gone = descendant_ids(&current);
        gone.push(current.id.clone());
        for id in &gone {
            self.expanded.remove(id);
        }
        if self.editing.as_ref().is_some_and(|e| gone.contains(&e.id)) {
            self.editing = None;
        }
        if self
            .creating
            .as_ref()
            .and_then(|c| c.parent.as_ref())
            .is_some_and(|p| gone.contains(p))
        {
            self.creating = None;
        }
        if self
            .drag
            .source()
            .is_some_and(|s| gone.contains(s))
        {
            self.drag.drag_end();
        }

        self.host.on_node_delete(&current);
        self.host.on_change(&self.tree);
        Some(current)
    }

    /// Close the confirmation without deleting.
    pub fn dismiss_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Begin dragging `id`.
    pub fn drag_start(&mut self, id: &NodeId) -> bool {
        self.options.draggable && self.drag.drag_start(&self.tree, id)
    }

    /// Pointer moved over row `target`. See [`DragDropController::drag_over`].
    pub fn drag_over(
        &mut self,
        target: &NodeId,
        bounds: Rect,
        pointer: Point,
        now: Duration,
    ) -> Option<DropIntent> {
        self.drag.drag_over(&self.tree, target, bounds, pointer, now)
    }

    /// Pointer left the row under it.
    pub fn drag_leave(&mut self) {
        self.drag.drag_leave();
    }

    /// Drop at the current intent. Returns the moved node when the tree changed.
    pub fn commit_drop(&mut self) -> Option<Arc<TreeNode>> {
        let commit = self.drag.drop(&self.tree)?;
        if commit.position == DropPosition::Inside {
            self.expanded.insert(commit.target.id.clone());
        }
        self.tree = commit.tree;
        self.host
            .on_node_move(&commit.node, &commit.target, commit.position);
        self.host.on_change(&self.tree);
        Some(commit.node)
    }

    /// Abort the drag gesture.
    pub fn drag_end(&mut self) {
        self.drag.drag_end();
    }

    fn editable(&self, id: &NodeId) -> Option<Arc<TreeNode>> {
        find_node_by_id(&self.tree, id)
            .filter(|n| !n.is_disabled())
            .cloned()
    }

    fn publish(&mut self, tree: Tree) {
        self.tree = tree;
        self.host.on_change(&self.tree);
    }

    fn notify_select(&mut self, id: &NodeId) {
        if let Some(node) = find_node_by_id(&self.tree, id) {
            let node = node.clone();
            self.host.on_node_select(&node);
        }
    }
}
