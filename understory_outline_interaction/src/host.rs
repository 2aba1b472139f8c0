// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The callback contract between the controller and its host application.

use alloc::sync::Arc;
use core::convert::Infallible;
use core::future::{Future, ready};

use understory_outline::{DropPosition, NodeKind, Tree, TreeNode};

/// Host-side callbacks.
///
/// Notifications fire after the controller has published the new snapshot.
/// Every method has a default: notifications do nothing and the three
/// permission gates allow the action.
///
/// ## Permission gates
///
/// `before_create`, `before_edit` and `before_delete` are awaited before any
/// inline-edit or confirmation state is entered. Returning `Ok(false)` cancels
/// the action silently. Returning `Err` aborts it and the error is handed back
/// to the caller of the controller method unchanged.
pub trait TreeHost {
    /// Error a permission gate may raise.
    type Error;

    /// A structural or flag change was published.
    fn on_change(&mut self, _tree: &Tree) {}

    /// A node was highlighted or its checkbox changed.
    fn on_node_select(&mut self, _node: &Arc<TreeNode>) {}

    /// A drag-drop move was committed.
    fn on_node_move(
        &mut self,
        _node: &Arc<TreeNode>,
        _target: &Arc<TreeNode>,
        _position: DropPosition,
    ) {
    }

    /// A node was created under `parent` (`None` for the root level).
    fn on_node_create(&mut self, _node: &Arc<TreeNode>, _parent: Option<&Arc<TreeNode>>) {}

    /// A node was renamed.
    fn on_node_edit(&mut self, _node: &Arc<TreeNode>, _previous_name: &str) {}

    /// A node (and its subtree) was deleted. `node` is the pre-deletion value.
    fn on_node_delete(&mut self, _node: &Arc<TreeNode>) {}

    /// May a node of `kind` be created under `parent`?
    fn before_create(
        &mut self,
        _parent: Option<&Arc<TreeNode>>,
        _kind: NodeKind,
    ) -> impl Future<Output = Result<bool, Self::Error>> {
        ready(Ok(true))
    }

    /// May `node` be renamed?
    fn before_edit(&mut self, _node: &Arc<TreeNode>) -> impl Future<Output = Result<bool, Self::Error>> {
        ready(Ok(true))
    }

    /// May `node` be deleted?
    fn before_delete(
        &mut self,
        _node: &Arc<TreeNode>,
    ) -> impl Future<Output = Result<bool, Self::Error>> {
        ready(Ok(true))
    }
}

/// A host that ignores every notification and allows every action.
impl TreeHost for () {
    type Error = Infallible;
}
