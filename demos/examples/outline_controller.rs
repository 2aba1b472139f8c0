// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A full controller session against a host that logs callbacks and vetoes
//! some actions.
//!
//! The host refuses to rename devices and asks before deleting folders. The
//! gates are async so a real host could show a dialog; here they resolve
//! immediately and `block_on` drives them.
//!
//! Run:
//! - `RUST_LOG=info cargo run -p understory_outline_demos --example outline_controller`

use std::convert::Infallible;
use std::future::{Future, ready};
use std::sync::Arc;
use std::time::Duration;

use futures::executor::block_on;
use kurbo::{Point, Rect};
use tracing::info;
use tracing_subscriber::EnvFilter;
use understory_outline::{DropPosition, NodeId, NodeKind, Tree, TreeNode};
use understory_outline_interaction::{KeyAction, TreeController, TreeHost, TreeOptions};

#[derive(Debug, Default)]
struct LoggingHost {
    changes: usize,
}

impl TreeHost for LoggingHost {
    type Error = Infallible;

    fn on_change(&mut self, tree: &Tree) {
        self.changes += 1;
        info!(nodes = tree.len(), "tree changed");
    }

    fn on_node_select(&mut self, node: &Arc<TreeNode>) {
        info!(id = %node.id, checked = node.is_selected(), "selected");
    }

    fn on_node_move(&mut self, node: &Arc<TreeNode>, target: &Arc<TreeNode>, position: DropPosition) {
        info!(id = %node.id, target = %target.id, ?position, "moved");
    }

    fn on_node_create(&mut self, node: &Arc<TreeNode>, parent: Option<&Arc<TreeNode>>) {
        info!(id = %node.id, name = %node.name, parent = ?parent.map(|p| &p.id), "created");
    }

    fn on_node_edit(&mut self, node: &Arc<TreeNode>, previous_name: &str) {
        info!(id = %node.id, from = previous_name, to = %node.name, "renamed");
    }

    fn on_node_delete(&mut self, node: &Arc<TreeNode>) {
        info!(id = %node.id, "deleted");
    }

    fn before_edit(&mut self, node: &Arc<TreeNode>) -> impl Future<Output = Result<bool, Infallible>> {
        ready(Ok(node.kind != NodeKind::Device))
    }
}

fn print_rows<H: TreeHost>(ctl: &TreeController<H>) {
    for row in ctl.rows() {
        let check = if row.checked { "[x]" } else { "[ ]" };
        let mark = if row.highlighted { "*" } else { " " };
        println!(
            "  {check}{mark}{}{} {}",
            "  ".repeat(row.depth),
            row.name,
            row.path.unwrap_or_default()
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let tree = Tree::from_roots([
        TreeNode::new("site", "Site", NodeKind::Folder).with_children([
            TreeNode::new("lobby", "Lobby", NodeKind::Layout),
            TreeNode::new("cam1", "Camera 1", NodeKind::Device),
        ]),
        TreeNode::new("spare", "Spare", NodeKind::Folder),
    ]);
    let options = TreeOptions::default()
        .with_draggable(true)
        .with_checkboxes(true)
        .with_multi_select(true)
        .with_edit_actions(true, true, true)
        .with_node_path(true)
        .with_expanded_ids([NodeId::from("site")]);
    let mut ctl = TreeController::new(tree, options, LoggingHost::default());
    println!("== initial ==");
    print_rows(&ctl);

    let cam = NodeId::from("cam1");
    ctl.handle_key(&cam, KeyAction::Activate);
    ctl.handle_key(&cam, KeyAction::ToggleCheck);
    ctl.toggle_checkbox(&NodeId::from("lobby"));

    let renamed = block_on(ctl.begin_edit(&cam)).unwrap_or_else(|never| match never {});
    println!("rename camera allowed: {renamed}");
    let lobby = NodeId::from("lobby");
    if block_on(ctl.begin_edit(&lobby)).unwrap_or_else(|never| match never {}) {
        ctl.submit_edit("Main lobby");
    }

    let spare = NodeId::from("spare");
    if block_on(ctl.begin_create(Some(&spare), NodeKind::Layout)).unwrap_or_else(|never| match never {}) {
        ctl.submit_create("Backup view");
    }

    // Drag the camera into the spare folder: middle of the row drops inside.
    let row = Rect::new(0.0, 60.0, 240.0, 80.0);
    if ctl.drag_start(&cam) {
        ctl.drag_over(&spare, row, Point::new(20.0, 70.0), Duration::ZERO);
        ctl.commit_drop();
    }

    if block_on(ctl.request_delete(&NodeId::from("site"))).unwrap_or_else(|never| match never {}) {
        let deleted = ctl.confirm_delete();
        println!("deleted: {:?}", deleted.map(|n| n.name.clone()));
    }

    println!("== final ({} changes) ==", ctl.host().changes);
    print_rows(&ctl);
    assert_eq!(ctl.tree().roots().len(), 1);
    assert!(ctl.is_expanded(&spare));
}
