// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drive the drag-drop state machine with synthetic pointer positions.
//!
//! Rows are laid out 20 units tall; the pointer's vertical position inside a
//! row selects above, inside or below. Timestamps are synthetic so the
//! throttle is easy to see.
//!
//! Run:
//! - `cargo run -p understory_outline_demos --example outline_drag_drop`
//! - `RUST_LOG=understory_outline_interaction=trace cargo run -p understory_outline_demos --example outline_drag_drop`

use std::time::Duration;

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use understory_outline::find::path_to;
use understory_outline::{DropPosition, NodeFlags, NodeId, NodeKind, Tree, TreeNode, visible_rows};
use understory_outline_interaction::{DragDropController, DragPhase};

const ROW_HEIGHT: f64 = 20.0;

fn row_rect(index: usize) -> Rect {
    let y = index as f64 * ROW_HEIGHT;
    Rect::new(0.0, y, 240.0, y + ROW_HEIGHT)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let tree = Tree::from_roots([
        TreeNode::new("docs", "Docs", NodeKind::Folder)
            .with_flags(NodeFlags::EXPANDED)
            .with_children([
                TreeNode::new("guide", "guide.md", NodeKind::File),
                TreeNode::new("notes", "notes.md", NodeKind::File),
            ]),
        TreeNode::new("todo", "todo.txt", NodeKind::File),
        TreeNode::new("archive", "Archive", NodeKind::Folder).with_flags(NodeFlags::DISABLED),
    ]);
    let rows = visible_rows(&tree, false);
    let index_of = |id: &str| rows.iter().position(|r| r.id.as_str() == id).unwrap();

    let mut dnd = DragDropController::new(Duration::from_millis(50));
    let todo = NodeId::from("todo");
    assert!(dnd.drag_start(&tree, &todo));

    let mut now = Duration::ZERO;
    let probes = [
        ("docs", 10.0, "middle of a folder"),
        ("guide", 10.0, "middle of a file"),
        ("guide", 2.0, "top edge of a file"),
        ("archive", 10.0, "disabled folder"),
        ("notes", 18.0, "bottom edge of a file"),
    ];
    for (target, offset, label) in probes {
        let rect = row_rect(index_of(target));
        let pointer = Point::new(12.0, rect.y0 + offset);
        let intent = dnd.drag_over(&tree, &NodeId::from(target), rect, pointer, now);
        println!("{label:>24}: {:?} ({:?})", intent.map(|i| i.position), dnd.phase());
        now += Duration::from_millis(60);
    }

    // Inside the throttle window the previous intent is kept.
    let rect = row_rect(index_of("docs"));
    let kept = dnd.drag_over(
        &tree,
        &NodeId::from("docs"),
        rect,
        Point::new(12.0, rect.y0 + 10.0),
        now - Duration::from_millis(55),
    );
    assert_eq!(kept.map(|i| i.position), Some(DropPosition::Below));
    assert_eq!(dnd.phase(), DragPhase::HoveringValid);

    let commit = dnd.drop(&tree).unwrap();
    println!(
        "dropped {} {:?} {}: now at {:?}",
        commit.node.name,
        commit.position,
        commit.target.name,
        path_to(&commit.tree, &todo)
    );
    assert_eq!(commit.node.parent_id, Some(NodeId::from("docs")));
    assert!(!dnd.is_dragging());
}
