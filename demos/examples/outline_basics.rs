// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build a small outline, look nodes up, and apply a few pure edits.
//!
//! Every edit returns a new snapshot; the old one stays valid and shares
//! untouched subtrees with the new one.
//!
//! Run:
//! - `cargo run -p understory_outline_demos --example outline_basics`
//! - `RUST_LOG=understory_outline=trace cargo run -p understory_outline_demos --example outline_basics`

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use understory_outline::find::{find_node_by_id, id_path_to, path_to};
use understory_outline::ops::{create_node, delete_node, move_node, rename_node, set_expanded};
use understory_outline::{
    DropPosition, NodeFlags, NodeId, NodeKind, SequentialIds, Tree, TreeNode, visible_rows,
};

fn print_rows(title: &str, tree: &Tree) {
    println!("== {title} ==");
    for row in visible_rows(tree, false) {
        let toggle = match (row.has_toggle, row.expanded) {
            (true, true) => "v",
            (true, false) => ">",
            (false, _) => " ",
        };
        println!("  {}{toggle} {} ({:?})", "  ".repeat(row.depth), row.name, row.kind);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let tree = Tree::from_roots([
        TreeNode::new("root1", "Project", NodeKind::Folder)
            .with_flags(NodeFlags::EXPANDED)
            .with_children([
                TreeNode::new("src", "src", NodeKind::Folder).with_children([
                    TreeNode::new("main", "main.rs", NodeKind::File),
                    TreeNode::new("lib", "lib.rs", NodeKind::File),
                ]),
                TreeNode::new("readme", "README.md", NodeKind::File),
            ]),
        TreeNode::new("cam", "Camera", NodeKind::Device).with_icon("camera"),
    ]);
    print_rows("initial", &tree);

    let lib = NodeId::from("lib");
    println!("path to lib.rs: {:?}", path_to(&tree, &lib));
    println!("id path to lib.rs: {:?}", id_path_to(&tree, &lib));

    // Expanding `src` rebuilds only the Project -> src spine.
    let expanded = set_expanded(&tree, &NodeId::from("src"), true);
    assert!(Arc::ptr_eq(&tree.roots()[1], &expanded.roots()[1]));
    print_rows("src expanded", &expanded);

    let mut ids = SequentialIds::new("new");
    let created = create_node(
        &expanded,
        Some(&NodeId::from("src")),
        "util.rs",
        NodeKind::File,
        &mut ids,
    )
    .unwrap();
    println!("created {} under src", created.node.id);

    let renamed = rename_node(&created.tree, &NodeId::from("readme"), "README");
    let moved = move_node(&renamed, &lib, &NodeId::from("readme"), DropPosition::Below);
    let node = moved.moved.clone().unwrap();
    println!("moved {} to parent {:?}", node.name, node.parent_id);
    print_rows("after create, rename and move", &moved.tree);

    let refused = move_node(
        &moved.tree,
        &NodeId::from("root1"),
        &NodeId::from("src"),
        DropPosition::Inside,
    );
    assert!(refused.moved.is_none());
    assert_eq!(refused.tree, moved.tree);

    let pruned = delete_node(&moved.tree, &NodeId::from("src"));
    assert!(find_node_by_id(&pruned, &NodeId::from("main")).is_none());
    print_rows("src deleted", &pruned);

    // The first snapshot is untouched by everything above.
    assert_eq!(tree.len(), 6);
}
