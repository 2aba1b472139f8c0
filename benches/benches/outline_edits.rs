// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_outline::find::{find_node_by_id, is_descendant_of, path_to};
use understory_outline::ops::{move_node, set_expanded, set_expanded_from};
use understory_outline::{DropPosition, NodeId, NodeKind, Tree, TreeNode, visible_rows};

/// `fanout` folders per level, `depth` levels, with `fanout` files under every
/// leaf folder. Folder ids are dotted index paths (`n3.0.7`); files add `-doc`.
fn gen_tree(fanout: usize, depth: usize) -> Tree {
    fn level(prefix: &str, fanout: usize, depth: usize) -> Vec<TreeNode> {
        (0..fanout)
            .map(|i| {
                let id = format!("{prefix}{i}");
                if depth == 0 {
                    TreeNode::new(format!("{id}-doc"), format!("doc {id}"), NodeKind::File)
                } else {
                    TreeNode::new(id.clone(), format!("folder {id}"), NodeKind::Folder)
                        .with_children(level(&format!("{id}."), fanout, depth - 1))
                }
            })
            .collect()
    }
    Tree::from_roots(level("n", fanout, depth))
}

fn deepest(fanout: usize, depth: usize, leaf: bool) -> NodeId {
    let last = fanout - 1;
    let mut id = format!("n{last}");
    for _ in 0..depth {
        id.push_str(&format!(".{last}"));
    }
    if leaf {
        id.push_str("-doc");
    }
    NodeId::from(id)
}

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");
    for &(fanout, depth) in &[(8usize, 3usize), (10, 4)] {
        let tree = gen_tree(fanout, depth);
        let leaf = deepest(fanout, depth, true);
        group.throughput(Throughput::Elements(tree.len() as u64));
        group.bench_function(format!("find_last_f{fanout}_d{depth}"), |b| {
            b.iter(|| black_box(find_node_by_id(&tree, &leaf).is_some()))
        });
        group.bench_function(format!("path_to_last_f{fanout}_d{depth}"), |b| {
            b.iter(|| black_box(path_to(&tree, &leaf).len()))
        });
        let root = NodeId::from(format!("n{}", fanout - 1));
        group.bench_function(format!("is_descendant_f{fanout}_d{depth}"), |b| {
            b.iter(|| black_box(is_descendant_of(&tree, &leaf, &root)))
        });
    }
    group.finish();
}

fn bench_edits(c: &mut Criterion) {
    let mut group = c.benchmark_group("edits");
    for &(fanout, depth) in &[(8usize, 3usize), (10, 4)] {
        let tree = gen_tree(fanout, depth);
        let leaf = deepest(fanout, depth, true);
        let first_folder = NodeId::from("n0");
        let deep_folder = deepest(fanout, depth - 1, false);

        group.bench_function(format!("set_expanded_deep_f{fanout}_d{depth}"), |b| {
            b.iter(|| black_box(set_expanded(&tree, &deep_folder, true)))
        });
        group.bench_function(format!("move_leaf_inside_f{fanout}_d{depth}"), |b| {
            b.iter(|| {
                let moved = move_node(&tree, &leaf, &first_folder, DropPosition::Inside);
                black_box(moved.moved.is_some())
            })
        });
        group.bench_function(format!("move_rejected_f{fanout}_d{depth}"), |b| {
            b.iter(|| {
                let moved = move_node(&tree, &first_folder, &first_folder, DropPosition::Below);
                black_box(moved.moved.is_none())
            })
        });
    }
    group.finish();
}

fn bench_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("rows");
    let tree = gen_tree(10, 3);
    let all: Vec<NodeId> = tree.iter().map(|n| n.id.clone()).collect();
    let expanded = set_expanded_from(&tree, &all);
    group.throughput(Throughput::Elements(expanded.len() as u64));
    group.bench_function("visible_rows_all_expanded", |b| {
        b.iter(|| black_box(visible_rows(&expanded, false).len()))
    });
    group.bench_function("visible_rows_all_expanded_with_path", |b| {
        b.iter(|| black_box(visible_rows(&expanded, true).len()))
    });
    group.bench_function("expand_all", |b| {
        b.iter(|| black_box(set_expanded_from(&tree, &all)))
    });
    group.finish();
}

criterion_group!(benches, bench_find, bench_edits, bench_rows);
criterion_main!(benches);
