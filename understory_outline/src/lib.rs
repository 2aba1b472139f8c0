// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_outline --heading-base-level=0

//! Understory Outline: a persistent, in-memory outline tree for UI.
//!
//! This crate is the model half of an outline/tree widget: the node data, read-only lookups,
//! and pure structural edits including drag-drop relocation. Interaction state (drag gestures,
//! inline editing, confirmation, host callbacks) lives in `understory_outline_interaction`.
//!
//! ## Snapshots
//!
//! A [`Tree`] is an ordered sequence of root [`TreeNode`]s. Every edit in [`ops`] takes a
//! snapshot by reference and returns a new one. Only the root→target path is rebuilt; all other
//! subtrees are shared through `Arc`, so a view can hold on to an old snapshot while a new one
//! is computed and never observes a half-applied edit.
//!
//! ## Selection
//!
//! [`NodeFlags::SELECTED`] (checkbox membership) and [`NodeFlags::HIGHLIGHTED`] (the row last
//! activated) are independent. Highlighting a row never touches its checkbox and vice versa.
//!
//! ## Moves
//!
//! [`ops::move_node`] relocates a node [`Above`](DropPosition::Above), [`Inside`](DropPosition::Inside),
//! or [`Below`](DropPosition::Below) a target. Moves onto the node itself, into its own subtree,
//! or inside a kind that cannot hold children are rejected; [`ops::check_move`] reports why.
//!
//! ## Minimal usage
//!
//! ```
//! use understory_outline::{DropPosition, NodeId, NodeKind, Tree, TreeNode, find, ops};
//!
//! let tree = Tree::from_roots([
//!     TreeNode::new("root1", "Root", NodeKind::Folder).with_children([
//!         TreeNode::new("folder1", "Folder", NodeKind::Folder)
//!             .with_children([TreeNode::new("doc1", "Doc", NodeKind::File)]),
//!     ]),
//! ]);
//!
//! let doc = NodeId::from("doc1");
//! let moved = ops::move_node(&tree, &doc, &NodeId::from("root1"), DropPosition::Inside);
//! let node = moved.moved.unwrap();
//! assert_eq!(node.parent_id, Some(NodeId::from("root1")));
//! assert_eq!(find::path_to(&moved.tree, &doc), ["Root", "Doc"]);
//!
//! // Dropping a folder into its own child is refused.
//! let refused = ops::move_node(&tree, &NodeId::from("folder1"), &doc, DropPosition::Below);
//! assert!(refused.moved.is_none());
//! assert_eq!(refused.tree, tree);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards `std` to dependencies.
//! - `serde`: `Serialize`/`Deserialize` for nodes and snapshots (camelCase fields, `type` for the
//!   kind) so hosts can load plain tree data.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod find;
pub mod ids;
pub mod ops;
pub mod rows;
mod types;

pub use ids::{IdSource, SequentialIds};
pub use ops::{Created, MoveError, Moved};
pub use rows::{Row, visible_rows};
pub use types::{DropPosition, Iter, NodeFlags, NodeId, NodeKind, Tree, TreeNode};
