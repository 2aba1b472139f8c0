// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_outline_interaction --heading-base-level=0

//! Understory Outline Interaction: state machines that drive an outline widget.
//!
//! ## Overview
//!
//! The model crate `understory_outline` holds node data and pure edits. This crate adds what a
//! view needs between frames. It does not draw anything.
//!
//! - [`DragDropController`](crate::drag::DragDropController) turns pointer positions over rows
//!   into [`DropIntent`](crate::drag::DropIntent)s and commits moves.
//! - [`TreeController`](crate::controller::TreeController) owns the canonical snapshot, the
//!   retained expanded set, the inline create/rename slots and the delete confirmation.
//! - [`TreeHost`](crate::host::TreeHost) is the host side: change notifications plus async
//!   permission gates.
//! - [`TreeOptions`](crate::options::TreeOptions) switches affordances on and off.
//!
//! ## Workflow
//!
//! 1) Build a [`TreeController`] with the host's tree data and options.
//! 2) Render [`TreeController::rows`]; each row carries depth, toggle state and flags.
//! 3) Route clicks, keys and pointer moves to the controller. Each call returns whether the
//!    snapshot changed; the host hears about it through [`TreeHost`] callbacks.
//! 4) When the host has fresh data, hand it over with [`TreeController::set_data`]. Expansion
//!    the user chose survives the swap.
//!
//! ## Drop zones
//!
//! A row is split vertically: the top quarter drops above, the bottom quarter below and the
//! middle half inside. Inside is only offered on kinds that hold children; elsewhere the middle
//! shows no indicator.
//!
//! ## Time
//!
//! The crate never reads a clock. Pointer handlers pass a monotonic timestamp (any epoch) so the
//! drag-over throttle stays deterministic under test.
//!
//! ## Features
//!
//! - `std` (default): forwards `std` to dependencies.
//! - `libm`: floating point support for `no_std` builds through `kurbo`.
//! - `serde`: `Serialize`/`Deserialize` for [`TreeOptions`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod controller;
pub mod drag;
pub mod host;
pub mod options;

pub use controller::{Creating, Editing, KeyAction, TreeController};
pub use drag::{DragDropController, DragPhase, DropCommit, DropIntent, drop_zone};
pub use host::TreeHost;
pub use options::TreeOptions;
