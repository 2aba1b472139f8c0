// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget configuration supplied by the host.

use alloc::collections::BTreeSet;
use core::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use understory_outline::NodeId;

/// Default minimum interval between two drag-over evaluations.
pub const DEFAULT_DRAG_THROTTLE: Duration = Duration::from_millis(50);

/// Feature switches and initial state for a [`TreeController`](crate::TreeController).
///
/// Every affordance is off by default; enable what the host needs:
///
/// ```
/// use understory_outline_interaction::TreeOptions;
///
/// let options = TreeOptions::default()
///     .with_draggable(true)
///     .with_checkboxes(true)
///     .with_edit_actions(true, true, true);
/// assert!(options.draggable && options.allow_delete);
/// assert!(!options.multi_select);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct TreeOptions {
    /// Enable drag and drop.
    pub draggable: bool,
    /// Allow several checked nodes at once. When off, checking a node unchecks the others.
    pub multi_select: bool,
    /// Render checkboxes and accept checkbox toggles.
    pub show_checkbox: bool,
    /// Offer inline creation.
    pub allow_create: bool,
    /// Offer inline rename.
    pub allow_edit: bool,
    /// Offer deletion.
    pub allow_delete: bool,
    /// Initial expanded set. `None` keeps the flags carried by the data.
    pub expanded_ids: Option<BTreeSet<NodeId>>,
    /// Initial checked set. `None` keeps the flags carried by the data.
    pub selected_ids: Option<BTreeSet<NodeId>>,
    /// Attach breadcrumb paths to visible rows.
    pub show_node_path: bool,
    /// Minimum interval between drag-over evaluations.
    pub drag_throttle: Duration,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            draggable: false,
            multi_select: false,
            show_checkbox: false,
            allow_create: false,
            allow_edit: false,
            allow_delete: false,
            expanded_ids: None,
            selected_ids: None,
            show_node_path: false,
            drag_throttle: DEFAULT_DRAG_THROTTLE,
        }
    }
}

impl TreeOptions {
    /// Enable or disable drag and drop.
    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    /// Show checkboxes.
    pub fn with_checkboxes(mut self, show: bool) -> Self {
        self.show_checkbox = show;
        self
    }

    /// Allow several checked nodes.
    pub fn with_multi_select(mut self, multi: bool) -> Self {
        self.multi_select = multi;
        self
    }

    /// Toggle the create, rename and delete affordances.
    pub fn with_edit_actions(mut self, create: bool, edit: bool, delete: bool) -> Self {
        self.allow_create = create;
        self.allow_edit = edit;
        self.allow_delete = delete;
        self
    }

    /// Start with exactly these nodes expanded.
    pub fn with_expanded_ids(mut self, ids: impl IntoIterator<Item = NodeId>) -> Self {
        self.expanded_ids = Some(ids.into_iter().collect());
        self
    }

    /// Start with exactly these nodes checked.
    pub fn with_selected_ids(mut self, ids: impl IntoIterator<Item = NodeId>) -> Self {
        self.selected_ids = Some(ids.into_iter().collect());
        self
    }

    /// Attach breadcrumb paths to rows.
    pub fn with_node_path(mut self, show: bool) -> Self {
        self.show_node_path = show;
        self
    }

    /// Change the drag-over throttle interval.
    pub fn with_drag_throttle(mut self, interval: Duration) -> Self {
        self.drag_throttle = interval;
        self
    }
}
