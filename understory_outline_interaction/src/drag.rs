// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-drop gesture state: turn pointer positions over rows into drop intents.
//!
//! ## Gesture
//!
//! 1) [`DragDropController::drag_start`] captures the dragged node.
//! 2) [`DragDropController::drag_over`] is called on pointer moves over a row with the
//!    row's bounds and the pointer position. The vertical offset picks a zone:
//!    top quarter [`Above`](DropPosition::Above), bottom quarter
//!    [`Below`](DropPosition::Below), the middle half [`Inside`](DropPosition::Inside).
//!    Evaluations are throttled; calls inside the interval keep the previous intent.
//! 3) [`DragDropController::drop`] re-validates and commits the move, or
//!    [`DragDropController::drag_end`] cancels. Both leave the controller idle.
//!
//! An invalid zone shows no indicator. In particular an inside drop on a row that
//! cannot hold children does not fall back to above/below.
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Point, Rect};
//! use understory_outline::{DropPosition, NodeId, NodeKind, Tree, TreeNode};
//! use understory_outline_interaction::drag::DragDropController;
//!
//! let tree = Tree::from_roots([
//!     TreeNode::new("docs", "Docs", NodeKind::Folder),
//!     TreeNode::new("a", "a.txt", NodeKind::File),
//! ]);
//! let mut dnd = DragDropController::new(Duration::from_millis(50));
//! assert!(dnd.drag_start(&tree, &NodeId::from("a")));
//!
//! let row = Rect::new(0.0, 0.0, 200.0, 20.0);
//! let intent = dnd.drag_over(&tree, &NodeId::from("docs"), row, Point::new(10.0, 10.0), Duration::ZERO);
//! assert_eq!(intent.map(|i| i.position), Some(DropPosition::Inside));
//!
//! let commit = dnd.drop(&tree).unwrap();
//! assert_eq!(commit.node.parent_id, Some(NodeId::from("docs")));
//! assert!(!dnd.is_dragging());
//! ```

use alloc::sync::Arc;
use core::time::Duration;

use kurbo::{Point, Rect};
use tracing::trace;
use understory_outline::find::{find_node_by_id, is_descendant_of};
use understory_outline::ops::{check_move, move_node};
use understory_outline::{DropPosition, NodeId, Tree, TreeNode};

/// Fraction of a row's height that forms the above and below zones.
pub const EDGE_ZONE: f64 = 0.25;

/// Where the gesture currently is.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DragPhase {
    /// No gesture in flight.
    #[default]
    Idle,
    /// A node is being dragged but is not over any row.
    Dragging,
    /// Over a row with a valid drop zone.
    HoveringValid,
    /// Over a row that cannot receive the drop at the pointer's zone.
    HoveringInvalid,
}

/// The active drop indicator: which row, which zone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropIntent {
    /// Row under the pointer.
    pub target: NodeId,
    /// Zone within that row.
    pub position: DropPosition,
}

/// A committed drop.
#[derive(Clone, Debug)]
pub struct DropCommit {
    /// Snapshot after the move.
    pub tree: Tree,
    /// The moved node as settled.
    pub node: Arc<TreeNode>,
    /// The drop target, resolved in the new snapshot.
    pub target: Arc<TreeNode>,
    /// Zone the node was dropped in.
    pub position: DropPosition,
}

/// Pick the drop zone for `pointer` inside `bounds`.
///
/// Offsets above or below the row clamp to [`Above`](DropPosition::Above) and
/// [`Below`](DropPosition::Below).
pub fn drop_zone(bounds: Rect, pointer: Point) -> DropPosition {
    let height = bounds.height();
    let offset = pointer.y - bounds.y0;
    if offset < height * EDGE_ZONE {
        DropPosition::Above
    } else if offset >= height * (1.0 - EDGE_ZONE) {
        DropPosition::Below
    } else {
        DropPosition::Inside
    }
}

/// State machine for one drag gesture at a time.
#[derive(Clone, Debug)]
pub struct DragDropController {
    phase: DragPhase,
    source: Option<NodeId>,
    hover: Option<DropIntent>,
    throttle: Duration,
    last_eval: Option<Duration>,
}

impl Default for DragDropController {
    fn default() -> Self {
        Self::new(crate::options::DEFAULT_DRAG_THROTTLE)
    }
}

impl DragDropController {
    /// Create an idle controller that evaluates drag-over at most once per `throttle`.
    pub fn new(throttle: Duration) -> Self {
        Self {
            phase: DragPhase::Idle,
            source: None,
            hover: None,
            throttle,
            last_eval: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Returns true while a node is being dragged.
    pub fn is_dragging(&self) -> bool {
        self.source.is_some()
    }

    /// The dragged node, if any.
    pub fn source(&self) -> Option<&NodeId> {
        self.source.as_ref()
    }

    /// The active drop intent, if any.
    pub fn hover(&self) -> Option<&DropIntent> {
        self.hover.as_ref()
    }

    /// The indicator to draw on row `id`, if any.
    pub fn indicator_for(&self, id: &NodeId) -> Option<DropPosition> {
        self.hover
            .as_ref()
            .filter(|h| h.target == *id)
            .map(|h| h.position)
    }

    /// Begin dragging `id`. Unknown and disabled nodes cannot be dragged.
    pub fn drag_start(&mut self, tree: &Tree, id: &NodeId) -> bool {
        match find_node_by_id(tree, id) {
            Some(node) if !node.is_disabled() => {
                self.source = Some(id.clone());
                self.hover = None;
                self.last_eval = None;
                self.phase = DragPhase::Dragging;
                trace!(%id, "drag start");
                true
            }
            _ => false,
        }
    }

    /// Evaluate the pointer over row `target` and return the resulting intent.
    ///
    /// `now` is a monotonic timestamp from the host; calls less than the
    /// throttle interval after the last evaluation return the previous intent
    /// without re-evaluating.
    pub fn drag_over(
        &mut self,
        tree: &Tree,
        target: &NodeId,
        bounds: Rect,
        pointer: Point,
        now: Duration,
    ) -> Option<DropIntent> {
        let source = self.source.clone()?;
        if let Some(last) = self.last_eval
            && now.saturating_sub(last) < self.throttle
        {
            return self.hover.clone();
        }
        self.last_eval = Some(now);

        if !Self::accepts(tree, &source, target) {
            trace!(%source, %target, "drag over invalid row");
            return self.set_hover(None);
        }
        let position = drop_zone(bounds, pointer);
        match check_move(tree, &source, target, position) {
            Ok(()) => self.set_hover(Some(DropIntent {
                target: target.clone(),
                position,
            })),
            Err(err) => {
                trace!(%source, %target, ?position, %err, "drag over invalid zone");
                self.set_hover(None)
            }
        }
    }

    /// The pointer left the row under it. The dragged node is kept.
    pub fn drag_leave(&mut self) {
        self.hover = None;
        self.last_eval = None;
        if self.source.is_some() {
            self.phase = DragPhase::Dragging;
        }
    }

    /// Commit the gesture against `tree`.
    ///
    /// Returns `None` when there is no intent or it no longer validates. The
    /// controller is idle afterwards in every case.
    pub fn drop(&mut self, tree: &Tree) -> Option<DropCommit> {
        let source = self.source.take();
        let hover = self.hover.take();
        self.reset();
        let (source, DropIntent { target, position }) = (source?, hover?);

        if !Self::accepts(tree, &source, &target) {
            return None;
        }
        let moved = move_node(tree, &source, &target, position);
        let node = moved.moved?;
        let target = find_node_by_id(&moved.tree, &target)?.clone();
        Some(DropCommit {
            tree: moved.tree,
            node,
            target,
            position,
        })
    }

    /// Abort the gesture. Safe to call when idle.
    pub fn drag_end(&mut self) {
        self.source = None;
        self.hover = None;
        self.reset();
    }

    fn reset(&mut self) {
        self.last_eval = None;
        self.phase = DragPhase::Idle;
    }

    fn set_hover(&mut self, hover: Option<DropIntent>) -> Option<DropIntent> {
        self.phase = if hover.is_some() {
            DragPhase::HoveringValid
        } else {
            DragPhase::HoveringInvalid
        };
        self.hover = hover;
        self.hover.clone()
    }

    /// Row-level checks that hold for every zone.
    fn accepts(tree: &Tree, source: &NodeId, target: &NodeId) -> bool {
        find_node_by_id(tree, target).is_some_and(|t| !t.is_disabled())
            && source != target
            && !is_descendant_of(tree, target, source)
    }
}
