// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fresh id generation for created nodes.

use alloc::format;
use alloc::string::String;

use crate::types::NodeId;

/// A source of fresh node ids.
///
/// [`create_node`](crate::ops::create_node) keeps drawing until it gets an id
/// that is not present in the snapshot, so sources only need to avoid repeating
/// themselves.
pub trait IdSource {
    /// Produce the next id.
    fn next_id(&mut self) -> NodeId;
}

impl<F: FnMut() -> NodeId> IdSource for F {
    fn next_id(&mut self) -> NodeId {
        self()
    }
}

/// Monotonic `"{prefix}-{n}"` ids. Never repeats within its lifetime.
#[derive(Clone, Debug)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    /// Create a source with the given prefix, starting at 1.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("node")
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> NodeId {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next = self.next.wrapping_add(1);
        NodeId::from(id)
    }
}
