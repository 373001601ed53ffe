// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

/// Position of a node inside the owning list's arena.
pub(crate) type NodeId = usize;

/// A successor link, `None` marks the end of a level.
pub(crate) type Link = Option<NodeId>;

/// A single element of the skip list.
///
/// The node reaches `height` levels and keeps one successor link per level.
/// Level 0 is the bottom chain which visits every node.
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    value: T,
    // must never be empty, its length is the node's height
    next: Vec<Link>,
}

impl<T> Node<T> {
    /// Create a node with all successor links absent.
    pub(crate) fn new(value: T, height: usize) -> Self {
        debug_assert!(height >= 1);
        Node {
            value,
            next: vec![None; height],
        }
    }

    #[inline]
    pub(crate) fn value(&self) -> &T {
        &self.value
    }

    #[inline]
    pub(crate) fn height(&self) -> usize {
        self.next.len()
    }

    #[inline]
    pub(crate) fn next(&self, level: usize) -> Link {
        self.next[level]
    }

    #[inline]
    pub(crate) fn set_next(&mut self, level: usize, target: Link) {
        self.next[level] = target;
    }

    pub(crate) fn into_value(self) -> T {
        self.value
    }
}
