// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::{
    cmp::Ordering,
    collections::hash_map::DefaultHasher,
    fmt,
    hash::{
        Hash,
        Hasher,
    },
    iter,
    ops,
};

use tracing::{
    debug,
    instrument,
    trace,
};

use crate::{
    config::{
        Config,
        MAX_LEVELS,
    },
    errs::{
        Result,
        SkipListError,
    },
    skiplist::{
        iter::{
            IntoIter,
            Iter,
            ListIter,
        },
        level_generator::{
            GeometricalLevelGenerator,
            LevelGenerator,
        },
        node::{
            Link,
            Node,
            NodeId,
        },
    },
};

/// One entry of a predecessor path: either the list's own head slot for that
/// level or the last node on that level which sorts before the key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PathEntry {
    Head,
    Node(NodeId),
}

type Path = [PathEntry; MAX_LEVELS];

const HEAD_PATH: Path = [PathEntry::Head; MAX_LEVELS];

/// How the descent treats a first node that compares equal to the key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Seek {
    /// Stay at the head slot only when the key sorts strictly before the first
    /// node of a level.
    Insert,
    /// Also stay at the head slot when the key equals the first node, so the
    /// path always ends on nodes strictly less than the key.
    Remove,
}

impl Seek {
    #[inline]
    fn stays_at_head<T: Ord>(self, key: &T, first: &T) -> bool {
        match self {
            | Seek::Insert => key < first,
            | Seek::Remove => key <= first,
        }
    }
}

/// An ordered collection which keeps its elements sorted as they are added and
/// allows duplicates.
///
/// Elements are stored in a skip list: every element lives on the bottom level
/// and is promoted to a random number of higher levels, which lets searches
/// skip over most of the list. Positional operations (`get`, `remove`,
/// iteration) walk the bottom level.
///
/// Nodes are kept in an arena owned by the list and link to each other by
/// their slot in it. Slots freed by removals are handed out again to later
/// insertions.
#[derive(Clone)]
pub struct SkipList<T, G = GeometricalLevelGenerator> {
    heads: [Link; MAX_LEVELS],
    nodes: Vec<Option<Node<T>>>,
    free: Vec<NodeId>,
    count: usize,
    level_generator: G,
}

// ///////////////////////////////////////////////
// Construction
// ///////////////////////////////////////////////

impl<T> SkipList<T> {
    /// Create an empty list whose node heights follow a geometric
    /// distribution with `p = 1/2`.
    pub fn new() -> Self {
        Self::with_level_generator(GeometricalLevelGenerator::default())
    }

    /// Create an empty list from a [`Config`], which allows seeding the level
    /// generator for a reproducible shape.
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self::with_level_generator(
            GeometricalLevelGenerator::from_config(&config)?,
        ))
    }
}

impl<T> Default for SkipList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, G> SkipList<T, G> {
    /// Create an empty list drawing node heights from `level_generator`.
    /// Heights above [`MAX_LEVELS`] are clamped.
    pub fn with_level_generator(level_generator: G) -> Self {
        SkipList {
            heads: [None; MAX_LEVELS],
            nodes: Vec::new(),
            free: Vec::new(),
            count: 0,
            level_generator,
        }
    }

    fn empty_like(&self) -> Self
    where
        G: Clone,
    {
        Self::with_level_generator(self.level_generator.clone())
    }
}

// ///////////////////////////////////////////////
// Order independent operations
// ///////////////////////////////////////////////

impl<T, G> SkipList<T, G> {
    /// The number of elements in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Drop every element.
    #[instrument(level = "debug", skip(self))]
    pub fn clear(&mut self) {
        debug!(len = self.count, "clearing skip list");
        self.heads = [None; MAX_LEVELS];
        self.nodes.clear();
        self.free.clear();
        self.count = 0;
    }

    /// The element at `index` in sorted order.
    ///
    /// This walks the bottom level, so it costs `O(index)`.
    #[instrument(level = "trace", skip(self))]
    pub fn get(&self, index: usize) -> Result<&T> {
        self.node_at(index)
            .map(|id| self.node(id).value())
            .ok_or_else(|| SkipListError::index_out_of_bounds(index, self.count))
    }

    /// The element at position `⌊len · quantile⌋`, for `quantile` in
    /// `[0, 1)`.
    #[instrument(level = "trace", skip(self))]
    pub fn get_quantile(&self, quantile: f64) -> Result<&T> {
        if !(0.0..1.0).contains(&quantile) {
            return Err(SkipListError::OutOfBounds(format!(
                "quantile {} is outside of [0, 1)",
                quantile
            )));
        }
        let index = (self.count as f64 * quantile).floor() as usize;
        self.get(index)
    }

    pub fn first(&self) -> Option<&T> {
        self.heads[0].map(|id| self.node(id).value())
    }

    /// The greatest element. Uses the upper levels to skip ahead.
    pub fn last(&self) -> Option<&T> {
        let mut finger = PathEntry::Head;
        for level in (0..MAX_LEVELS).rev() {
            while let Some(next) = self.successor(finger, level) {
                finger = PathEntry::Node(next);
            }
        }
        match finger {
            | PathEntry::Head => None,
            | PathEntry::Node(id) => Some(self.node(id).value()),
        }
    }

    /// A snapshot of the elements in sorted order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.nodes, self.heads[0], self.count)
    }

    /// A cursor positioned before the first element.
    pub fn list_iter(&self) -> ListIter<'_, T> {
        ListIter::new(&self.nodes, self.heads[0], self.count)
    }

    /// A cursor positioned before the element at `index`. Negative indices
    /// count back from the end, so `-1` is the last element.
    pub fn list_iter_at(&self, index: isize) -> Result<ListIter<'_, T>> {
        ListIter::at(&self.nodes, self.heads[0], self.count, index)
    }

    /// Fold every element into `h := 31·h + hash(element)`, starting from 1.
    ///
    /// Element hashes come from a fixed-key hasher, so lists holding the same
    /// elements produce the same code.
    pub fn hash_code(&self) -> u64
    where
        T: Hash,
    {
        self.iter().fold(1u64, |h, value| {
            let mut hasher = DefaultHasher::new();
            value.hash(&mut hasher);
            h.wrapping_mul(31).wrapping_add(hasher.finish())
        })
    }

    /// Elements are placed by their order, so positional insertion is not
    /// supported.
    pub fn insert_at(&mut self, _index: usize, _value: T) -> Result<()> {
        Err(SkipListError::Unsupported("insert_at"))
    }

    /// Elements are placed by their order, so positional insertion is not
    /// supported.
    pub fn add_all_at<I>(&mut self, _index: usize, _values: I) -> Result<bool>
    where
        I: IntoIterator<Item = T>,
    {
        Err(SkipListError::Unsupported("add_all_at"))
    }

    /// Overwriting an element could break the ordering, so it is not
    /// supported.
    pub fn set(&mut self, _index: usize, _value: T) -> Result<T> {
        Err(SkipListError::Unsupported("set"))
    }

    /// Detach the first node. Every level it reaches starts with it, so the
    /// head slots are the whole predecessor path.
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        let first = self.heads[0]?;
        Some(self.unlink(first, &HEAD_PATH))
    }
}

// ///////////////////////////////////////////////
// Ordered operations
// ///////////////////////////////////////////////

impl<T: Ord, G> SkipList<T, G> {
    /// Whether at least one element equal to `value` is present.
    #[instrument(level = "trace", skip_all)]
    pub fn contains(&self, value: &T) -> bool {
        let mut finger = PathEntry::Head;
        for level in (0..MAX_LEVELS).rev() {
            while let Some(next) = self.successor(finger, level) {
                match self.node(next).value().cmp(value) {
                    | Ordering::Less => finger = PathEntry::Node(next),
                    | Ordering::Equal => return true,
                    | Ordering::Greater => break,
                }
            }
        }
        false
    }

    pub fn contains_all<'a, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        values.into_iter().all(|value| self.contains(value))
    }

    /// The position of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.iter()
            .take_while(|v| *v <= value)
            .position(|v| v == value)
    }

    /// The position of the last element equal to `value`.
    pub fn last_index_of(&self, value: &T) -> Option<usize> {
        self.iter()
            .take_while(|v| *v <= value)
            .enumerate()
            .filter(|(_, v)| *v == value)
            .map(|(i, _)| i)
            .last()
    }

    /// Remove and return the element at `index`.
    ///
    /// The node is located by position, so with duplicates present exactly the
    /// `index`-th one is unlinked.
    #[instrument(level = "trace", skip(self))]
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.count {
            return Err(SkipListError::index_out_of_bounds(index, self.count));
        }
        if index == 0 {
            return self
                .pop_front()
                .ok_or_else(|| SkipListError::index_out_of_bounds(index, self.count));
        }

        let target = self
            .node_at(index)
            .ok_or_else(|| SkipListError::index_out_of_bounds(index, self.count))?;
        let path = self.predecessors_of(target);
        Ok(self.unlink(target, &path))
    }

    /// Remove one element equal to `value`, returning whether one was found.
    #[instrument(level = "trace", skip_all)]
    pub fn remove_value(&mut self, value: &T) -> bool {
        let path = self.collect_path(value, Seek::Remove);
        match self.successor(path[0], 0) {
            | Some(id) if self.node(id).value() == value => {
                self.unlink(id, &path);
                true
            },
            | _ => false,
        }
    }

    /// Remove one occurrence of each of `values`. Returns whether anything was
    /// removed.
    #[instrument(level = "debug", skip_all)]
    pub fn remove_all<'a, I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut changed = false;
        for value in values {
            changed |= self.remove_value(value);
        }
        changed
    }

    /// Keep only the elements for which `f` returns `true`. Returns whether
    /// anything was removed.
    pub fn retain<F>(&mut self, mut f: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        let doomed: Vec<NodeId> = self
            .bottom_ids()
            .filter(|id| !f(self.node(*id).value()))
            .collect();
        for id in doomed.iter().copied() {
            let path = self.predecessors_of(id);
            self.unlink(id, &path);
        }
        trace!(removed = doomed.len(), "retained elements");
        !doomed.is_empty()
    }

    /// Remove every element that is not in `keep`. Returns whether anything
    /// was removed.
    #[instrument(level = "debug", skip_all)]
    pub fn retain_all(&mut self, keep: &[T]) -> bool {
        self.retain(|value| keep.contains(value))
    }

    /// Containment equality: `other` has as many elements as this list and
    /// every one of them is contained in it. Order is not considered.
    pub fn equals<'a, I>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        I::IntoIter: ExactSizeIterator,
        T: 'a,
    {
        let other = other.into_iter();
        other.len() == self.count && self.contains_all(other)
    }

    /// Walk from the top level down, recording on each level the last node the
    /// key must come after, or the head slot when there is none.
    fn collect_path(&self, key: &T, seek: Seek) -> Path {
        let mut path = HEAD_PATH;
        let mut finger: Link = None;
        for level in (0..MAX_LEVELS).rev() {
            let mut at = match finger {
                | Some(at) => at,
                | None => match self.heads[level] {
                    | Some(first) if !seek.stays_at_head(key, self.node(first).value()) => first,
                    | _ => continue,
                },
            };
            while let Some(next) = self.node(at).next(level) {
                if key > self.node(next).value() {
                    at = next;
                } else {
                    break;
                }
            }
            finger = Some(at);
            path[level] = PathEntry::Node(at);
        }
        path
    }

    /// The exact predecessor of `target` on every level it reaches.
    fn predecessors_of(&self, target: NodeId) -> Path {
        let node = self.node(target);
        let mut path = self.collect_path(node.value(), Seek::Remove);
        // equal elements may sit between the strict predecessor and the target
        for (level, entry) in path.iter_mut().enumerate().take(node.height()) {
            while let Some(next) = self.successor(*entry, level) {
                if next == target {
                    break;
                }
                *entry = PathEntry::Node(next);
            }
        }
        path
    }
}

impl<T: Ord, G: LevelGenerator> SkipList<T, G> {
    /// Insert `value` at its sorted position. Duplicates are kept, so this
    /// always returns `true`.
    #[instrument(level = "trace", skip_all)]
    pub fn add(&mut self, value: T) -> bool {
        let height = self.random_height();
        let path = self.collect_path(&value, Seek::Insert);
        let id = self.alloc(Node::new(value, height));
        for (level, entry) in path.iter().copied().enumerate().take(height) {
            let successor = self.successor(entry, level);
            self.node_mut(id).set_next(level, successor);
            self.set_successor(entry, level, Some(id));
        }
        self.count += 1;
        trace!(height, len = self.count, "spliced node");
        true
    }

    /// Add every element of `values`. Returns whether the list changed.
    #[instrument(level = "debug", skip_all)]
    pub fn add_all<I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        let mut changed = false;
        for value in values {
            changed |= self.add(value);
        }
        changed
    }

    /// A new, independent list holding copies of the elements at positions
    /// `[from, to)`.
    #[instrument(level = "debug", skip(self))]
    pub fn sub_list(&self, from: usize, to: usize) -> Result<Self>
    where
        T: Clone,
        G: Clone,
    {
        if to > self.count || from > to {
            return Err(SkipListError::OutOfBounds(format!(
                "range {}..{} for a list of length {}",
                from, to, self.count
            )));
        }
        let mut sub = self.empty_like();
        sub.add_all(self.iter().skip(from).take(to - from).cloned());
        debug!(from, to, "copied sub list");
        Ok(sub)
    }

    fn random_height(&mut self) -> usize {
        (self.level_generator.random() + 1).min(MAX_LEVELS)
    }
}

// ///////////////////////////////////////////////
// Arena plumbing
// ///////////////////////////////////////////////

impl<T, G> SkipList<T, G> {
    #[inline]
    fn node(&self, id: NodeId) -> &Node<T> {
        match &self.nodes[id] {
            | Some(node) => node,
            | None => unreachable!("link to vacant slot {}", id),
        }
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match &mut self.nodes[id] {
            | Some(node) => node,
            | None => unreachable!("link to vacant slot {}", id),
        }
    }

    #[inline]
    fn successor(&self, entry: PathEntry, level: usize) -> Link {
        match entry {
            | PathEntry::Head => self.heads[level],
            | PathEntry::Node(id) => self.node(id).next(level),
        }
    }

    #[inline]
    fn set_successor(&mut self, entry: PathEntry, level: usize, target: Link) {
        match entry {
            | PathEntry::Head => self.heads[level] = target,
            | PathEntry::Node(id) => self.node_mut(id).set_next(level, target),
        }
    }

    fn alloc(&mut self, node: Node<T>) -> NodeId {
        match self.free.pop() {
            | Some(id) => {
                self.nodes[id] = Some(node);
                id
            },
            | None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            },
        }
    }

    /// Splice `id` out of every level it reaches. `path` must hold its exact
    /// predecessor on each of those levels.
    fn unlink(&mut self, id: NodeId, path: &Path) -> T {
        for level in 0..self.node(id).height() {
            let successor = self.node(id).next(level);
            self.set_successor(path[level], level, successor);
        }
        self.count -= 1;

        let node = match self.nodes[id].take() {
            | Some(node) => node,
            | None => unreachable!("unlinking vacant slot {}", id),
        };
        self.free.push(id);
        trace!(height = node.height(), len = self.count, "unlinked node");
        node.into_value()
    }

    fn bottom_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        iter::successors(self.heads[0], move |id| self.node(*id).next(0))
    }

    fn node_at(&self, index: usize) -> Option<NodeId> {
        if index >= self.count {
            return None;
        }
        self.bottom_ids().nth(index)
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<T: Ord, G, H> PartialEq<SkipList<T, H>> for SkipList<T, G> {
    fn eq(&self, other: &SkipList<T, H>) -> bool {
        self.equals(other.iter())
    }
}

impl<T: Hash, G> Hash for SkipList<T, G> {
    fn hash<S: Hasher>(&self, state: &mut S) {
        state.write_usize(self.count);
        for value in self.iter() {
            value.hash(state);
        }
    }
}

impl<T: Ord, G: LevelGenerator> Extend<T> for SkipList<T, G> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        self.add_all(iterable);
    }
}

impl<T: Ord> FromIterator<T> for SkipList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iterable: I) -> Self {
        let mut list = SkipList::new();
        list.add_all(iterable);
        list
    }
}

impl<T, G> ops::Index<usize> for SkipList<T, G> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            | Ok(value) => value,
            | Err(e) => panic!("{}", e),
        }
    }
}

impl<T: fmt::Debug, G> fmt::Debug for SkipList<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, G> fmt::Display for SkipList<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}

impl<'a, T, G> IntoIterator for &'a SkipList<T, G> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, G> IntoIterator for SkipList<T, G> {
    type IntoIter = IntoIter<T, G>;
    type Item = T;

    fn into_iter(self) -> IntoIter<T, G> {
        IntoIter::new(self)
    }
}

// ///////////////////////////////////////////////
// Structural checks
// ///////////////////////////////////////////////

#[cfg(test)]
impl<T: Ord + fmt::Debug, G> SkipList<T, G> {
    /// Heights of the nodes in bottom-level order.
    pub(crate) fn heights(&self) -> Vec<usize> {
        self.bottom_ids().map(|id| self.node(id).height()).collect()
    }

    /// Panics unless every structural invariant holds.
    pub(crate) fn assert_invariants(&self) {
        // the bottom chain terminates within `count` hops and covers the list
        let mut bottom = Vec::with_capacity(self.count);
        let mut link = self.heads[0];
        while let Some(id) = link {
            assert!(bottom.len() < self.count, "bottom chain is longer than len");
            bottom.push(id);
            link = self.node(id).next(0);
        }
        assert_eq!(bottom.len(), self.count, "bottom chain length");

        for pair in bottom.windows(2) {
            assert!(
                self.node(pair[0]).value() <= self.node(pair[1]).value(),
                "bottom chain out of order: {:?} > {:?}",
                self.node(pair[0]).value(),
                self.node(pair[1]).value()
            );
        }

        for id in bottom.iter() {
            let height = self.node(*id).height();
            assert!((1..=MAX_LEVELS).contains(&height), "height {} out of bounds", height);
        }

        // each level holds exactly the nodes tall enough for it, in bottom order
        for level in 1..MAX_LEVELS {
            let expected: Vec<NodeId> = bottom
                .iter()
                .copied()
                .filter(|id| self.node(*id).height() > level)
                .collect();
            let actual: Vec<NodeId> =
                iter::successors(self.heads[level], |id| self.node(*id).next(level))
                    .take(self.count + 1)
                    .collect();
            assert_eq!(actual, expected, "level {} is not a sub-sequence", level);
        }

        let occupied = self.nodes.iter().filter(|n| n.is_some()).count();
        assert_eq!(occupied, self.count, "orphaned nodes in the arena");
        assert_eq!(occupied + self.free.len(), self.nodes.len(), "leaked slots");
    }
}
