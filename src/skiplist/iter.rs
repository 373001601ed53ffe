// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::iter::FusedIterator;

use crate::{
    errs::{
        Result,
        SkipListError,
    },
    skiplist::{
        list::SkipList,
        node::{
            Link,
            Node,
        },
    },
};

#[inline]
fn resolve<T>(nodes: &[Option<Node<T>>], link: Link) -> Option<&Node<T>> {
    link.and_then(|id| nodes[id].as_ref())
}

/// Borrowing iterator over the elements of a [`SkipList`] in sorted order.
pub struct Iter<'a, T> {
    nodes: &'a [Option<Node<T>>],
    current: Link,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(nodes: &'a [Option<Node<T>>], first: Link, len: usize) -> Self {
        Iter {
            nodes,
            current: first,
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = resolve(self.nodes, self.current)?;
        self.current = node.next(0);
        self.remaining = self.remaining.saturating_sub(1);
        Some(node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Consuming iterator, yields the elements of a [`SkipList`] in sorted order.
pub struct IntoIter<T, G> {
    list: SkipList<T, G>,
}

impl<T, G> IntoIter<T, G> {
    pub(crate) fn new(list: SkipList<T, G>) -> Self {
        IntoIter { list }
    }
}

impl<T, G> Iterator for IntoIter<T, G> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, G> ExactSizeIterator for IntoIter<T, G> {}

impl<T, G> FusedIterator for IntoIter<T, G> {}

/// A bidirectional cursor over the bottom level of a [`SkipList`].
///
/// The cursor sits between two elements: `next` returns the element after it
/// and moves forward, `previous` moves back and returns the element it passed.
/// Nodes carry no back links, so `previous` walks from the front of the list
/// again.
///
/// The cursor only reads the list. `set`, `add` and `remove` always fail with
/// [`SkipListError::Unsupported`].
#[derive(Clone)]
pub struct ListIter<'a, T> {
    nodes: &'a [Option<Node<T>>],
    first: Link,
    len: usize,
    current: Link,
    index: usize,
}

#[allow(clippy::should_implement_trait)]
impl<'a, T> ListIter<'a, T> {
    pub(crate) fn new(nodes: &'a [Option<Node<T>>], first: Link, len: usize) -> Self {
        ListIter {
            nodes,
            first,
            len,
            current: first,
            index: 0,
        }
    }

    /// Position the cursor before `index`, negative values count back from
    /// the end. Fails when `|index| >= len`.
    pub(crate) fn at(
        nodes: &'a [Option<Node<T>>],
        first: Link,
        len: usize,
        index: isize,
    ) -> Result<Self> {
        if index.unsigned_abs() >= len {
            return Err(SkipListError::index_out_of_bounds(index, len));
        }
        let index = if index < 0 {
            len - index.unsigned_abs()
        } else {
            index.unsigned_abs()
        };

        let mut cursor = Self::new(nodes, first, len);
        cursor.index = index;
        cursor.current = cursor.walk(index);
        Ok(cursor)
    }

    fn walk(&self, hops: usize) -> Link {
        let mut link = self.first;
        for _ in 0..hops {
            link = resolve(self.nodes, link).and_then(|node| node.next(0));
        }
        link
    }

    pub fn has_next(&self) -> bool {
        self.index < self.len
    }

    /// Return the element after the cursor and step over it.
    pub fn next(&mut self) -> Result<&'a T> {
        if !self.has_next() {
            return Err(SkipListError::NoSuchElement);
        }
        let node = resolve(self.nodes, self.current).ok_or(SkipListError::NoSuchElement)?;
        self.current = node.next(0);
        self.index += 1;
        Ok(node.value())
    }

    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    /// Step back over the element before the cursor and return it. A
    /// following `next` returns the same element.
    pub fn previous(&mut self) -> Result<&'a T> {
        if !self.has_previous() {
            return Err(SkipListError::NoSuchElement);
        }
        self.index -= 1;
        self.current = self.walk(self.index);
        resolve(self.nodes, self.current)
            .map(|node| node.value())
            .ok_or(SkipListError::NoSuchElement)
    }

    /// The position after the element `next` would return, or `len` once the
    /// cursor is exhausted.
    pub fn next_index(&self) -> usize {
        if self.has_next() {
            self.index + 1
        } else {
            self.len
        }
    }

    /// The position of the element `previous` would return, if any.
    pub fn previous_index(&self) -> Option<usize> {
        if self.has_previous() {
            Some(self.index - 1)
        } else {
            None
        }
    }

    pub fn set(&mut self, _value: T) -> Result<()> {
        Err(SkipListError::Unsupported("set through a cursor"))
    }

    pub fn add(&mut self, _value: T) -> Result<()> {
        Err(SkipListError::Unsupported("add through a cursor"))
    }

    pub fn remove(&mut self) -> Result<()> {
        Err(SkipListError::Unsupported("remove through a cursor"))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::Config,
        errs::SkipListError,
        skiplist::list::SkipList,
    };

    fn build() -> SkipList<i32> {
        let mut list = SkipList::with_config(Config::default().with_seed(99)).unwrap();
        list.add_all(vec![5, 10, 20, 30]);
        list
    }

    #[test]
    fn test_iter() {
        let list = build();
        let mut iter = list.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(&5));
        assert_eq!(iter.size_hint(), (3, Some(3)));
        assert_eq!(iter.collect::<Vec<_>>(), vec![&10, &20, &30]);
        assert_eq!((&list).into_iter().count(), 4);
    }

    #[test]
    fn test_into_iter() {
        let mut iter = build().into_iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(5));
        assert_eq!(iter.collect::<Vec<_>>(), vec![10, 20, 30]);
    }

    #[test]
    fn test_list_iter_forward() {
        let list = build();
        let mut it = list.list_iter();
        assert!(!it.has_previous());
        assert_eq!(it.previous_index(), None);
        assert_eq!(it.next(), Ok(&5));
        assert_eq!(it.next(), Ok(&10));
        assert!(it.has_next());
        assert_eq!(it.next(), Ok(&20));
        assert_eq!(it.next(), Ok(&30));
        assert!(!it.has_next());
        assert_eq!(it.next(), Err(SkipListError::NoSuchElement));
        assert_eq!(it.next_index(), list.len());
    }

    #[test]
    fn test_list_iter_previous_then_next() {
        let list = build();
        let mut it = list.list_iter();
        it.next().unwrap();
        it.next().unwrap();
        let back = it.previous().unwrap();
        let forward = it.next().unwrap();
        assert_eq!(back, forward);
        assert_eq!(forward, &10);
        assert_eq!(it.next(), Ok(&20));
        assert_eq!(it.next(), Ok(&30));
        assert_eq!(it.next(), Err(SkipListError::NoSuchElement));
    }

    #[test]
    fn test_list_iter_at() {
        let list = build();
        assert!(matches!(list.list_iter_at(100), Err(SkipListError::OutOfBounds(_))));
        assert!(matches!(list.list_iter_at(4), Err(SkipListError::OutOfBounds(_))));
        assert!(matches!(list.list_iter_at(-4), Err(SkipListError::OutOfBounds(_))));

        let mut it = list.list_iter_at(1).unwrap();
        assert!(it.has_previous());
        assert_eq!(it.previous_index(), Some(0));
        assert_eq!(it.previous(), Ok(&5));
        assert!(!it.has_previous());
        assert_eq!(it.previous_index(), None);
        assert_eq!(it.previous(), Err(SkipListError::NoSuchElement));
        assert_eq!(it.next(), Ok(&5));
        assert_eq!(it.next(), Ok(&10));
    }

    #[test]
    fn test_list_iter_negative_index() {
        let list = build();
        let mut it = list.list_iter_at(-1).unwrap();
        assert_eq!(it.next(), Ok(&30));
        assert!(!it.has_next());

        let mut it = list.list_iter_at(-3).unwrap();
        assert_eq!(it.previous_index(), Some(0));
        assert_eq!(it.next(), Ok(&10));
    }

    #[test]
    fn test_next_index() {
        let list = build();
        let mut it = list.list_iter();
        assert_eq!(it.next_index(), 1);
        it.next().unwrap();
        assert_eq!(it.next_index(), 2);
        it.next().unwrap();
        it.next().unwrap();
        assert_eq!(it.next_index(), 4);
        it.next().unwrap();
        assert_eq!(it.next_index(), 4);
    }

    #[test]
    fn test_list_iter_on_empty() {
        let list: SkipList<i32> = SkipList::new();
        let mut it = list.list_iter();
        assert!(!it.has_next());
        assert_eq!(it.next(), Err(SkipListError::NoSuchElement));
        assert!(matches!(list.list_iter_at(0), Err(SkipListError::OutOfBounds(_))));
    }

    #[test]
    fn test_cursor_mutators_unsupported() {
        let list = build();
        let mut it = list.list_iter();
        assert!(matches!(it.set(1), Err(SkipListError::Unsupported(_))));
        assert!(matches!(it.add(1), Err(SkipListError::Unsupported(_))));
        assert!(matches!(it.remove(), Err(SkipListError::Unsupported(_))));
        assert_eq!(it.next(), Ok(&5));
    }
}
