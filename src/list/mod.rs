//! A sequential container with positional access.
//!
//! [`PositionalList`] stores its elements in a doubly linked chain between a
//! header and a trailer sentinel. Every element is reached through a
//! [`Position`] which stays valid until the element is deleted, regardless of
//! insertions and deletions elsewhere in the list.
mod base;

use std::fmt::{self, Debug};
use std::iter::FusedIterator;

use base::{DoublyLinkedBase, Link};

use crate::{ContainerId, NodeKey, PositionError};

/// Location of a single element in a [`PositionalList`].
///
/// Two positions are equal when they refer to the same element of the same
/// list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    container: ContainerId,
    node: NodeKey,
}

/// A doubly linked list whose elements are addressed by [`Position`]s.
///
/// # Example
///
/// ```
/// # use positional::PositionalList;
/// let mut list = PositionalList::new();
/// let b = list.add_first('b');
/// list.add_before(b, 'a').unwrap();
/// list.add_after(b, 'c').unwrap();
///
/// assert!(list.iter().eq(&['a', 'b', 'c']));
/// assert_eq!(list.delete(b), Ok('b'));
/// assert!(list.delete(b).is_err());
/// ```
pub struct PositionalList<T> {
    base: DoublyLinkedBase<T>,
    id: ContainerId,
}

impl<T> PositionalList<T> {
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty list with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            base: DoublyLinkedBase::with_capacity(capacity),
            id: ContainerId::fresh(),
        }
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.base.len()
    }

    /// Returns whether the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the node behind a position, or the reason it can not be used.
    fn validate(&self, p: Position) -> Result<NodeKey, PositionError> {
        if p.container != self.id {
            Err(PositionError::ForeignContainer)
        } else if !self.base.contains(p.node) {
            Err(PositionError::Invalidated)
        } else {
            Ok(p.node)
        }
    }

    /// Wraps a link into a position, mapping the sentinels to `None`.
    fn make_position(&self, link: Link) -> Option<Position> {
        match link {
            Link::Node(node) => Some(Position {
                container: self.id,
                node,
            }),
            Link::Header | Link::Trailer => None,
        }
    }

    /// Returns the first position, or `None` if the list is empty.
    #[inline]
    pub fn first(&self) -> Option<Position> {
        self.make_position(self.base.next(Link::Header))
    }

    /// Returns the last position, or `None` if the list is empty.
    #[inline]
    pub fn last(&self) -> Option<Position> {
        self.make_position(self.base.prev(Link::Trailer))
    }

    /// Returns the position just before `p`, or `None` if `p` is first.
    pub fn before(&self, p: Position) -> Result<Option<Position>, PositionError> {
        let node = self.validate(p)?;
        Ok(self.make_position(self.base.prev(Link::Node(node))))
    }

    /// Returns the position just after `p`, or `None` if `p` is last.
    pub fn after(&self, p: Position) -> Result<Option<Position>, PositionError> {
        let node = self.validate(p)?;
        Ok(self.make_position(self.base.next(Link::Node(node))))
    }

    /// Borrows the element at `p`.
    pub fn element(&self, p: Position) -> Result<&T, PositionError> {
        let node = self.validate(p)?;
        self.base.element(node).ok_or(PositionError::Invalidated)
    }

    /// Mutably borrows the element at `p`.
    pub fn element_mut(&mut self, p: Position) -> Result<&mut T, PositionError> {
        let node = self.validate(p)?;
        self.base.element_mut(node).ok_or(PositionError::Invalidated)
    }

    fn insert_between(&mut self, element: T, predecessor: Link, successor: Link) -> Position {
        let node = self.base.insert_between(element, predecessor, successor);
        Position {
            container: self.id,
            node,
        }
    }

    /// Inserts an element at the front of the list.
    pub fn add_first(&mut self, element: T) -> Position {
        let successor = self.base.next(Link::Header);
        self.insert_between(element, Link::Header, successor)
    }

    /// Inserts an element at the back of the list.
    pub fn add_last(&mut self, element: T) -> Position {
        let predecessor = self.base.prev(Link::Trailer);
        self.insert_between(element, predecessor, Link::Trailer)
    }

    /// Inserts an element just before `p`.
    pub fn add_before(&mut self, p: Position, element: T) -> Result<Position, PositionError> {
        let node = self.validate(p)?;
        let predecessor = self.base.prev(Link::Node(node));
        Ok(self.insert_between(element, predecessor, Link::Node(node)))
    }

    /// Inserts an element just after `p`.
    pub fn add_after(&mut self, p: Position, element: T) -> Result<Position, PositionError> {
        let node = self.validate(p)?;
        let successor = self.base.next(Link::Node(node));
        Ok(self.insert_between(element, Link::Node(node), successor))
    }

    /// Removes and returns the element at `p`.
    ///
    /// `p`, and every copy of it, is invalid afterwards.
    pub fn delete(&mut self, p: Position) -> Result<T, PositionError> {
        let node = self.validate(p)?;
        log::trace!("deleting list node {:?}", node.index());
        self.base.delete_node(node).ok_or(PositionError::Invalidated)
    }

    /// Replaces the element at `p`, returning the former element.
    pub fn replace(&mut self, p: Position, element: T) -> Result<T, PositionError> {
        let slot = self.element_mut(p)?;
        Ok(std::mem::replace(slot, element))
    }

    /// Iterates over the elements from first to last.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            positions: self.positions(),
        }
    }

    /// Iterates over the positions from first to last.
    #[inline]
    pub fn positions(&self) -> Positions<'_, T> {
        Positions {
            list: self,
            front: self.base.next(Link::Header),
            back: self.base.prev(Link::Trailer),
            len: self.len(),
        }
    }
}

impl<T> Default for PositionalList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for PositionalList<T> {
    /// Clones the elements into a list with a new identity.
    ///
    /// Positions of the original list are foreign to the clone.
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            id: ContainerId::fresh(),
        }
    }
}

impl<T: Debug> Debug for PositionalList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for PositionalList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut list = Self::with_capacity(iter.size_hint().0);
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for PositionalList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add_last(element);
        }
    }
}

impl<'a, T> IntoIterator for &'a PositionalList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator created by [`PositionalList::positions`].
pub struct Positions<'a, T> {
    list: &'a PositionalList<T>,
    front: Link,
    back: Link,
    len: usize,
}

impl<'a, T> Iterator for Positions<'a, T> {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;
        let current = self.front;
        self.front = self.list.base.next(current);
        self.list.make_position(current)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Positions<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;
        let current = self.back;
        self.back = self.list.base.prev(current);
        self.list.make_position(current)
    }
}

impl<'a, T> ExactSizeIterator for Positions<'a, T> {
    #[inline(always)]
    fn len(&self) -> usize {
        self.len
    }
}

impl<'a, T> FusedIterator for Positions<'a, T> {}

/// Iterator created by [`PositionalList::iter`].
pub struct Iter<'a, T> {
    positions: Positions<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let list = self.positions.list;
        list.element(self.positions.next()?).ok()
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let list = self.positions.list;
        list.element(self.positions.next_back()?).ok()
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}
impl<'a, T> FusedIterator for Iter<'a, T> {}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    type ListOp = fn(&mut PositionalList<char>, Position) -> Result<(), PositionError>;

    fn abc() -> (PositionalList<char>, [Position; 3]) {
        let mut list = PositionalList::new();
        let a = list.add_last('a');
        let b = list.add_last('b');
        let c = list.add_last('c');
        (list, [a, b, c])
    }

    #[test]
    fn empty_list_has_no_ends() {
        let list = PositionalList::<u8>::new();
        assert!(list.is_empty());
        assert_eq!(list.first(), None);
        assert_eq!(list.last(), None);
        assert_eq!(list.iter().next(), None);
    }

    #[test]
    fn neighbours_stop_at_sentinels() {
        let (list, [a, b, c]) = abc();
        assert_eq!(list.first(), Some(a));
        assert_eq!(list.last(), Some(c));
        assert_eq!(list.before(a), Ok(None));
        assert_eq!(list.after(a), Ok(Some(b)));
        assert_eq!(list.before(c), Ok(Some(b)));
        assert_eq!(list.after(c), Ok(None));
    }

    #[test]
    fn insert_relative_to_positions() {
        let (mut list, [a, _, c]) = abc();
        list.add_after(a, 'x').unwrap();
        list.add_before(c, 'y').unwrap();
        list.add_first('0');
        assert!(list.iter().eq(&['0', 'a', 'x', 'b', 'y', 'c']));
        assert!(list.iter().rev().eq(&['c', 'y', 'b', 'x', 'a', '0']));
        assert_eq!(list.len(), 6);
    }

    #[test]
    fn replace_keeps_position_valid() {
        let (mut list, [_, b, _]) = abc();
        assert_eq!(list.replace(b, 'z'), Ok('b'));
        assert_eq!(list.element(b), Ok(&'z'));
        *list.element_mut(b).unwrap() = 'w';
        assert_eq!(format!("{list:?}"), "['a', 'w', 'c']");
    }

    #[rstest]
    #[case::before(|l: &mut PositionalList<char>, p: Position| l.before(p).map(drop))]
    #[case::after(|l: &mut PositionalList<char>, p: Position| l.after(p).map(drop))]
    #[case::element(|l: &mut PositionalList<char>, p: Position| l.element(p).map(drop))]
    #[case::element_mut(|l: &mut PositionalList<char>, p: Position| l.element_mut(p).map(drop))]
    #[case::add_before(|l: &mut PositionalList<char>, p: Position| l.add_before(p, '!').map(drop))]
    #[case::add_after(|l: &mut PositionalList<char>, p: Position| l.add_after(p, '!').map(drop))]
    #[case::replace(|l: &mut PositionalList<char>, p: Position| l.replace(p, '!').map(drop))]
    #[case::delete(|l: &mut PositionalList<char>, p: Position| l.delete(p).map(drop))]
    fn stale_positions_are_rejected(#[case] op: ListOp) {
        let (mut list, [_, b, _]) = abc();
        list.delete(b).unwrap();
        // Reuse the freed slot so that only the generation tells the nodes apart.
        list.add_first('n');

        assert_eq!(op(&mut list, b), Err(PositionError::Invalidated));
        assert_eq!(list.len(), 3);
    }

    #[rstest]
    #[case::before(|l: &mut PositionalList<char>, p: Position| l.before(p).map(drop))]
    #[case::add_after(|l: &mut PositionalList<char>, p: Position| l.add_after(p, '!').map(drop))]
    #[case::delete(|l: &mut PositionalList<char>, p: Position| l.delete(p).map(drop))]
    fn foreign_positions_are_rejected(#[case] op: ListOp) {
        let (_, [a, _, _]) = abc();
        let (mut other, _) = abc();
        assert_eq!(op(&mut other, a), Err(PositionError::ForeignContainer));
    }

    #[test]
    fn clone_has_its_own_identity() {
        let (list, [a, _, _]) = abc();
        let copy = list.clone();
        assert!(copy.iter().eq(list.iter()));
        assert_eq!(copy.element(a), Err(PositionError::ForeignContainer));
    }

    #[derive(Debug, Clone)]
    enum Op {
        AddFirst(u8),
        AddLast(u8),
        AddBefore(usize, u8),
        AddAfter(usize, u8),
        Delete(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<u8>().prop_map(Op::AddFirst),
            any::<u8>().prop_map(Op::AddLast),
            (any::<usize>(), any::<u8>()).prop_map(|(i, e)| Op::AddBefore(i, e)),
            (any::<usize>(), any::<u8>()).prop_map(|(i, e)| Op::AddAfter(i, e)),
            any::<usize>().prop_map(Op::Delete),
        ]
    }

    proptest! {
        #[test]
        fn matches_vec_model(ops in proptest::collection::vec(op(), 0..64)) {
            let mut list = PositionalList::new();
            // Live positions in chain order, mirrored by their elements.
            let mut model: Vec<(Position, u8)> = Vec::new();
            let mut dead: Vec<Position> = Vec::new();

            for op in ops {
                match op {
                    Op::AddFirst(e) => model.insert(0, (list.add_first(e), e)),
                    Op::AddLast(e) => model.push((list.add_last(e), e)),
                    Op::AddBefore(i, e) if !model.is_empty() => {
                        let i = i % model.len();
                        let p = list.add_before(model[i].0, e).unwrap();
                        model.insert(i, (p, e));
                    }
                    Op::AddAfter(i, e) if !model.is_empty() => {
                        let i = i % model.len();
                        let p = list.add_after(model[i].0, e).unwrap();
                        model.insert(i + 1, (p, e));
                    }
                    Op::Delete(i) if !model.is_empty() => {
                        let (p, e) = model.remove(i % model.len());
                        prop_assert_eq!(list.delete(p), Ok(e));
                        dead.push(p);
                    }
                    _ => {}
                }

                prop_assert_eq!(list.len(), model.len());
            }

            prop_assert!(list.iter().copied().eq(model.iter().map(|(_, e)| *e)));
            prop_assert!(list.positions().eq(model.iter().map(|(p, _)| *p)));

            let mut walk = list.first();
            let mut visited = 0;
            while let Some(p) = walk {
                visited += 1;
                walk = list.after(p).unwrap();
            }
            prop_assert_eq!(visited, model.len());

            for p in dead {
                prop_assert_eq!(list.element(p), Err(PositionError::Invalidated));
            }
        }
    }
}
