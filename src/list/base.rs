use crate::memory::Slab;
use crate::{NodeIndex, NodeKey};

/// Endpoint of a link in the chain.
///
/// The header and trailer sentinels are not stored in the arena. They only
/// carry the single link pointing into the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Link {
    Header,
    Trailer,
    Node(NodeKey),
}

#[derive(Debug, Clone)]
struct ListNode<T> {
    element: T,
    prev: Link,
    next: Link,
}

/// A doubly linked chain of nodes between two sentinels.
///
/// Callers are trusted to pass keys of nodes that are part of the chain;
/// positions are validated one layer up.
#[derive(Debug, Clone)]
pub(crate) struct DoublyLinkedBase<T> {
    nodes: Slab<NodeIndex, ListNode<T>>,
    /// The successor of the header.
    head: Link,
    /// The predecessor of the trailer.
    tail: Link,
}

impl<T> DoublyLinkedBase<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            head: Link::Trailer,
            tail: Link::Header,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn contains(&self, node: NodeKey) -> bool {
        self.nodes.contains(node)
    }

    #[inline]
    pub fn element(&self, node: NodeKey) -> Option<&T> {
        Some(&self.nodes.get(node)?.element)
    }

    #[inline]
    pub fn element_mut(&mut self, node: NodeKey) -> Option<&mut T> {
        Some(&mut self.nodes.get_mut(node)?.element)
    }

    /// Returns the link following `link`. The trailer is its own successor.
    #[inline]
    pub fn next(&self, link: Link) -> Link {
        match link {
            Link::Header => self.head,
            Link::Node(node) => self.nodes[node].next,
            Link::Trailer => Link::Trailer,
        }
    }

    /// Returns the link preceding `link`. The header is its own predecessor.
    #[inline]
    pub fn prev(&self, link: Link) -> Link {
        match link {
            Link::Trailer => self.tail,
            Link::Node(node) => self.nodes[node].prev,
            Link::Header => Link::Header,
        }
    }

    fn set_next(&mut self, link: Link, next: Link) {
        match link {
            Link::Header => self.head = next,
            Link::Node(node) => self.nodes[node].next = next,
            Link::Trailer => unreachable!("the trailer has no successor"),
        }
    }

    fn set_prev(&mut self, link: Link, prev: Link) {
        match link {
            Link::Trailer => self.tail = prev,
            Link::Node(node) => self.nodes[node].prev = prev,
            Link::Header => unreachable!("the header has no predecessor"),
        }
    }

    /// Adds an element between two adjacent links and returns its node.
    pub fn insert_between(&mut self, element: T, predecessor: Link, successor: Link) -> NodeKey {
        debug_assert_eq!(self.next(predecessor), successor);

        let node = self.nodes.insert(ListNode {
            element,
            prev: predecessor,
            next: successor,
        });

        self.set_next(predecessor, Link::Node(node));
        self.set_prev(successor, Link::Node(node));
        node
    }

    /// Unlinks a node from its neighbours and frees it, returning its element.
    ///
    /// Returns `None` when the node is not part of the chain.
    pub fn delete_node(&mut self, node: NodeKey) -> Option<T> {
        let ListNode {
            element,
            prev,
            next,
        } = self.nodes.remove(node)?;

        self.set_next(prev, next);
        self.set_prev(next, prev);
        Some(element)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn collect<T: Copy>(base: &DoublyLinkedBase<T>) -> Vec<T> {
        let mut out = Vec::new();
        let mut link = base.next(Link::Header);

        while let Link::Node(node) = link {
            out.push(*base.element(node).unwrap());
            link = base.next(link);
        }

        out
    }

    #[test]
    fn insert_and_delete_between_sentinels() {
        let mut base = DoublyLinkedBase::with_capacity(0);
        let b = base.insert_between('b', Link::Header, Link::Trailer);
        let a = base.insert_between('a', Link::Header, Link::Node(b));
        let c = base.insert_between('c', Link::Node(b), Link::Trailer);

        assert_eq!(collect(&base), ['a', 'b', 'c']);
        assert_eq!(base.prev(Link::Trailer), Link::Node(c));
        assert_eq!(base.len(), 3);

        assert_eq!(base.delete_node(b), Some('b'));
        assert_eq!(base.delete_node(b), None);
        assert_eq!(base.next(Link::Node(a)), Link::Node(c));
        assert_eq!(base.prev(Link::Node(c)), Link::Node(a));

        base.delete_node(a);
        base.delete_node(c);
        assert_eq!(base.next(Link::Header), Link::Trailer);
        assert_eq!(base.prev(Link::Trailer), Link::Header);
        assert_eq!(base.len(), 0);
    }
}
