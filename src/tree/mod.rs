//! Tree interfaces and their traversals.
//!
//! [`Tree`] captures the minimal capability set of an ordered rooted tree.
//! Everything else, from depth and height to the traversal iterators, is
//! written once against that interface. [`BinaryTree`] refines it with left
//! and right children, which adds inorder traversal and successor queries.
mod binary;
mod linked;
mod traversal;

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

pub use binary::{BinaryChildren, BinaryTree, Inorder};
pub use linked::{LinkedBinaryTree, Position, TreeError};
pub use traversal::{BreadthFirst, Elements, Postorder, Preorder};

use crate::PositionError;

/// An ordered rooted tree whose nodes are addressed by positions.
pub trait Tree {
    /// Handle to a node of the tree.
    type Position: Copy + Eq + Hash + Debug;

    /// Type of the elements stored at the nodes.
    type Element;

    /// Iterator created by [`Tree::children`].
    type Children<'a>: Iterator<Item = Self::Position>
    where
        Self: 'a;

    /// Returns the root, or `None` if the tree is empty.
    fn root(&self) -> Option<Self::Position>;

    /// Returns the parent of `p`, or `None` if `p` is the root.
    fn parent(&self, p: Self::Position) -> Result<Option<Self::Position>, PositionError>;

    /// Returns the number of children of `p`.
    fn num_children(&self, p: Self::Position) -> Result<usize, PositionError>;

    /// Iterates over the children of `p` in order.
    fn children(&self, p: Self::Position) -> Result<Self::Children<'_>, PositionError>;

    /// Returns the number of nodes in the tree.
    fn len(&self) -> usize;

    /// Borrows the element stored at `p`.
    fn element(&self, p: Self::Position) -> Result<&Self::Element, PositionError>;

    /// Returns whether `p` is the root of the tree.
    #[inline]
    fn is_root(&self, p: Self::Position) -> Result<bool, PositionError> {
        Ok(self.parent(p)?.is_none())
    }

    /// Returns whether `p` does not have any children.
    #[inline]
    fn is_leaf(&self, p: Self::Position) -> Result<bool, PositionError> {
        Ok(self.num_children(p)? == 0)
    }

    /// Returns whether the tree has no nodes.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of ancestors of `p`, excluding `p` itself.
    fn depth(&self, p: Self::Position) -> Result<usize, PositionError> {
        let mut depth = 0;
        let mut walk = self.parent(p)?;

        while let Some(parent) = walk {
            depth += 1;
            walk = self.parent(parent)?;
        }

        Ok(depth)
    }

    /// Returns the length of the longest downward path from `p` to a leaf.
    ///
    /// Visits every node in the subtree of `p`.
    fn height(&self, p: Self::Position) -> Result<usize, PositionError> {
        let mut height = 0;
        let mut stack = vec![(p, 0)];

        while let Some((p, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(self.children(p)?.map(|child| (child, depth + 1)));
        }

        Ok(height)
    }

    /// Pairs every position with the height of its subtree, in postorder.
    fn heights(&self) -> Vec<(Self::Position, usize)> {
        let mut known = HashMap::with_capacity(self.len());
        let mut heights = Vec::with_capacity(self.len());

        for p in self.postorder() {
            let height = self
                .children(p)
                .into_iter()
                .flatten()
                .filter_map(|child| known.get(&child).map(|h| h + 1))
                .max()
                .unwrap_or(0);

            known.insert(p, height);
            heights.push((p, height));
        }

        heights
    }

    /// Iterates over the positions in the tree's default order.
    ///
    /// This is preorder unless the tree overrides it.
    fn positions(&self) -> Box<dyn Iterator<Item = Self::Position> + '_> {
        Box::new(self.preorder())
    }

    /// Iterates over the elements in the order of [`Tree::positions`].
    #[inline]
    fn elements(&self) -> Elements<'_, Self> {
        Elements::new(self)
    }

    /// Iterates over the positions, each node before its children.
    #[inline]
    fn preorder(&self) -> Preorder<'_, Self> {
        Preorder::new(self)
    }

    /// Iterates over the positions, each node after its children.
    #[inline]
    fn postorder(&self) -> Postorder<'_, Self> {
        Postorder::new(self)
    }

    /// Iterates over the positions level by level.
    #[inline]
    fn breadth_first(&self) -> BreadthFirst<'_, Self> {
        BreadthFirst::new(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// A tree with any number of children per node, stored as parent and
    /// child index lists.
    struct VecTree {
        elements: Vec<char>,
        parents: Vec<Option<usize>>,
        children: Vec<Vec<usize>>,
    }

    impl VecTree {
        fn new(root: char) -> Self {
            Self {
                elements: vec![root],
                parents: vec![None],
                children: vec![Vec::new()],
            }
        }

        fn add(&mut self, parent: usize, element: char) -> usize {
            let node = self.elements.len();
            self.elements.push(element);
            self.parents.push(Some(parent));
            self.children.push(Vec::new());
            self.children[parent].push(node);
            node
        }

        fn check(&self, p: usize) -> Result<usize, PositionError> {
            if p < self.elements.len() {
                Ok(p)
            } else {
                Err(PositionError::Invalidated)
            }
        }
    }

    impl Tree for VecTree {
        type Position = usize;
        type Element = char;
        type Children<'a> = std::iter::Copied<std::slice::Iter<'a, usize>>;

        fn root(&self) -> Option<usize> {
            Some(0)
        }

        fn parent(&self, p: usize) -> Result<Option<usize>, PositionError> {
            Ok(self.parents[self.check(p)?])
        }

        fn num_children(&self, p: usize) -> Result<usize, PositionError> {
            Ok(self.children[self.check(p)?].len())
        }

        fn children(&self, p: usize) -> Result<Self::Children<'_>, PositionError> {
            Ok(self.children[self.check(p)?].iter().copied())
        }

        fn len(&self) -> usize {
            self.elements.len()
        }

        fn element(&self, p: usize) -> Result<&char, PositionError> {
            Ok(&self.elements[self.check(p)?])
        }
    }

    ///   a
    ///  /|\
    /// b c d
    /// |  / \
    /// e f   g
    ///       |
    ///       h
    fn sample() -> VecTree {
        let mut tree = VecTree::new('a');
        let b = tree.add(0, 'b');
        tree.add(0, 'c');
        let d = tree.add(0, 'd');
        tree.add(b, 'e');
        tree.add(d, 'f');
        let g = tree.add(d, 'g');
        tree.add(g, 'h');
        tree
    }

    fn chars<T>(tree: &T, order: impl Iterator<Item = T::Position>) -> String
    where
        T: Tree<Element = char>,
    {
        order.map(|p| *tree.element(p).unwrap()).collect()
    }

    #[test]
    fn traversal_orders() {
        let tree = sample();
        assert_eq!(chars(&tree, tree.preorder()), "abecdfgh");
        assert_eq!(chars(&tree, tree.postorder()), "ebcfhgda");
        assert_eq!(chars(&tree, tree.breadth_first()), "abcdefgh");
        assert_eq!(chars(&tree, tree.positions()), "abecdfgh");
        assert_eq!(tree.elements().collect::<String>(), "abecdfgh");
    }

    #[test]
    fn traversals_restart() {
        let tree = sample();
        let first: Vec<_> = tree.preorder().collect();
        let second: Vec<_> = tree.preorder().collect();
        assert_eq!(first, second);
        assert_eq!(tree.preorder().count(), 8);
    }

    #[test]
    fn depth_and_height() {
        let tree = sample();
        assert_eq!(tree.depth(0), Ok(0));
        assert_eq!(tree.depth(7), Ok(3));
        assert_eq!(tree.height(0), Ok(3));
        assert_eq!(tree.height(3), Ok(2));
        assert_eq!(tree.height(2), Ok(0));
        assert_eq!(tree.is_root(0), Ok(true));
        assert_eq!(tree.is_leaf(2), Ok(true));
        assert_eq!(tree.is_leaf(3), Ok(false));
        assert_eq!(tree.depth(42), Err(PositionError::Invalidated));
    }

    #[test]
    fn heights_in_postorder() {
        let tree = sample();
        let heights: Vec<_> = tree
            .heights()
            .into_iter()
            .map(|(p, h)| (tree.elements[p], h))
            .collect();

        assert_eq!(
            heights,
            [
                ('e', 0),
                ('b', 1),
                ('c', 0),
                ('f', 0),
                ('h', 0),
                ('g', 1),
                ('d', 2),
                ('a', 3)
            ]
        );
    }
}
