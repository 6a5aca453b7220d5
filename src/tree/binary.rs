use std::iter::{Flatten, FusedIterator};

use super::Tree;
use crate::PositionError;

/// Children iterator of binary trees: the left child, then the right child,
/// skipping absent ones.
pub type BinaryChildren<P> = Flatten<std::array::IntoIter<Option<P>, 2>>;

/// A tree in which every node has at most a left and a right child.
///
/// Binary trees list their positions in inorder. Implementors should override
/// [`Tree::positions`] to return [`BinaryTree::inorder`], as
/// [`LinkedBinaryTree`](super::LinkedBinaryTree) does.
pub trait BinaryTree: Tree {
    /// Returns the left child of `p`, if any.
    fn left(&self, p: Self::Position) -> Result<Option<Self::Position>, PositionError>;

    /// Returns the right child of `p`, if any.
    fn right(&self, p: Self::Position) -> Result<Option<Self::Position>, PositionError>;

    /// Returns the other child of `p`'s parent.
    ///
    /// Returns `None` if `p` is the root or an only child.
    fn sibling(&self, p: Self::Position) -> Result<Option<Self::Position>, PositionError> {
        let Some(parent) = self.parent(p)? else {
            return Ok(None);
        };

        if self.left(parent)? == Some(p) {
            self.right(parent)
        } else {
            self.left(parent)
        }
    }

    /// Iterates over the positions, each node between its left and right
    /// subtrees.
    #[inline]
    fn inorder(&self) -> Inorder<'_, Self> {
        Inorder::new(self)
    }

    /// Returns the position following `p` in inorder, or `None` if `p` is the
    /// last one.
    ///
    /// # Example
    ///
    /// ```
    /// # use positional::{BinaryTree, LinkedBinaryTree, Tree};
    /// let tree = LinkedBinaryTree::from_level_order([Some(1), Some(2), Some(3)]);
    /// let root = tree.root().unwrap();
    /// let left = tree.left(root).unwrap().unwrap();
    ///
    /// assert_eq!(tree.inorder_next(left), Ok(Some(root)));
    /// ```
    fn inorder_next(&self, p: Self::Position) -> Result<Option<Self::Position>, PositionError> {
        if let Some(right) = self.right(p)? {
            return leftmost(self, right).map(Some);
        }

        let mut walk = p;
        let mut parent = self.parent(walk)?;

        while let Some(ancestor) = parent {
            if self.right(ancestor)? != Some(walk) {
                break;
            }

            walk = ancestor;
            parent = self.parent(walk)?;
        }

        Ok(parent)
    }

    /// Returns the position following `p` in postorder, or `None` if `p` is
    /// the root.
    fn postorder_next(&self, p: Self::Position) -> Result<Option<Self::Position>, PositionError> {
        let Some(parent) = self.parent(p)? else {
            return Ok(None);
        };

        if self.left(parent)? == Some(p) {
            if let Some(right) = self.right(parent)? {
                return first_in_postorder(self, right).map(Some);
            }
        }

        Ok(Some(parent))
    }
}

/// Descends along left children.
fn leftmost<T>(tree: &T, mut p: T::Position) -> Result<T::Position, PositionError>
where
    T: BinaryTree + ?Sized,
{
    while let Some(left) = tree.left(p)? {
        p = left;
    }

    Ok(p)
}

/// Descends to the first node of `p`'s subtree in postorder, preferring left
/// children over right ones until reaching a leaf.
fn first_in_postorder<T>(tree: &T, mut p: T::Position) -> Result<T::Position, PositionError>
where
    T: BinaryTree + ?Sized,
{
    loop {
        match (tree.left(p)?, tree.right(p)?) {
            (Some(next), _) | (None, Some(next)) => p = next,
            (None, None) => return Ok(p),
        }
    }
}

/// Iterator created by [`BinaryTree::inorder`].
pub struct Inorder<'a, T: BinaryTree + ?Sized> {
    tree: &'a T,
    /// Positions whose left subtree is being visited.
    stack: Vec<T::Position>,
}

impl<'a, T: BinaryTree + ?Sized> Inorder<'a, T> {
    fn new(tree: &'a T) -> Self {
        let mut inorder = Self {
            tree,
            stack: Vec::new(),
        };

        if let Some(root) = tree.root() {
            inorder.push_left_spine(root);
        }

        inorder
    }

    fn push_left_spine(&mut self, mut p: T::Position) {
        loop {
            self.stack.push(p);

            match self.tree.left(p) {
                Ok(Some(left)) => p = left,
                _ => break,
            }
        }
    }
}

impl<'a, T: BinaryTree + ?Sized> Iterator for Inorder<'a, T> {
    type Item = T::Position;

    fn next(&mut self) -> Option<Self::Item> {
        let p = self.stack.pop()?;

        if let Ok(Some(right)) = self.tree.right(p) {
            self.push_left_spine(right);
        }

        Some(p)
    }
}

impl<'a, T: BinaryTree + ?Sized> FusedIterator for Inorder<'a, T> {}
