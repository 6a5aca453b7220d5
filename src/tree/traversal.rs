use std::collections::VecDeque;
use std::iter::FusedIterator;

use super::Tree;

/// Pushes the children of `p` so that the first child is popped first.
fn push_children_reversed<T, U>(
    tree: &T,
    p: T::Position,
    stack: &mut Vec<U>,
    f: impl Fn(T::Position) -> U,
) where
    T: Tree + ?Sized,
{
    let start = stack.len();

    if let Ok(children) = tree.children(p) {
        stack.extend(children.map(f));
    }

    stack[start..].reverse();
}

/// Iterator created by [`Tree::preorder`].
pub struct Preorder<'a, T: Tree + ?Sized> {
    tree: &'a T,
    stack: Vec<T::Position>,
}

impl<'a, T: Tree + ?Sized> Preorder<'a, T> {
    pub(super) fn new(tree: &'a T) -> Self {
        Self {
            tree,
            stack: tree.root().into_iter().collect(),
        }
    }
}

impl<'a, T: Tree + ?Sized> Iterator for Preorder<'a, T> {
    type Item = T::Position;

    fn next(&mut self) -> Option<Self::Item> {
        let p = self.stack.pop()?;
        push_children_reversed(self.tree, p, &mut self.stack, |child| child);
        Some(p)
    }
}

impl<'a, T: Tree + ?Sized> FusedIterator for Preorder<'a, T> {}

/// Iterator created by [`Tree::postorder`].
pub struct Postorder<'a, T: Tree + ?Sized> {
    tree: &'a T,
    /// Pending positions, flagged once their children have been pushed.
    stack: Vec<(T::Position, bool)>,
}

impl<'a, T: Tree + ?Sized> Postorder<'a, T> {
    pub(super) fn new(tree: &'a T) -> Self {
        Self {
            tree,
            stack: tree.root().map(|root| (root, false)).into_iter().collect(),
        }
    }
}

impl<'a, T: Tree + ?Sized> Iterator for Postorder<'a, T> {
    type Item = T::Position;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (p, expanded) = self.stack.pop()?;

            if expanded {
                return Some(p);
            }

            self.stack.push((p, true));
            push_children_reversed(self.tree, p, &mut self.stack, |child| (child, false));
        }
    }
}

impl<'a, T: Tree + ?Sized> FusedIterator for Postorder<'a, T> {}

/// Iterator created by [`Tree::breadth_first`].
pub struct BreadthFirst<'a, T: Tree + ?Sized> {
    tree: &'a T,
    fringe: VecDeque<T::Position>,
}

impl<'a, T: Tree + ?Sized> BreadthFirst<'a, T> {
    pub(super) fn new(tree: &'a T) -> Self {
        Self {
            tree,
            fringe: tree.root().into_iter().collect(),
        }
    }
}

impl<'a, T: Tree + ?Sized> Iterator for BreadthFirst<'a, T> {
    type Item = T::Position;

    fn next(&mut self) -> Option<Self::Item> {
        let p = self.fringe.pop_front()?;

        if let Ok(children) = self.tree.children(p) {
            self.fringe.extend(children);
        }

        Some(p)
    }
}

impl<'a, T: Tree + ?Sized> FusedIterator for BreadthFirst<'a, T> {}

/// Iterator created by [`Tree::elements`].
pub struct Elements<'a, T: Tree + ?Sized> {
    tree: &'a T,
    positions: Box<dyn Iterator<Item = T::Position> + 'a>,
}

impl<'a, T: Tree + ?Sized> Elements<'a, T> {
    pub(super) fn new(tree: &'a T) -> Self {
        Self {
            tree,
            positions: tree.positions(),
        }
    }
}

impl<'a, T: Tree + ?Sized> Iterator for Elements<'a, T> {
    type Item = &'a T::Element;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        tree.element(self.positions.next()?).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}
