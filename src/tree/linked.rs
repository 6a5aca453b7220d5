use std::collections::{BTreeMap, VecDeque};

use thiserror::Error;

use super::{BinaryChildren, BinaryTree, Tree};
use crate::memory::Slab;
use crate::{ContainerId, NodeIndex, NodeKey, PositionError};

type NodeMap = BTreeMap<NodeKey, NodeKey>;

/// Location of a node in a [`LinkedBinaryTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    container: ContainerId,
    node: NodeKey,
}

/// Which child slot of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left = 0,
    Right = 1,
}

impl Side {
    const ALL: [Side; 2] = [Side::Left, Side::Right];

    #[inline(always)]
    fn index(self) -> usize {
        self as usize
    }

    fn occupied(self) -> TreeError {
        match self {
            Side::Left => TreeError::LeftOccupied,
            Side::Right => TreeError::RightOccupied,
        }
    }
}

#[derive(Debug, Clone)]
struct Node<T> {
    element: T,
    parent: Option<NodeKey>,
    /// The left and right child, indexed by `Side`.
    children: [Option<NodeKey>; 2],
}

impl<T> Node<T> {
    fn new(element: T, parent: Option<NodeKey>) -> Self {
        Self {
            element,
            parent,
            children: [None; 2],
        }
    }

    fn relink(&mut self, node_map: &NodeMap) {
        self.parent = self.parent.and_then(|node| node_map.get(&node)).copied();

        for child in &mut self.children {
            *child = child.and_then(|node| node_map.get(&node)).copied();
        }
    }
}

/// A binary tree of nodes linked to their parent and children.
///
/// # Example
///
/// ```
/// # use positional::{LinkedBinaryTree, Tree};
/// let mut tree = LinkedBinaryTree::new();
/// let root = tree.add_root('+').unwrap();
/// tree.add_left(root, '1').unwrap();
/// tree.add_right(root, '2').unwrap();
///
/// assert!(tree.add_left(root, '3').is_err());
/// assert_eq!(tree.elements().collect::<String>(), "1+2");
/// ```
#[derive(Debug)]
pub struct LinkedBinaryTree<T> {
    nodes: Slab<NodeIndex, Node<T>>,
    root: Option<NodeKey>,
    id: ContainerId,
}

impl<T> LinkedBinaryTree<T> {
    /// Creates a new empty tree.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty tree with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            root: None,
            id: ContainerId::fresh(),
        }
    }

    /// Builds a tree from its level order listing.
    ///
    /// `None` marks an absent child. Absent nodes have no entries for their
    /// own children, and values left over once every node has been given its
    /// children are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// # use positional::{BinaryTree, LinkedBinaryTree, Tree};
    /// let tree = LinkedBinaryTree::from_level_order([Some(1), Some(2), Some(3), None, Some(4)]);
    /// let root = tree.root().unwrap();
    /// let two = tree.left(root).unwrap().unwrap();
    ///
    /// assert_eq!(tree.len(), 4);
    /// assert_eq!(tree.left(two), Ok(None));
    /// assert!(tree.elements().eq(&[2, 4, 1, 3]));
    /// ```
    pub fn from_level_order(values: impl IntoIterator<Item = Option<T>>) -> Self {
        let mut values = values.into_iter();
        let mut tree = Self::with_capacity(values.size_hint().0);

        let Some(Some(root)) = values.next() else {
            return tree;
        };

        let root = tree.nodes.insert(Node::new(root, None));
        tree.root = Some(root);
        let mut queue = VecDeque::from([root]);

        while let Some(node) = queue.pop_front() {
            for side in Side::ALL {
                let Some(value) = values.next() else {
                    return tree;
                };

                if let Some(element) = value {
                    queue.push_back(tree.insert_child(node, side, element));
                }
            }
        }

        tree
    }

    /// Returns the node behind a position, or the reason it can not be used.
    fn validate(&self, p: Position) -> Result<NodeKey, PositionError> {
        if p.container != self.id {
            Err(PositionError::ForeignContainer)
        } else if !self.nodes.contains(p.node) {
            Err(PositionError::Invalidated)
        } else {
            Ok(p.node)
        }
    }

    #[inline]
    fn make_position(&self, node: Option<NodeKey>) -> Option<Position> {
        node.map(|node| Position {
            container: self.id,
            node,
        })
    }

    #[inline]
    fn child(&self, p: Position, side: Side) -> Result<Option<Position>, PositionError> {
        let node = self.validate(p)?;
        Ok(self.make_position(self.nodes[node].children[side.index()]))
    }

    /// Mutably borrows the element stored at `p`.
    pub fn element_mut(&mut self, p: Position) -> Result<&mut T, PositionError> {
        let node = self.validate(p)?;
        Ok(&mut self.nodes[node].element)
    }

    /// Places an element at the root of an empty tree.
    ///
    /// # Errors
    ///
    ///  - When the tree already has a root.
    pub fn add_root(&mut self, element: T) -> Result<Position, TreeError> {
        if self.root.is_some() {
            return Err(TreeError::RootExists);
        }

        let root = self.nodes.insert(Node::new(element, None));
        self.root = Some(root);
        Ok(Position {
            container: self.id,
            node: root,
        })
    }

    /// Inserts a node into a free child slot without further checks.
    fn insert_child(&mut self, parent: NodeKey, side: Side, element: T) -> NodeKey {
        let child = self.nodes.insert(Node::new(element, Some(parent)));
        self.nodes[parent].children[side.index()] = Some(child);
        child
    }

    fn add_child(&mut self, p: Position, side: Side, element: T) -> Result<Position, TreeError> {
        let parent = self.validate(p)?;

        if self.nodes[parent].children[side.index()].is_some() {
            return Err(side.occupied());
        }

        let node = self.insert_child(parent, side, element);
        Ok(Position {
            container: self.id,
            node,
        })
    }

    /// Creates a left child of `p` holding `element`.
    ///
    /// # Errors
    ///
    ///  - When `p` is not a valid position of this tree.
    ///  - When `p` already has a left child.
    #[inline]
    pub fn add_left(&mut self, p: Position, element: T) -> Result<Position, TreeError> {
        self.add_child(p, Side::Left, element)
    }

    /// Creates a right child of `p` holding `element`.
    ///
    /// # Errors
    ///
    ///  - When `p` is not a valid position of this tree.
    ///  - When `p` already has a right child.
    #[inline]
    pub fn add_right(&mut self, p: Position, element: T) -> Result<Position, TreeError> {
        self.add_child(p, Side::Right, element)
    }

    /// Replaces the element at `p`, returning the former element.
    pub fn replace(&mut self, p: Position, element: T) -> Result<T, PositionError> {
        let slot = self.element_mut(p)?;
        Ok(std::mem::replace(slot, element))
    }

    /// Removes the node at `p` and returns its element.
    ///
    /// The only child of the node, if any, takes its place. `p` is invalid
    /// afterwards.
    ///
    /// # Errors
    ///
    ///  - When `p` is not a valid position of this tree.
    ///  - When the node has two children.
    pub fn delete(&mut self, p: Position) -> Result<T, TreeError> {
        let node = self.validate(p)?;

        let child = match self.nodes[node].children {
            [Some(_), Some(_)] => return Err(TreeError::TwoChildren),
            [left, right] => left.or(right),
        };

        let parent = self.nodes[node].parent;

        if let Some(child) = child {
            self.nodes[child].parent = parent;
        }

        match parent {
            None => self.root = child,
            Some(parent) => {
                for slot in &mut self.nodes[parent].children {
                    if *slot == Some(node) {
                        *slot = child;
                    }
                }
            }
        }

        log::trace!("deleted tree node {:?}", node.index());

        let removed = self.nodes.remove(node).ok_or(PositionError::Invalidated)?;
        Ok(removed.element)
    }

    /// Grafts two trees as the left and right subtrees of the leaf `p`.
    ///
    /// All nodes of `left` and `right` are moved into this tree. Both are
    /// empty afterwards and their former positions are invalid.
    ///
    /// # Errors
    ///
    ///  - When `p` is not a valid position of this tree.
    ///  - When `p` is not a leaf.
    ///
    /// # Example
    ///
    /// ```
    /// # use positional::{LinkedBinaryTree, Tree};
    /// let mut tree = LinkedBinaryTree::new();
    /// let root = tree.add_root('*').unwrap();
    ///
    /// let mut left = LinkedBinaryTree::from_level_order([Some('a')]);
    /// let mut right = LinkedBinaryTree::from_level_order([Some('b')]);
    /// tree.attach(root, &mut left, &mut right).unwrap();
    ///
    /// assert_eq!(tree.elements().collect::<String>(), "a*b");
    /// assert!(left.is_empty() && right.is_empty());
    /// ```
    pub fn attach(
        &mut self,
        p: Position,
        left: &mut Self,
        right: &mut Self,
    ) -> Result<(), TreeError> {
        let node = self.validate(p)?;

        if self.nodes[node].children.iter().any(Option::is_some) {
            return Err(TreeError::NotLeaf);
        }

        for (side, other) in [(Side::Left, left), (Side::Right, right)] {
            let Some(grafted) = other.root.take().and_then(|root| self.graft(other, root)) else {
                continue;
            };

            self.nodes[grafted].parent = Some(node);
            self.nodes[node].children[side.index()] = Some(grafted);
        }

        log::trace!("attached subtrees below tree node {:?}", node.index());
        Ok(())
    }

    /// Moves the subtree of `root` out of `other` into this tree's arena.
    ///
    /// Returns the new key of `root`, which is left without a parent.
    fn graft(&mut self, other: &mut Self, root: NodeKey) -> Option<NodeKey> {
        let mut node_map = NodeMap::new();
        let mut stack = vec![root];

        while let Some(old) = stack.pop() {
            let Some(node) = other.nodes.remove(old) else {
                continue;
            };

            stack.extend(node.children.iter().flatten());
            node_map.insert(old, self.nodes.insert(node));
        }

        for new in node_map.values() {
            self.nodes[*new].relink(&node_map);
        }

        let grafted = node_map.get(&root).copied()?;
        self.nodes[grafted].parent = None;
        Some(grafted)
    }
}

impl<T> Default for LinkedBinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedBinaryTree<T> {
    /// Clones the nodes into a tree with a new identity.
    ///
    /// Positions of the original tree are foreign to the clone.
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            id: ContainerId::fresh(),
        }
    }
}

impl<T> Tree for LinkedBinaryTree<T> {
    type Position = Position;
    type Element = T;
    type Children<'a> = BinaryChildren<Position> where Self: 'a;

    #[inline]
    fn root(&self) -> Option<Position> {
        self.make_position(self.root)
    }

    fn parent(&self, p: Position) -> Result<Option<Position>, PositionError> {
        let node = self.validate(p)?;
        Ok(self.make_position(self.nodes[node].parent))
    }

    fn num_children(&self, p: Position) -> Result<usize, PositionError> {
        let node = self.validate(p)?;
        Ok(self.nodes[node].children.iter().flatten().count())
    }

    fn children(&self, p: Position) -> Result<Self::Children<'_>, PositionError> {
        let node = self.validate(p)?;
        let [left, right] = self.nodes[node].children;
        Ok([self.make_position(left), self.make_position(right)]
            .into_iter()
            .flatten())
    }

    #[inline]
    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn element(&self, p: Position) -> Result<&T, PositionError> {
        let node = self.validate(p)?;
        Ok(&self.nodes[node].element)
    }

    /// Iterates over the positions in inorder.
    fn positions(&self) -> Box<dyn Iterator<Item = Position> + '_> {
        Box::new(self.inorder())
    }
}

impl<T> BinaryTree for LinkedBinaryTree<T> {
    #[inline]
    fn left(&self, p: Position) -> Result<Option<Position>, PositionError> {
        self.child(p, Side::Left)
    }

    #[inline]
    fn right(&self, p: Position) -> Result<Option<Position>, PositionError> {
        self.child(p, Side::Right)
    }
}

/// Error returned by the structural mutators of [`LinkedBinaryTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("the tree already has a root")]
    RootExists,
    #[error("the left child already exists")]
    LeftOccupied,
    #[error("the right child already exists")]
    RightOccupied,
    #[error("can not delete a node with two children")]
    TwoChildren,
    #[error("can only attach subtrees to a leaf")]
    NotLeaf,
    #[error(transparent)]
    Position(#[from] PositionError),
}
