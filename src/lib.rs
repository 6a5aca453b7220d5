//! Classic linked data structures behind validated positions.
//!
//! Every container hands out [positions](list::Position) instead of node
//! references. A position remembers the container it came from and the
//! generation of the arena slot holding its node, so using it after the node
//! was removed, or with another container, is reported as a
//! [`PositionError`] rather than silently reaching the wrong element.
//!
//!  - [`PositionalList`]: a doubly linked list with sentinel ends.
//!  - [`Tree`] and [`BinaryTree`]: traversal algorithms written once against
//!    a minimal tree interface.
//!  - [`LinkedBinaryTree`]: a node-linked binary tree with structural
//!    mutators.
//!  - [`SortedPriorityQueue`]: a min-priority queue kept sorted inside a
//!    positional list.
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

pub mod list;
pub mod memory;
pub mod priority_queue;
pub mod tree;

pub use list::PositionalList;
pub use priority_queue::{EmptyError, PriorityQueue, SortedPriorityQueue, SortedVecPriorityQueue};
pub use tree::{BinaryTree, LinkedBinaryTree, Tree, TreeError};

/// Index of a node slot in a container's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NodeIndex(u32);

entity_impl!(NodeIndex, u32);

/// Key of a node: its slot index together with the slot's generation.
pub type NodeKey = memory::Key<NodeIndex>;

/// Identity of a container instance.
///
/// Drawn from a process wide counter when a container is created, so that
/// two containers never share an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(u64);

impl ContainerId {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Error returned when a position can not be used with a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("position does not belong to this container")]
    ForeignContainer,
    #[error("position is no longer valid")]
    Invalidated,
}
