//! Min-oriented priority queues of key-value pairs.
//!
//! Both implementations keep their items sorted on insertion, which makes
//! `add` linear but `min` and `remove_min` constant time. Among items with
//! equal keys, the one inserted first is removed first.
mod sorted;
mod vec;

use thiserror::Error;

pub use sorted::SortedPriorityQueue;
pub use vec::SortedVecPriorityQueue;

/// Error returned when querying an empty priority queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("priority queue is empty")]
pub struct EmptyError;

/// A collection of key-value pairs that hands out the pair with the minimum
/// key first.
pub trait PriorityQueue<K: Ord, V> {
    /// Returns the number of items in the queue.
    fn len(&self) -> usize;

    /// Returns whether the queue is empty.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds a key-value pair.
    fn add(&mut self, key: K, value: V);

    /// Borrows the pair with the minimum key without removing it.
    fn min(&self) -> Result<(&K, &V), EmptyError>;

    /// Removes and returns the pair with the minimum key.
    fn remove_min(&mut self) -> Result<(K, V), EmptyError>;
}

/// A key-value pair stored in a priority queue.
#[derive(Debug, Clone)]
struct Item<K, V> {
    key: K,
    value: V,
}

impl<K, V> Item<K, V> {
    #[inline]
    fn pair(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    #[inline]
    fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}
