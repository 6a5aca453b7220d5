use super::{EmptyError, Item, PriorityQueue};
use crate::PositionalList;

/// A priority queue kept sorted by key inside a [`PositionalList`].
///
/// # Example
///
/// ```
/// # use positional::{PriorityQueue, SortedPriorityQueue};
/// let mut queue = SortedPriorityQueue::new();
/// queue.add(5, "five");
/// queue.add(3, "three");
///
/// assert_eq!(queue.min(), Ok((&3, &"three")));
/// assert_eq!(queue.remove_min(), Ok((3, "three")));
/// assert_eq!(queue.min(), Ok((&5, &"five")));
/// ```
#[derive(Debug, Clone)]
pub struct SortedPriorityQueue<K, V> {
    data: PositionalList<Item<K, V>>,
}

impl<K: Ord, V> SortedPriorityQueue<K, V> {
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self {
            data: PositionalList::new(),
        }
    }
}

impl<K: Ord, V> Default for SortedPriorityQueue<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> PriorityQueue<K, V> for SortedPriorityQueue<K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    /// Adds a key-value pair after every item whose key is not greater.
    ///
    /// Walks backwards from the last item, so this is linear in the number of
    /// items with a greater key.
    fn add(&mut self, key: K, value: V) {
        let newest = Item { key, value };
        let mut walk = self.data.last();

        while let Some(p) = walk {
            let item = self.data.element(p).expect("walk holds positions of this list");

            if newest.key >= item.key {
                break;
            }

            walk = self.data.before(p).expect("walk holds positions of this list");
        }

        match walk {
            Some(p) => {
                self.data
                    .add_after(p, newest)
                    .expect("walk holds positions of this list");
            }
            None => {
                self.data.add_first(newest);
            }
        }
    }

    fn min(&self) -> Result<(&K, &V), EmptyError> {
        let first = self.data.first().ok_or(EmptyError)?;
        let item = self.data.element(first).map_err(|_| EmptyError)?;
        Ok(item.pair())
    }

    fn remove_min(&mut self) -> Result<(K, V), EmptyError> {
        let first = self.data.first().ok_or(EmptyError)?;
        let item = self.data.delete(first).map_err(|_| EmptyError)?;
        Ok(item.into_pair())
    }
}
