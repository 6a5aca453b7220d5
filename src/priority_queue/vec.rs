use super::{EmptyError, Item, PriorityQueue};

/// A priority queue kept sorted by key inside a `Vec`.
///
/// Items are stored in descending key order so that the minimum sits at the
/// end of the vector. Insertion finds its slot by binary search but still
/// shifts the smaller items over.
#[derive(Debug, Clone)]
pub struct SortedVecPriorityQueue<K, V> {
    data: Vec<Item<K, V>>,
}

impl<K: Ord, V> SortedVecPriorityQueue<K, V> {
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty queue with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }
}

impl<K: Ord, V> Default for SortedVecPriorityQueue<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> PriorityQueue<K, V> for SortedVecPriorityQueue<K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    /// Adds a key-value pair in front of every item with an equal key, which
    /// puts it behind them in removal order.
    fn add(&mut self, key: K, value: V) {
        let index = self.data.partition_point(|item| item.key > key);
        self.data.insert(index, Item { key, value });
    }

    fn min(&self) -> Result<(&K, &V), EmptyError> {
        self.data.last().map(Item::pair).ok_or(EmptyError)
    }

    fn remove_min(&mut self) -> Result<(K, V), EmptyError> {
        self.data.pop().map(Item::into_pair).ok_or(EmptyError)
    }
}
