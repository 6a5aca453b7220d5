use std::{
    iter::FusedIterator,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use crate::memory::{EntityIndex, Generation, Key};

/// A slab arena that manages fixed-sized objects under generational keys.
#[derive(Debug, Clone)]
pub struct Slab<K, V> {
    data: Vec<Entry<V>>,
    free: usize,
    len: usize,
    phantom: PhantomData<K>,
}

impl<K, V> Slab<K, V>
where
    K: EntityIndex,
{
    /// Creates an empty [`Slab<K, V>`].
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            free: 0,
            len: 0,
            phantom: PhantomData,
        }
    }

    /// Returns the number of stored values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether there is no stored value.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns whether `key` refers to a value that is still stored.
    ///
    /// Keys to removed values are rejected even when their slot has been
    /// reused since.
    pub fn contains(&self, key: Key<K>) -> bool {
        self.get(key).is_some()
    }

    pub fn insert(&mut self, value: V) -> Key<K> {
        let index = self.free;

        let generation = if index == self.data.len() {
            self.data.push(Entry::Full {
                value,
                generation: Generation::default(),
            });
            self.free += 1;
            Generation::default()
        } else {
            let Entry::Free { next, generation } = self.data[index] else {
                unreachable!()
            };
            self.free = next;
            self.data[index] = Entry::Full { value, generation };
            generation
        };

        self.len += 1;

        Key::new(K::new(index), generation)
    }

    /// Removes a value and bumps the generation of its slot.
    ///
    /// Returns `None` when the key is stale or out of bounds.
    pub fn remove(&mut self, key: Key<K>) -> Option<V> {
        let index = key.index().index();
        let entry = self.data.get_mut(index)?;

        match entry {
            Entry::Full { generation, .. } if *generation == key.generation() => {}
            _ => return None,
        }

        let freed = Entry::Free {
            next: self.free,
            generation: key.generation().next(),
        };

        let Entry::Full { value, .. } = std::mem::replace(entry, freed) else {
            unreachable!()
        };

        self.free = index;
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, key: Key<K>) -> Option<&V> {
        match self.data.get(key.index().index()) {
            Some(Entry::Full { value, generation }) if *generation == key.generation() => {
                Some(value)
            }
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: Key<K>) -> Option<&mut V> {
        match self.data.get_mut(key.index().index()) {
            Some(Entry::Full { value, generation }) if *generation == key.generation() => {
                Some(value)
            }
            _ => None,
        }
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            entries: self.data.iter().enumerate(),
            len: self.len,
            phantom: PhantomData,
        }
    }
}

impl<K, V> Index<Key<K>> for Slab<K, V>
where
    K: EntityIndex,
{
    type Output = V;

    fn index(&self, key: Key<K>) -> &Self::Output {
        self.get(key).expect("invalid key")
    }
}

impl<K, V> IndexMut<Key<K>> for Slab<K, V>
where
    K: EntityIndex,
{
    fn index_mut(&mut self, key: Key<K>) -> &mut Self::Output {
        self.get_mut(key).expect("invalid key")
    }
}

impl<K, V> Default for Slab<K, V>
where
    K: EntityIndex,
{
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
enum Entry<V> {
    Free { next: usize, generation: Generation },
    Full { value: V, generation: Generation },
}

pub struct Iter<'a, K, V> {
    entries: std::iter::Enumerate<std::slice::Iter<'a, Entry<V>>>,
    len: usize,
    phantom: PhantomData<K>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V>
where
    K: EntityIndex,
{
    type Item = (Key<K>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for (index, entry) in self.entries.by_ref() {
            if let Entry::Full { value, generation } = entry {
                self.len -= 1;
                return Some((Key::new(K::new(index), *generation), value));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V>
where
    K: EntityIndex,
{
    fn len(&self) -> usize {
        self.len
    }
}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> where K: EntityIndex {}
