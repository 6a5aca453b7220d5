//! Arena storage for the nodes of linked structures.
//!
//! Nodes are addressed by a [`Key`], the pair of a slot index and the
//! [`Generation`] of the slot at the time the node was inserted. Freeing a
//! slot bumps its generation so that keys to removed nodes can be told apart
//! from keys to whatever value later reuses the slot.
pub mod slab;

pub use slab::Slab;

pub trait EntityIndex: Copy + Eq + Ord {
    fn new(index: usize) -> Self {
        Self::try_new(index).expect("index out of range")
    }

    fn try_new(index: usize) -> Option<Self>;
    fn index(self) -> usize;
}

/// Macro which provides the common implementation of an n-bit entity reference
///
/// Based on [`cranelift_entity`'s `entity_impl!`](https://docs.rs/cranelift-entity/0.89.2/cranelift_entity/macro.entity_impl.html)
#[macro_export]
macro_rules! entity_impl {
    ($entity:ident, $backing:ty) => {
        impl $crate::memory::EntityIndex for $entity {
            #[inline(always)]
            fn try_new(ix: usize) -> Option<Self> {
                if ix < (<$backing>::MAX as usize) || (<$backing>::BITS) > usize::BITS {
                    Some($entity(ix as $backing))
                } else {
                    None
                }
            }

            #[inline(always)]
            fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

/// Number of times an arena slot has been freed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u32);

impl Generation {
    /// The generation that follows this one.
    ///
    /// Wraps around after `u32::MAX` frees of the same slot.
    #[inline]
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Key of a value stored in a [`Slab`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key<K> {
    index: K,
    generation: Generation,
}

impl<K: EntityIndex> Key<K> {
    #[inline]
    pub(crate) fn new(index: K, generation: Generation) -> Self {
        Self { index, generation }
    }

    /// The slot the key refers to.
    #[inline]
    pub fn index(self) -> K {
        self.index
    }

    /// The generation of the slot when the key was handed out.
    #[inline]
    pub fn generation(self) -> Generation {
        self.generation
    }
}
