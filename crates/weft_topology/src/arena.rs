//! Append-only storage for the entities of one platform.
//!
//! Nothing in a board is ever removed, so a position in the backing `Vec`
//! is a stable identity for the lifetime of the platform.

use std::marker::PhantomData;
use std::ops::Index;

/// A typed position in an [`Arena`].
pub trait ArenaId: Copy {
    /// The ID at `index`.
    fn from_index(index: usize) -> Self;

    /// The position this ID denotes.
    fn index(self) -> usize;
}

/// Entities of one kind, in the order they were added.
#[derive(Debug, Clone)]
pub struct Arena<I, T> {
    items: Vec<T>,
    _id: PhantomData<fn() -> I>,
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ArenaId, T> Arena<I, T> {
    /// An empty arena.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            _id: PhantomData,
        }
    }

    /// The ID the next [`alloc`](Self::alloc) returns.
    ///
    /// Entities that store their own ID read it here before being added.
    pub fn next_id(&self) -> I {
        I::from_index(self.items.len())
    }

    /// Adds `item` and returns its ID.
    pub fn alloc(&mut self, item: T) -> I {
        self.items.push(item);
        I::from_index(self.items.len() - 1)
    }

    /// The entity behind `id`, if `id` belongs to this arena.
    pub fn get(&self, id: I) -> Option<&T> {
        self.items.get(id.index())
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing was added.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `(id, entity)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (I::from_index(i), item))
    }

    /// Entities in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<I: ArenaId, T> Index<I> for Arena<I, T> {
    type Output = T;

    fn index(&self, id: I) -> &T {
        &self.items[id.index()]
    }
}
