use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

#[derive(Debug)]
pub struct Key<T>(u32, PhantomData<T>);

impl<T> std::hash::Hash for Key<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialEq for Key<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Key<T> {}

impl<T> PartialOrd for Key<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Key<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Key<T> {}

impl<T> Key<T> {
    pub fn new(index: u32) -> Self {
        Self(index, PhantomData)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

impl<T> From<u32> for Key<T> {
    fn from(index: u32) -> Self {
        Self::new(index)
    }
}

/// Append-only storage; keys stay valid for the lifetime of the arena.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Arena<T> {
    items: Vec<T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self { items: Default::default() }
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn alloc(&mut self, value: T) -> Key<T> {
        let idx = self.items.len() as u32;
        self.items.push(value);
        Key::new(idx)
    }

    pub fn iter_enumerated(&self) -> impl Iterator<Item = (Key<T>, &T)> {
        self.items.iter().enumerate().map(|(i, item)| (Key::new(i as u32), item))
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Index<Key<T>> for Arena<T> {
    type Output = T;
    fn index(&self, index: Key<T>) -> &Self::Output {
        &self.items[index.index() as usize]
    }
}

impl<T> IndexMut<Key<T>> for Arena<T> {
    fn index_mut(&mut self, index: Key<T>) -> &mut Self::Output {
        &mut self.items[index.index() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_index_in_allocation_order() {
        let mut arena = Arena::new();
        let a = arena.alloc("a");
        let b = arena.alloc("b");

        assert_eq!(arena[a], "a");
        assert_eq!(arena[b], "b");
        assert!(a < b);
        assert_eq!(arena.len(), 2);

        let keys: Vec<_> = arena.iter_enumerated().map(|(key, _)| key.index()).collect();
        assert_eq!(keys, [0, 1]);
    }
}
