//! Least Recently Used (LRU) recency tracking.
//!
//! Each set keeps a recency stack of its way indices. Index 0 is the most
//! recently used way and the last element is the least recently used one.
//! Every access moves its way to the front; nothing else reorders the stack,
//! so it stays a permutation of `0..ways` and the order is always total.
//!
//! # Performance
//!
//! - `touch()`: O(W) where W is the associativity
//! - `lru()`: O(1)

/// Recency stack for one set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LruStack {
    /// Way indices, most recently used first.
    order: Vec<usize>,
}

impl LruStack {
    /// Creates a stack for `ways` ways in index order (way 0 most recent).
    pub fn new(ways: usize) -> Self {
        Self {
            order: (0..ways).collect(),
        }
    }

    /// Moves `way` to the most-recently-used position.
    pub fn touch(&mut self, way: usize) {
        if let Some(pos) = self.order.iter().position(|&w| w == way) {
            let _ = self.order.remove(pos);
        }
        self.order.insert(0, way);
    }

    /// The least recently used way.
    pub fn lru(&self) -> usize {
        self.order.last().copied().unwrap_or(0)
    }

    /// The most recently used way.
    pub fn mru(&self) -> usize {
        self.order.first().copied().unwrap_or(0)
    }

    /// Full recency order, most recently used first.
    pub fn order(&self) -> &[usize] {
        &self.order
    }
}
