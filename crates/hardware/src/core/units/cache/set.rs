//! Cache set: `associativity` blocks and their recency order.

use super::block::Block;
use super::lru::LruStack;

/// A group of blocks eligible to hold the same addresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Set {
    blocks: Vec<Block>,
    recency: LruStack,
}

impl Set {
    /// Creates a set of `ways` invalid blocks of `block_size_words` words.
    pub fn new(ways: usize, block_size_words: usize) -> Self {
        Self {
            blocks: vec![Block::new(block_size_words); ways],
            recency: LruStack::new(ways),
        }
    }

    /// Way holding a valid copy of `tag`, if any.
    pub fn find(&self, tag: u32) -> Option<usize> {
        self.blocks.iter().position(|b| b.matches(tag))
    }

    /// Way to refill on a miss: the first invalid block, else the LRU block.
    pub fn victim(&self) -> usize {
        self.blocks
            .iter()
            .position(|b| !b.is_valid())
            .unwrap_or_else(|| self.recency.lru())
    }

    /// Promotes `way` to most recently used.
    pub fn touch(&mut self, way: usize) {
        self.recency.touch(way);
    }

    /// Block at `way`.
    pub fn block(&self, way: usize) -> &Block {
        &self.blocks[way]
    }

    pub(crate) fn block_mut(&mut self, way: usize) -> &mut Block {
        &mut self.blocks[way]
    }

    /// All blocks, in way order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Way indices, most recently used first.
    pub fn recency_order(&self) -> &[usize] {
        self.recency.order()
    }

    /// Number of ways.
    pub fn ways(&self) -> usize {
        self.blocks.len()
    }
}
