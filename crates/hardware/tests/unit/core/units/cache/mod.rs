//! Cache tests.


/// Hit/miss behaviour, write-back, flush and scenarios.
pub mod cache_sim;

/// LRU recency stack.
pub mod lru;
