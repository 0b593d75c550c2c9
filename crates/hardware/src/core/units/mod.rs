//! Memory-side units.
//!
//! The processor reaches main memory only through the cache in this module.

/// Set-associative write-back cache with LRU replacement.
pub mod cache;
