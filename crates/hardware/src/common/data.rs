//! Memory Access Types.
//!
//! This module defines the classification of requests the processor issues to
//! the cache. The kind of a request decides:
//! 1. **Dirty tracking:** Only stores mark a resident block dirty.
//! 2. **Trace output:** Fetches and loads deliver a word to the processor, stores
//!    deliver one to the cache.
//! 3. **Statistics:** Hits and misses are counted per kind.

use std::fmt;

/// Type of cache access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Instruction fetch at the program counter.
    Fetch,

    /// Data read issued by `lw`.
    Load,

    /// Data write issued by `sw`.
    ///
    /// Write-allocate: a store miss installs the block before writing it.
    Store,
}

impl AccessType {
    /// Returns `true` for accesses that modify the resident block.
    #[inline]
    pub const fn is_store(self) -> bool {
        matches!(self, Self::Store)
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch => write!(f, "fetch"),
            Self::Load => write!(f, "load"),
            Self::Store => write!(f, "store"),
        }
    }
}
