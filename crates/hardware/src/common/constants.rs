//! Machine-wide constants.
//!
//! The simulated machine is word addressed: every address names one 32-bit
//! word, and main memory is a fixed array of such words.

/// Number of words in main memory.
///
/// Every block size the cache accepts divides this evenly, so a block fill or
/// write-back never runs off the end of memory.
pub const NUM_MEMORY: usize = 65536;

/// Number of general-purpose registers.
pub const NUM_REGS: usize = 8;

/// Largest block size the cache accepts, in words.
pub const MAX_BLOCK_WORDS: usize = 256;

/// Width of an address in bits. Tag, set-index and block-offset widths always sum to this.
pub const ADDRESS_BITS: u32 = 32;
