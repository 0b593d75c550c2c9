//! Address decomposition.
//!
//! A word address splits into three fields, from high bits to low:
//!
//! ```text
//!  31                                                   0
//! +--------------------+----------------+----------------+
//! |        tag         |   set index    |  block offset  |
//! +--------------------+----------------+----------------+
//!   32 - s - b bits         s bits           b bits
//! ```
//!
//! with `b = log2(block_size_words)` and `s = log2(num_sets)`. Both counts must
//! be powers of two for the split to be exact.

use crate::common::addr::WordAddr;
use crate::common::constants::ADDRESS_BITS;
use crate::common::error::ConfigError;
use crate::config::CacheConfig;

/// The three fields of an address under a given cache geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedAddr {
    /// High-order bits identifying the memory block.
    pub tag: u32,
    /// Set the block maps to.
    pub set_index: usize,
    /// Word position inside the block.
    pub block_offset: usize,
}

/// Pure mapping from addresses to (tag, set-index, block-offset).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressDecoder {
    block_offset_bits: u32,
    set_index_bits: u32,
    block_mask: u32,
    set_mask: u32,
}

impl AddressDecoder {
    /// Creates a decoder for the block size and set count in `config`.
    ///
    /// # Errors
    ///
    /// Fails when the block size is not a power of two in `1..=256`, or the
    /// set count is not a power of two.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        CacheConfig::check_block_size(config.block_size_words)?;
        CacheConfig::check_num_sets(config.num_sets)?;

        let block_offset_bits = config.block_size_words.trailing_zeros();
        let set_index_bits = config.num_sets.trailing_zeros();
        if block_offset_bits + set_index_bits > ADDRESS_BITS {
            return Err(ConfigError::NumSetsNotPowerOfTwo(config.num_sets));
        }

        Ok(Self {
            block_offset_bits,
            set_index_bits,
            block_mask: low_mask(block_offset_bits),
            set_mask: low_mask(set_index_bits),
        })
    }

    /// Number of block-offset bits.
    #[inline]
    pub const fn block_offset_bits(&self) -> u32 {
        self.block_offset_bits
    }

    /// Number of set-index bits.
    #[inline]
    pub const fn set_index_bits(&self) -> u32 {
        self.set_index_bits
    }

    /// Number of tag bits.
    #[inline]
    pub const fn tag_bits(&self) -> u32 {
        ADDRESS_BITS - self.block_offset_bits - self.set_index_bits
    }

    /// Word position of `addr` inside its block.
    #[inline]
    pub const fn block_offset(&self, addr: WordAddr) -> usize {
        (addr.val() & self.block_mask) as usize
    }

    /// Set that `addr` maps to.
    #[inline]
    pub fn set_index(&self, addr: WordAddr) -> usize {
        (shr(addr.val(), self.block_offset_bits) & self.set_mask) as usize
    }

    /// Tag of `addr`.
    #[inline]
    pub fn tag(&self, addr: WordAddr) -> u32 {
        shr(addr.val(), self.block_offset_bits + self.set_index_bits)
    }

    /// First word of the block containing `addr`.
    #[inline]
    pub const fn block_base(&self, addr: WordAddr) -> WordAddr {
        WordAddr(addr.val() & !self.block_mask)
    }

    /// Splits `addr` into all three fields.
    pub fn decompose(&self, addr: WordAddr) -> DecodedAddr {
        DecodedAddr {
            tag: self.tag(addr),
            set_index: self.set_index(addr),
            block_offset: self.block_offset(addr),
        }
    }

    /// Rebuilds the base address of the block with `tag` resident in `set_index`.
    ///
    /// This is how a victim's own address is recovered for write-back.
    pub fn block_address(&self, tag: u32, set_index: usize) -> WordAddr {
        let tag_part = tag
            .checked_shl(self.block_offset_bits + self.set_index_bits)
            .unwrap_or(0);
        let set_part = ((set_index as u32) & self.set_mask)
            .checked_shl(self.block_offset_bits)
            .unwrap_or(0);
        WordAddr(tag_part | set_part)
    }
}

/// Mask of the low `bits` bits.
#[inline]
const fn low_mask(bits: u32) -> u32 {
    if bits >= ADDRESS_BITS {
        u32::MAX
    } else {
        (1 << bits) - 1
    }
}

/// Logical right shift that yields 0 once every bit is shifted out.
#[inline]
fn shr(value: u32, bits: u32) -> u32 {
    value.checked_shr(bits).unwrap_or(0)
}
