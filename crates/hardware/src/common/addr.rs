//! Word address type.
//!
//! Registers hold signed 32-bit values, but an address into main memory is a
//! non-negative word index. `WordAddr` marks the point where a register value
//! has been checked and may be used to index the memory hierarchy.

use std::fmt;

use super::data::AccessType;
use super::error::ExecError;

/// A word address into main memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WordAddr(pub u32);

impl WordAddr {
    /// Creates a new word address from a raw value.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Converts a register value into an address for an access of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::AddressOutOfRange`] when `value` is negative.
    pub fn from_register(value: i32, kind: AccessType) -> Result<Self, ExecError> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| ExecError::AddressOutOfRange {
                addr: i64::from(value),
                kind,
            })
    }

    /// Returns the raw address value.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }

    /// Returns the address as an index into a word array.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for WordAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
