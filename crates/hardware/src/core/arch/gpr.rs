//! General-Purpose Register File.
//!
//! This module implements the register file of the machine. It performs the following:
//! 1. **Storage:** Maintains eight signed 32-bit registers (`reg[0]`-`reg[7]`).
//! 2. **Access:** Plain reads and writes; register 0 is an ordinary register.
//! 3. **Debugging:** Exposes the whole file for the end-of-run state dump.

use crate::common::constants::NUM_REGS;

/// General-Purpose Register file.
///
/// Every register, including register 0, may be read and written. Indices
/// come from 3-bit instruction fields, so they are always in range.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [i32; NUM_REGS],
}

impl Gpr {
    /// Creates a new register file with all registers initialized to zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_REGS],
        }
    }

    /// Reads a register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-7).
    #[inline(always)]
    pub const fn read(&self, idx: usize) -> i32 {
        self.regs[idx]
    }

    /// Writes a register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-7).
    /// * `val` - The 32-bit value to write.
    #[inline(always)]
    pub const fn write(&mut self, idx: usize, val: i32) {
        self.regs[idx] = val;
    }

    /// All registers, by index.
    pub const fn as_slice(&self) -> &[i32] {
        &self.regs
    }

    /// Iterates over `(index, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, i32)> + '_ {
        self.regs.iter().copied().enumerate()
    }
}
