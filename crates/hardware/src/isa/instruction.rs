//! Instruction encoding and field extraction.
//!
//! Layout of an instruction word:
//!
//! ```text
//!  31    25 24  22 21  19 18  16 15                    0
//! +--------+------+------+------+-----------------------+
//! | unused |  op  | regA | regB |   offset / destReg    |
//! +--------+------+------+------+-----------------------+
//! ```
//!
//! The opcode is taken as everything above bit 22 (an arithmetic shift), so
//! words with high bits set yield opcodes outside `0..=7` and are rejected at
//! execution time.

use super::opcodes::OPCODE_SHIFT;

/// Bit shift of the regA field.
pub const FIELD0_SHIFT: u32 = 19;
/// Bit shift of the regB field.
pub const FIELD1_SHIFT: u32 = 16;
/// Mask of a register field after shifting.
pub const REG_MASK: i32 = 0x7;
/// Mask of the 16-bit offset field.
pub const FIELD2_MASK: i32 = 0xFFFF;

/// Field extraction on encoded instruction words.
pub trait InstructionBits {
    /// Opcode (bits 22 and up, arithmetic shift).
    fn opcode(&self) -> i32;

    /// Register A index (bits 19-21).
    fn field0(&self) -> usize;

    /// Register B index (bits 16-18).
    fn field1(&self) -> usize;

    /// Raw 16-bit offset / destination field (bits 0-15).
    fn field2(&self) -> i32;

    /// `field2` sign-extended from 16 bits.
    fn imm(&self) -> i32;

    /// Destination register of `add`/`nand` (low 3 bits of `field2`).
    fn dest(&self) -> usize;
}

impl InstructionBits for i32 {
    #[inline(always)]
    fn opcode(&self) -> i32 {
        self >> OPCODE_SHIFT
    }

    #[inline(always)]
    fn field0(&self) -> usize {
        ((self >> FIELD0_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn field1(&self) -> usize {
        ((self >> FIELD1_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn field2(&self) -> i32 {
        self & FIELD2_MASK
    }

    #[inline(always)]
    fn imm(&self) -> i32 {
        sign_extend_16(self.field2())
    }

    #[inline(always)]
    fn dest(&self) -> usize {
        (self & REG_MASK) as usize
    }
}

/// Sign-extends the low 16 bits of `value`.
#[inline(always)]
pub const fn sign_extend_16(value: i32) -> i32 {
    (value as i16) as i32
}
