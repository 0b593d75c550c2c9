//! Instruction decoding.

use super::instruction::{FIELD0_SHIFT, FIELD1_SHIFT, FIELD2_MASK, InstructionBits, REG_MASK};
use super::opcodes::{
    OP_ADD, OP_BEQ, OP_HALT, OP_JALR, OP_LW, OP_NAND, OP_NOOP, OP_SW, OPCODE_SHIFT,
};

/// A decoded instruction.
///
/// `a` and `b` are the register indices in fields 0 and 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `dest = a + b`.
    Add {
        /// Register A.
        a: usize,
        /// Register B.
        b: usize,
        /// Destination register.
        dest: usize,
    },
    /// `dest = !(a & b)`.
    Nand {
        /// Register A.
        a: usize,
        /// Register B.
        b: usize,
        /// Destination register.
        dest: usize,
    },
    /// `a = mem[b + offset]`.
    Lw {
        /// Register A (destination).
        a: usize,
        /// Register B (base).
        b: usize,
        /// Sign-extended offset.
        offset: i32,
    },
    /// `mem[b + offset] = a`.
    Sw {
        /// Register A (value).
        a: usize,
        /// Register B (base).
        b: usize,
        /// Sign-extended offset.
        offset: i32,
    },
    /// `if a == b { pc = pc + 1 + offset }`.
    Beq {
        /// Register A.
        a: usize,
        /// Register B.
        b: usize,
        /// Sign-extended offset.
        offset: i32,
    },
    /// `a = pc + 1; pc = b`.
    Jalr {
        /// Register receiving the return address.
        a: usize,
        /// Register holding the target.
        b: usize,
    },
    /// Stop the machine.
    Halt,
    /// Do nothing.
    Noop,
}

impl Instruction {
    /// Opcode value of this instruction.
    pub const fn opcode(&self) -> i32 {
        match self {
            Self::Add { .. } => OP_ADD,
            Self::Nand { .. } => OP_NAND,
            Self::Lw { .. } => OP_LW,
            Self::Sw { .. } => OP_SW,
            Self::Beq { .. } => OP_BEQ,
            Self::Jalr { .. } => OP_JALR,
            Self::Halt => OP_HALT,
            Self::Noop => OP_NOOP,
        }
    }

    /// Mnemonic used by the disassembler.
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Nand { .. } => "nand",
            Self::Lw { .. } => "lw",
            Self::Sw { .. } => "sw",
            Self::Beq { .. } => "beq",
            Self::Jalr { .. } => "jalr",
            Self::Halt => "halt",
            Self::Noop => "noop",
        }
    }

    /// Encodes the instruction into a machine word.
    ///
    /// Register indices are masked to three bits and offsets to sixteen.
    pub const fn encode(&self) -> i32 {
        let (a, b, low) = match *self {
            Self::Add { a, b, dest } | Self::Nand { a, b, dest } => (a, b, dest as i32),
            Self::Lw { a, b, offset } | Self::Sw { a, b, offset } | Self::Beq { a, b, offset } => {
                (a, b, offset)
            }
            Self::Jalr { a, b } => (a, b, 0),
            Self::Halt | Self::Noop => (0, 0, 0),
        };
        (self.opcode() << OPCODE_SHIFT)
            | (((a as i32) & REG_MASK) << FIELD0_SHIFT)
            | (((b as i32) & REG_MASK) << FIELD1_SHIFT)
            | (low & FIELD2_MASK)
    }
}

/// Decodes a machine word, or returns `None` if its opcode is undefined.
pub fn decode(word: i32) -> Option<Instruction> {
    let a = word.field0();
    let b = word.field1();
    let inst = match word.opcode() {
        OP_ADD => Instruction::Add {
            a,
            b,
            dest: word.dest(),
        },
        OP_NAND => Instruction::Nand {
            a,
            b,
            dest: word.dest(),
        },
        OP_LW => Instruction::Lw {
            a,
            b,
            offset: word.imm(),
        },
        OP_SW => Instruction::Sw {
            a,
            b,
            offset: word.imm(),
        },
        OP_BEQ => Instruction::Beq {
            a,
            b,
            offset: word.imm(),
        },
        OP_JALR => Instruction::Jalr { a, b },
        OP_HALT => Instruction::Halt,
        OP_NOOP => Instruction::Noop,
        _ => return None,
    };
    Some(inst)
}
