//! Instruction Set Architecture (ISA) definitions.
//!
//! The machine has eight opcodes (`add`, `nand`, `lw`, `sw`, `beq`, `jalr`,
//! `halt`, `noop`), eight registers and 32-bit instruction words.

/// Instruction decoding into [`decode::Instruction`].
pub mod decode;

/// Instruction disassembler for traces and diagnostics.
pub mod disasm;

/// Instruction field extraction and encoding constants.
pub mod instruction;

/// Opcode values.
pub mod opcodes;

pub use decode::{Instruction, decode};
pub use instruction::InstructionBits;
