//! Opcodes.
//!
//! The opcode occupies bits 22 and up of an instruction word. Exactly eight
//! values are defined; anything else is a data word.

/// `add regA regB destReg`: destReg = regA + regB.
pub const OP_ADD: i32 = 0;

/// `nand regA regB destReg`: destReg = !(regA & regB).
pub const OP_NAND: i32 = 1;

/// `lw regA regB offset`: regA = mem[regB + offset].
pub const OP_LW: i32 = 2;

/// `sw regA regB offset`: mem[regB + offset] = regA.
pub const OP_SW: i32 = 3;

/// `beq regA regB offset`: if regA == regB, pc = pc + 1 + offset.
pub const OP_BEQ: i32 = 4;

/// `jalr regA regB`: regA = pc + 1, then pc = regB.
pub const OP_JALR: i32 = 5;

/// `halt`: stop the machine.
pub const OP_HALT: i32 = 6;

/// `noop`: do nothing.
pub const OP_NOOP: i32 = 7;

/// Encoded `noop` with all other fields zero.
pub const NOOP_INSTRUCTION: i32 = OP_NOOP << OPCODE_SHIFT;

/// Encoded `halt` with all other fields zero.
pub const HALT_INSTRUCTION: i32 = OP_HALT << OPCODE_SHIFT;

/// Bit position of the opcode field.
pub const OPCODE_SHIFT: u32 = 22;
