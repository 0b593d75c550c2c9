//! Instruction disassembler.
//!
//! Renders a machine word in assembly-like text:
//!
//! ```text
//! add <field2> <regA> <regB>
//! lw <regA> <regB> <offset>
//! data <offset>
//! ```
//!
//! `add` and `nand` print the raw destination field first; every other
//! instruction prints both register fields followed by the sign-extended
//! offset. Words with an undefined opcode are shown as inert `data` with
//! their sign-extended low 16 bits.

use super::decode::{Instruction, decode};
use super::instruction::InstructionBits;

/// Disassembles one machine word.
///
/// # Examples
///
/// ```
/// use cachesim_core::isa::disasm::disassemble;
///
/// assert_eq!(disassemble(8454151), "lw 0 1 7");
/// assert_eq!(disassemble(25165824), "halt 0 0 0");
/// assert_eq!(disassemble(-1), "data -1");
/// assert_eq!(disassemble(0x0200_0005), "data 5");
/// ```
pub fn disassemble(word: i32) -> String {
    match decode(word) {
        Some(inst @ (Instruction::Add { .. } | Instruction::Nand { .. })) => format!(
            "{} {} {} {}",
            inst.mnemonic(),
            word.field2(),
            word.field0(),
            word.field1()
        ),
        Some(inst) => format!(
            "{} {} {} {}",
            inst.mnemonic(),
            word.field0(),
            word.field1(),
            word.imm()
        ),
        None => format!("data {}", word.imm()),
    }
}

/// Disassembles a whole image, one line per word prefixed with its address.
pub fn disassemble_image(words: &[i32]) -> Vec<String> {
    words
        .iter()
        .enumerate()
        .map(|(addr, &word)| format!("{addr:>5}: {}", disassemble(word)))
        .collect()
}
