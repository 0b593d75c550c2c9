//! Instruction Decode Properties.
//!
//! Verifies that `decode()` extracts the opcode, both register fields and the
//! sign-extended offset for every opcode, and rejects everything else.

use cachesim_core::isa::instruction::{InstructionBits, sign_extend_16};
use cachesim_core::isa::opcodes::{HALT_INSTRUCTION, NOOP_INSTRUCTION};
use cachesim_core::isa::{Instruction, decode};
use proptest::prelude::*;
use rstest::rstest;

use crate::common::builder::instruction::InstructionBuilder as I;

#[test]
fn noop_and_halt_constants() {
    assert_eq!(NOOP_INSTRUCTION, 0x1c00000);
    assert_eq!(HALT_INSTRUCTION, 25165824);
    assert_eq!(decode(NOOP_INSTRUCTION), Some(Instruction::Noop));
    assert_eq!(decode(HALT_INSTRUCTION), Some(Instruction::Halt));
}

#[rstest]
#[case(8454151, Instruction::Lw { a: 0, b: 1, offset: 7 })]
#[case(I::add(1, 2, 3), Instruction::Add { a: 1, b: 2, dest: 3 })]
#[case(I::nand(7, 0, 6), Instruction::Nand { a: 7, b: 0, dest: 6 })]
#[case(I::sw(4, 5, -1), Instruction::Sw { a: 4, b: 5, offset: -1 })]
#[case(I::beq(0, 1, -32768), Instruction::Beq { a: 0, b: 1, offset: -32768 })]
#[case(I::beq(0, 1, 32767), Instruction::Beq { a: 0, b: 1, offset: 32767 })]
#[case(I::jalr(3, 3), Instruction::Jalr { a: 3, b: 3 })]
fn decodes_known_words(#[case] word: i32, #[case] expected: Instruction) {
    assert_eq!(decode(word), Some(expected));
}

#[test]
fn add_destination_is_low_three_bits_of_field2() {
    let word = I::add(1, 2, 0b1010);
    assert_eq!(word.field2(), 0b1010);
    assert_eq!(word.dest(), 0b010);
}

#[rstest]
#[case(8 << 22, 8)]
#[case(511 << 22, 511)]
#[case(-1, -1)]
#[case(i32::MIN, -512)]
fn rejects_undefined_opcodes(#[case] word: i32, #[case] opcode: i32) {
    assert_eq!(word.opcode(), opcode);
    assert_eq!(decode(word), None);
}

#[test]
fn sign_extension() {
    assert_eq!(sign_extend_16(0x7FFF), 32767);
    assert_eq!(sign_extend_16(0x8000), -32768);
    assert_eq!(sign_extend_16(0xFFFF), -1);
}

proptest! {
    #[test]
    fn fields_survive_decode(
        op in 0i32..8,
        a in 0i32..8,
        b in 0i32..8,
        low in -32768i32..32768,
    ) {
        let word = I::new().opcode(op).a(a).b(b).low(low).build();
        let inst = decode(word).unwrap();
        prop_assert_eq!(inst.opcode(), op);
        prop_assert_eq!(word.field0(), a as usize);
        prop_assert_eq!(word.field1(), b as usize);
        prop_assert_eq!(word.imm(), low);
    }

    #[test]
    fn encode_reproduces_canonical_words(
        a in 0usize..8,
        b in 0usize..8,
        offset in -32768i32..32768,
    ) {
        for inst in [
            Instruction::Lw { a, b, offset },
            Instruction::Sw { a, b, offset },
            Instruction::Beq { a, b, offset },
        ] {
            prop_assert_eq!(decode(inst.encode()), Some(inst));
        }
    }
}
