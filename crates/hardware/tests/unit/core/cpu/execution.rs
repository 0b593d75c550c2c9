//! CPU Execution Tests.
//!
//! Runs small programs through the full fetch/decode/execute path and checks
//! registers, pc, memory and the instruction count.

use cachesim_core::common::data::AccessType;
use cachesim_core::common::error::ExecError;
use cachesim_core::core::{CpuState, StepOutcome};
use cachesim_core::isa::Instruction;
use pretty_assertions::assert_eq;

use crate::common::builder::instruction::InstructionBuilder as I;
use crate::common::harness::TestContext;

fn run(program: &[i32]) -> TestContext {
    let mut ctx = TestContext::new(4, 2, 1, program);
    let summary = ctx.run();
    assert!(summary.halted);
    ctx
}

#[test]
fn add_sums_into_destination() {
    let ctx = run(&[
        I::lw(1, 0, 5),
        I::lw(2, 0, 6),
        I::add(1, 2, 3),
        I::halt(),
        I::noop(),
        7,
        -3,
    ]);
    assert_eq!(ctx.get_reg(3), 4);
    assert_eq!(ctx.cpu().instructions(), 4);
}

#[test]
fn add_wraps_on_overflow() {
    let ctx = run(&[
        I::lw(1, 0, 4),
        I::lw(2, 0, 5),
        I::add(1, 2, 3),
        I::halt(),
        i32::MAX,
        1,
    ]);
    assert_eq!(ctx.get_reg(3), i32::MIN);
}

#[test]
fn nand_inverts_conjunction() {
    let ctx = run(&[
        I::lw(1, 0, 4),
        I::lw(2, 0, 5),
        I::nand(1, 2, 3),
        I::halt(),
        0b1100,
        0b1010,
    ]);
    assert_eq!(ctx.get_reg(3), !0b1000);
}

#[test]
fn register_zero_is_an_ordinary_register() {
    let ctx = run(&[I::lw(0, 0, 2), I::halt(), 9]);
    assert_eq!(ctx.get_reg(0), 9);
}

#[test]
fn load_uses_sign_extended_offset() {
    // reg1 = 6, then `lw 2 1 -2` reads mem[4].
    let ctx = run(&[I::lw(1, 0, 5), I::lw(2, 1, -2), I::halt(), I::noop(), 11, 6]);
    assert_eq!(ctx.get_reg(2), 11);
}

#[test]
fn store_then_load_sees_stored_value_before_write_back() {
    let mut ctx = TestContext::new(4, 2, 1, &[
        I::lw(1, 0, 6),
        I::sw(1, 0, 7),
        I::lw(2, 0, 7),
        I::halt(),
        I::noop(),
        I::noop(),
        99,
        0,
    ]);
    let _ = ctx.run();

    assert_eq!(ctx.get_reg(2), 99);
    assert_eq!(ctx.mem(7), 0, "store is held in a dirty block");

    let flushed = ctx.sim.flush().unwrap();
    assert_eq!(flushed, 1);
    assert_eq!(ctx.mem(7), 99);
}

#[test]
fn beq_counts_down_loop() {
    let ctx = run(&[
        I::lw(1, 0, 7),
        I::lw(2, 0, 8),
        I::add(1, 2, 1),
        I::beq(0, 1, 1),
        I::beq(0, 0, -3),
        I::halt(),
        I::noop(),
        3,
        -1,
    ]);
    assert_eq!(ctx.get_reg(1), 0);
    assert_eq!(ctx.cpu().pc, 5);
    assert_eq!(ctx.cpu().instructions(), 11);
    assert_eq!(ctx.cpu().stats.inst_branch, 5);
    assert_eq!(ctx.cpu().stats.branches_taken, 3);
}

#[test]
fn jalr_links_then_jumps() {
    let ctx = run(&[
        I::lw(2, 0, 5),
        I::jalr(1, 2),
        I::lw(3, 0, 5),
        I::halt(),
        I::halt(),
        4,
    ]);
    assert_eq!(ctx.get_reg(1), 2);
    assert_eq!(ctx.get_reg(3), 0, "instruction after jalr was skipped");
    assert_eq!(ctx.cpu().pc, 4);
    assert_eq!(ctx.cpu().instructions(), 3);
}

#[test]
fn jalr_to_itself_falls_through_to_return_address() {
    let ctx = run(&[I::jalr(1, 1), I::halt()]);
    assert_eq!(ctx.get_reg(1), 1);
    assert_eq!(ctx.cpu().pc, 1);
    assert_eq!(ctx.cpu().instructions(), 2);
}

#[test]
fn halt_leaves_pc_on_the_halt_and_is_counted() {
    let mut ctx = TestContext::new(4, 2, 1, &[I::noop(), I::halt()]);
    assert_eq!(ctx.step(), StepOutcome::Executed(Instruction::Noop));
    assert_eq!(ctx.step(), StepOutcome::Halted);

    assert_eq!(ctx.cpu().state, CpuState::Halted);
    assert_eq!(ctx.cpu().pc, 1);
    assert_eq!(ctx.cpu().instructions(), 2);
}

#[test]
fn stepping_a_halted_cpu_does_nothing() {
    let mut ctx = TestContext::new(4, 2, 1, &[I::halt()]);
    let _ = ctx.run();
    let events = ctx.events().len();

    assert_eq!(ctx.step(), StepOutcome::Halted);
    assert_eq!(ctx.events().len(), events);
    assert_eq!(ctx.cpu().instructions(), 1);
}

#[test]
fn undefined_opcode_is_fatal() {
    let word = I::new().opcode(8).build();
    let mut ctx = TestContext::new(4, 2, 1, &[I::noop(), word]);
    let _ = ctx.step();

    let err = ctx.sim.step().unwrap_err();
    assert_eq!(
        err,
        ExecError::FatalDecode {
            pc: 1,
            word,
            opcode: 8,
        }
    );
    assert!(!ctx.sim.halted());
}

#[test]
fn negative_word_has_negative_opcode() {
    let mut ctx = TestContext::new(4, 2, 1, &[-1]);
    let err = ctx.sim.step().unwrap_err();
    assert_eq!(
        err,
        ExecError::FatalDecode {
            pc: 0,
            word: -1,
            opcode: -1,
        }
    );
}

#[test]
fn negative_effective_address_is_out_of_range() {
    let mut ctx = TestContext::new(4, 2, 1, &[I::lw(0, 1, -1), I::halt()]);
    let err = ctx.sim.step().unwrap_err();
    assert_eq!(
        err,
        ExecError::AddressOutOfRange {
            addr: -1,
            kind: AccessType::Load,
        }
    );
}

#[test]
fn store_past_end_of_memory_is_out_of_range() {
    let mut ctx = TestContext::new(4, 2, 1, &[I::lw(1, 0, 3), I::sw(0, 1, 1), I::halt(), 65535]);
    let _ = ctx.step();

    let err = ctx.sim.step().unwrap_err();
    assert_eq!(
        err,
        ExecError::AddressOutOfRange {
            addr: 65536,
            kind: AccessType::Store,
        }
    );
}

#[test]
fn jump_to_negative_pc_faults_on_next_fetch() {
    let mut ctx = TestContext::new(4, 2, 1, &[I::lw(1, 0, 3), I::jalr(2, 1), I::halt(), -5]);
    let _ = ctx.step();
    let _ = ctx.step();
    assert_eq!(ctx.cpu().pc, -5);

    let err = ctx.sim.step().unwrap_err();
    assert_eq!(
        err,
        ExecError::AddressOutOfRange {
            addr: -5,
            kind: AccessType::Fetch,
        }
    );
}
